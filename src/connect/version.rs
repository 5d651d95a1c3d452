//! Release-version selection among App Store Connect records.

use serde_json::Value;

use super::client::ConnectClient;
use super::error::ConnectError;
use crate::types::Platform;

const LIVE_STATE: &str = "READY_FOR_SALE";
const PAGE_LIMIT: &str = "200";

/// A versioned submission record, fetched fresh per batch item and never
/// cached beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    pub id: String,
    pub platform: Platform,
    pub state: String,
    pub created_date: Option<String>,
}

/// Pick the best release version for an app. With `prefer_live`, the
/// live ("ready for sale") set wins when non-empty even if an unreleased
/// record is newer; otherwise the newest record of the platform wins.
pub async fn select_version(
    connect: &mut ConnectClient,
    app_resource_id: &str,
    platform: Platform,
    prefer_live: bool,
) -> Result<Option<ReleaseVersion>, ConnectError> {
    let path = format!("/v1/apps/{}/appStoreVersions", app_resource_id);

    if prefer_live {
        let document = connect
            .get(
                &path,
                &[
                    ("filter[platform]", platform.wire_name()),
                    ("filter[appStoreState]", LIVE_STATE),
                    ("limit", PAGE_LIMIT),
                ],
            )
            .await?;
        if let Some(live) = pick_newest(parse_versions(&document, platform)) {
            return Ok(Some(live));
        }
    }

    let document = connect
        .get(
            &path,
            &[
                ("filter[platform]", platform.wire_name()),
                ("limit", PAGE_LIMIT),
            ],
        )
        .await?;
    Ok(pick_newest(parse_versions(&document, platform)))
}

fn parse_versions(document: &Value, requested: Platform) -> Vec<ReleaseVersion> {
    let Some(records) = document.pointer("/data").and_then(Value::as_array) else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| {
            let id = record.get("id")?.as_str()?.to_string();
            let attributes = record.get("attributes");
            let state = attributes
                .and_then(|a| a.get("appStoreState"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let platform = attributes
                .and_then(|a| a.get("platform"))
                .and_then(Value::as_str)
                .and_then(Platform::from_wire)
                .unwrap_or(requested);
            let created_date = attributes
                .and_then(|a| a.get("createdDate"))
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(ReleaseVersion {
                id,
                platform,
                state,
                created_date,
            })
        })
        .collect()
}

/// Newest by the ISO-8601 `createdDate` string, compared lexicographically;
/// records without the field sort last.
fn pick_newest(mut candidates: Vec<ReleaseVersion>) -> Option<ReleaseVersion> {
    candidates.sort_by(|a, b| match (&a.created_date, &b.created_date) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    candidates.into_iter().next()
}
