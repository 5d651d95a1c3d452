//! Per-locale name and keyword fields for a resolved app.

use std::collections::HashMap;

use serde_json::Value;

use super::client::ConnectClient;
use super::error::ConnectError;

/// Keyword strings per locale for one release version.
pub async fn version_keywords(
    connect: &mut ConnectClient,
    version_id: &str,
) -> Result<HashMap<String, String>, ConnectError> {
    let path = format!("/v1/appStoreVersions/{}/appStoreVersionLocalizations", version_id);
    let document = connect.get(&path, &[("limit", "200")]).await?;
    Ok(collect_attribute(&document, "keywords"))
}

/// Localized display names from the app's current app info record.
///
/// A missing or failing app info record degrades to an empty map with a
/// warning; the caller's name fallback chain covers the gap.
pub async fn app_info_names(
    connect: &mut ConnectClient,
    app_resource_id: &str,
) -> HashMap<String, String> {
    match fetch_app_info_names(connect, app_resource_id).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("Localized name lookup failed for {}: {}", app_resource_id, e);
            HashMap::new()
        }
    }
}

async fn fetch_app_info_names(
    connect: &mut ConnectClient,
    app_resource_id: &str,
) -> Result<HashMap<String, String>, ConnectError> {
    let path = format!("/v1/apps/{}/appInfos", app_resource_id);
    let document = connect.get(&path, &[("limit", "2")]).await?;
    let Some(info_id) = document.pointer("/data/0/id").and_then(Value::as_str) else {
        return Ok(HashMap::new());
    };

    let path = format!("/v1/appInfos/{}/appInfoLocalizations", info_id);
    let document = connect.get(&path, &[("limit", "200")]).await?;
    Ok(collect_attribute(&document, "name"))
}

/// Build a locale → attribute map from a localization collection document,
/// skipping records where the attribute is absent or empty.
fn collect_attribute(document: &Value, attribute: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Some(records) = document.pointer("/data").and_then(Value::as_array) else {
        return map;
    };

    for record in records {
        let Some(attributes) = record.get("attributes") else {
            continue;
        };
        let Some(locale) = attributes.get("locale").and_then(Value::as_str) else {
            continue;
        };
        if let Some(value) = attributes.get(attribute).and_then(Value::as_str)
            && !value.is_empty()
        {
            map.insert(locale.to_string(), value.to_string());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_attribute() {
        let document = json!({
            "data": [
                {
                    "attributes": {
                        "locale": "en-US",
                        "keywords": "garage,band,ringtones",
                        "name": "My App"
                    }
                },
                {
                    "attributes": { "locale": "de-DE", "keywords": "" }
                },
                {
                    "attributes": { "keywords": "orphaned" }
                }
            ]
        });

        let keywords = collect_attribute(&document, "keywords");
        assert_eq!(
            keywords.get("en-US").map(String::as_str),
            Some("garage,band,ringtones")
        );
        // Empty values and records without a locale are skipped.
        assert!(!keywords.contains_key("de-DE"));
        assert_eq!(keywords.len(), 1);

        let names = collect_attribute(&document, "name");
        assert_eq!(names.get("en-US").map(String::as_str), Some("My App"));
    }

    #[test]
    fn test_collect_attribute_empty_document() {
        assert!(collect_attribute(&json!({}), "keywords").is_empty());
        assert!(collect_attribute(&json!({ "data": [] }), "keywords").is_empty());
    }
}
