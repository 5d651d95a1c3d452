//! Classification and resolution of caller-supplied app identifiers.
//!
//! Callers hand over whatever identifier they have on hand: the public
//! storefront numeric id (`id` or `i` prefix followed by digits), a
//! reverse-DNS bundle id, or a catalog-native resource id. Classification
//! is one total function over a closed enum; resolution dispatches on the
//! variant.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::client::ConnectClient;
use super::error::ConnectError;
use crate::itunes::ItunesClient;

static NUMERIC_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^id?(\d+)$").expect("valid pattern"));

/// A caller-supplied identifier, classified syntactically into exactly one
/// of three forms. The cases are mutually exclusive and exhaustive over all
/// input strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppIdentifier {
    /// Public App Store numeric id, stored without the `id` prefix.
    StorefrontNumericId(String),
    /// Reverse-DNS bundle identifier.
    BundleId(String),
    /// Assumed to be a catalog-native resource id, used as-is.
    OpaqueResourceId(String),
}

impl AppIdentifier {
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some(captures) = NUMERIC_ID_RE.captures(trimmed) {
            return Self::StorefrontNumericId(captures[1].to_string());
        }
        if trimmed.contains('.')
            && !trimmed.to_lowercase().starts_with("id")
            && !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return Self::BundleId(trimmed.to_string());
        }
        Self::OpaqueResourceId(trimmed.to_string())
    }
}

/// The concrete coordinates of one app, produced once per batch item and
/// not mutated afterward. At least one field is populated on success; all
/// fields empty signals resolution failure.
#[derive(Debug, Clone, Default)]
pub struct ResolvedApp {
    pub resource_id: Option<String>,
    pub bundle_id: Option<String>,
    pub storefront_id: Option<String>,
    pub display_name: Option<String>,
}

impl ResolvedApp {
    /// All fields empty means resolution failed entirely and version
    /// selection must not proceed.
    pub fn is_empty(&self) -> bool {
        self.resource_id.is_none()
            && self.bundle_id.is_none()
            && self.storefront_id.is_none()
            && self.display_name.is_none()
    }

    /// Printable identifier label: the storefront-style `id<number>` form
    /// when a storefront id is known, else the bundle id, else the resource
    /// id, else `?`.
    pub fn id_label(&self) -> String {
        if let Some(id) = &self.storefront_id {
            format!("id{}", id)
        } else if let Some(bundle_id) = &self.bundle_id {
            bundle_id.clone()
        } else if let Some(resource_id) = &self.resource_id {
            resource_id.clone()
        } else {
            "?".to_string()
        }
    }
}

/// Resolve one identifier against the catalog, using the unauthenticated
/// storefront lookup for numeric ids. Storefront misses degrade to a
/// partially populated result; catalog errors other than a 404 on a direct
/// resource fetch propagate.
pub async fn resolve(
    connect: &mut ConnectClient,
    itunes: &ItunesClient,
    input: &str,
    country: &str,
) -> Result<ResolvedApp, ConnectError> {
    match AppIdentifier::classify(input) {
        AppIdentifier::StorefrontNumericId(numeric_id) => {
            let mut resolved = ResolvedApp {
                storefront_id: Some(numeric_id.clone()),
                ..Default::default()
            };
            match itunes.lookup_by_id(&numeric_id, country).await {
                Ok(Some(item)) => {
                    resolved.bundle_id = item.bundle_id;
                    resolved.display_name = item.track_name;
                }
                Ok(None) => {
                    tracing::debug!("No storefront entry for id{} in '{}'", numeric_id, country);
                }
                Err(e) => {
                    tracing::warn!("Storefront lookup failed for id{}: {:#}", numeric_id, e);
                }
            }
            if let Some(bundle_id) = resolved.bundle_id.clone()
                && let Some((resource_id, canonical)) = find_by_bundle_id(connect, &bundle_id).await?
            {
                resolved.resource_id = Some(resource_id);
                resolved.bundle_id = Some(canonical);
            }
            Ok(resolved)
        }

        AppIdentifier::BundleId(bundle_id) => match find_by_bundle_id(connect, &bundle_id).await? {
            Some((resource_id, canonical)) => Ok(ResolvedApp {
                resource_id: Some(resource_id),
                bundle_id: Some(canonical),
                ..Default::default()
            }),
            // Known identifier, unknown account scope.
            None => Ok(ResolvedApp {
                bundle_id: Some(bundle_id),
                ..Default::default()
            }),
        },

        AppIdentifier::OpaqueResourceId(resource_id) => {
            let path = format!("/v1/apps/{}", resource_id);
            match connect.get(&path, &[]).await {
                Ok(document) => Ok(ResolvedApp {
                    resource_id: Some(resource_id),
                    bundle_id: string_at(&document, "/data/attributes/bundleId"),
                    display_name: string_at(&document, "/data/attributes/name"),
                    ..Default::default()
                }),
                Err(ConnectError::CatalogHttp { status: 404, .. }) => Ok(ResolvedApp::default()),
                Err(e) => Err(e),
            }
        }
    }
}

/// Look up an app record by exact bundle id. On a match, returns the
/// catalog resource id and the canonical bundle id from the record rather
/// than the input string.
async fn find_by_bundle_id(
    connect: &mut ConnectClient,
    bundle_id: &str,
) -> Result<Option<(String, String)>, ConnectError> {
    let document = connect
        .get(
            "/v1/apps",
            &[("filter[bundleId]", bundle_id), ("limit", "1")],
        )
        .await?;

    let Some(resource_id) = string_at(&document, "/data/0/id") else {
        return Ok(None);
    };
    let canonical = string_at(&document, "/data/0/attributes/bundleId")
        .unwrap_or_else(|| bundle_id.to_string());
    Ok(Some((resource_id, canonical)))
}

fn string_at(document: &Value, pointer: &str) -> Option<String> {
    document
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_storefront_numeric_ids() {
        assert_eq!(
            AppIdentifier::classify("id123456789"),
            AppIdentifier::StorefrontNumericId("123456789".to_string())
        );
        // The `d` alone is optional; a lone `i` prefix still matches.
        assert_eq!(
            AppIdentifier::classify("i123"),
            AppIdentifier::StorefrontNumericId("123".to_string())
        );
        assert_eq!(
            AppIdentifier::classify("  id42  "),
            AppIdentifier::StorefrontNumericId("42".to_string())
        );
    }

    #[test]
    fn test_classify_bundle_ids() {
        assert_eq!(
            AppIdentifier::classify("com.example.myapp"),
            AppIdentifier::BundleId("com.example.myapp".to_string())
        );
        assert_eq!(
            AppIdentifier::classify("12.34"),
            AppIdentifier::BundleId("12.34".to_string())
        );
    }

    #[test]
    fn test_classify_opaque_resource_ids() {
        // No dot, not numeric.
        assert_eq!(
            AppIdentifier::classify("6448311069abc"),
            AppIdentifier::OpaqueResourceId("6448311069abc".to_string())
        );
        // Dotted but id-prefixed, so not a bundle id.
        assert_eq!(
            AppIdentifier::classify("id.example.app"),
            AppIdentifier::OpaqueResourceId("id.example.app".to_string())
        );
        // `id` prefix without digits.
        assert_eq!(
            AppIdentifier::classify("idabc"),
            AppIdentifier::OpaqueResourceId("idabc".to_string())
        );
        // Bare digits carry no prefix and no dot, so they are taken as a
        // catalog resource id.
        assert_eq!(
            AppIdentifier::classify("123456789"),
            AppIdentifier::OpaqueResourceId("123456789".to_string())
        );
    }

    #[test]
    fn test_id_label_preference_order() {
        let mut resolved = ResolvedApp {
            resource_id: Some("res-1".to_string()),
            bundle_id: Some("com.example.app".to_string()),
            storefront_id: Some("123".to_string()),
            display_name: Some("Example".to_string()),
        };
        assert_eq!(resolved.id_label(), "id123");

        resolved.storefront_id = None;
        assert_eq!(resolved.id_label(), "com.example.app");

        resolved.bundle_id = None;
        assert_eq!(resolved.id_label(), "res-1");

        resolved.resource_id = None;
        assert_eq!(resolved.id_label(), "?");
    }

    #[test]
    fn test_empty_resolved_app() {
        assert!(ResolvedApp::default().is_empty());
        let partial = ResolvedApp {
            storefront_id: Some("123".to_string()),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }
}
