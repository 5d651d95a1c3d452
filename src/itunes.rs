//! Public iTunes Search/Lookup API client
//!
//! The unauthenticated storefront lookup. Used by the identifier resolver
//! to turn public numeric ids into bundle ids and display names, and by the
//! public retrieval path as the sole metadata source.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

const LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

/// Locale → storefront country mapping (subset; unknown locales fall back
/// to the base language tag, then to the configured default).
fn storefront_for(tag: &str) -> Option<&'static str> {
    match tag {
        "en" | "en-US" => Some("us"),
        "es" => Some("es"),
        "es-MX" => Some("mx"),
        "pt-PT" => Some("pt"),
        "pt-BR" => Some("br"),
        "fr" => Some("fr"),
        "de" => Some("de"),
        "it" => Some("it"),
        "tr" => Some("tr"),
        "hi" => Some("in"),
        "ja" => Some("jp"),
        "ko" => Some("kr"),
        "ar" => Some("sa"),
        "zh-Hans" => Some("cn"),
        _ => None,
    }
}

pub fn map_locale_to_country(locale: &str, default_country: &str) -> String {
    if locale.is_empty() {
        return default_country.to_string();
    }
    if let Some(country) = storefront_for(locale) {
        return country.to_string();
    }
    let base = locale.split('-').next().unwrap_or(locale);
    storefront_for(base).unwrap_or(default_country).to_string()
}

/// One software entry from a lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesApp {
    pub track_name: Option<String>,
    pub bundle_id: Option<String>,
    pub kind: Option<String>,
    pub wrapper_type: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<ItunesApp>,
}

pub struct ItunesClient {
    http: reqwest::Client,
}

impl ItunesClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// Look up by public numeric App Store id.
    pub async fn lookup_by_id(&self, id: &str, country: &str) -> Result<Option<ItunesApp>> {
        self.lookup(&[("id", id), ("country", country), ("entity", "software")])
            .await
    }

    /// Look up by bundle identifier.
    pub async fn lookup_by_bundle_id(
        &self,
        bundle_id: &str,
        country: &str,
    ) -> Result<Option<ItunesApp>> {
        self.lookup(&[
            ("bundleId", bundle_id),
            ("country", country),
            ("entity", "software"),
        ])
        .await
    }

    async fn lookup(&self, query: &[(&str, &str)]) -> Result<Option<ItunesApp>> {
        let response = self
            .http
            .get(LOOKUP_URL)
            .query(query)
            .send()
            .await
            .context("iTunes lookup request failed")?
            .error_for_status()
            .context("iTunes lookup returned an error status")?;

        let body: LookupResponse = response
            .json()
            .await
            .context("Failed to parse iTunes lookup response")?;
        Ok(pick_software_entry(body.results))
    }
}

/// Prefer software entries over other wrapper types; fall back to the first
/// result.
fn pick_software_entry(results: Vec<ItunesApp>) -> Option<ItunesApp> {
    if results.is_empty() {
        return None;
    }
    let index = results
        .iter()
        .position(|item| {
            item.kind.as_deref() == Some("software")
                || item.wrapper_type.as_deref() == Some("software")
        })
        .unwrap_or(0);
    results.into_iter().nth(index)
}
