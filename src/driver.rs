//! Batch retrieval across (app, locale) pairs with per-item failure
//! isolation.
//!
//! Each app moves through resolve → version select → locale fetches; a
//! failure at any step terminates that app's processing (its locales are
//! reported failed) without touching sibling apps, and a failure on one
//! locale never blocks sibling locales. The only cross-item aggregation is
//! the "any item failed" fold over the outcome sequence.

use std::collections::HashMap;

use crate::connect::{self, AppIdentifier, ConnectClient, ConnectError, ResolvedApp};
use crate::itunes::{self, ItunesClient};
use crate::keywords;
use crate::types::Platform;

/// Name and keyword fields for one (app, locale) pair.
#[derive(Debug, Clone, Default)]
pub struct LocaleFields {
    pub name: Option<String>,
    pub keywords: Option<String>,
}

/// One terminal per-locale outcome; never retried automatically.
#[derive(Debug, Clone)]
pub struct LocaleResult {
    pub locale: String,
    pub name: Option<String>,
    pub keywords: Option<String>,
    pub error: Option<String>,
}

/// One entry in the ordered outcome sequence of a batch run.
#[derive(Debug)]
pub enum Outcome {
    /// The app failed resolution or version selection; all its locales were
    /// skipped.
    App { input: String, error: String },
    /// A per-locale result for a prepared app.
    Locale {
        input: String,
        id_label: String,
        result: LocaleResult,
    },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        match self {
            Outcome::App { .. } => true,
            Outcome::Locale { result, .. } => result.error.is_some(),
        }
    }
}

/// The app-level and per-locale fetches the driver drives. Implemented by
/// the authenticated and public paths, and by stubs in tests.
#[allow(async_fn_in_trait)]
pub trait Source {
    /// Resolve the identifier and do any per-app work (version selection,
    /// bulk localization fetches). An error here fails the whole app.
    async fn prepare(&mut self, input: &str) -> Result<ResolvedApp, String>;

    /// Fetch the fields for one locale of the most recently prepared app.
    async fn fetch(&mut self, resolved: &ResolvedApp, locale: &str) -> Result<LocaleFields, String>;
}

/// Process every (app, locale) pair sequentially, collecting outcomes in
/// request order.
pub async fn run<S: Source>(source: &mut S, apps: &[String], locales: &[String]) -> Vec<Outcome> {
    let mut outcomes = Vec::new();

    for input in apps {
        let resolved = match source.prepare(input).await {
            Ok(resolved) => resolved,
            Err(error) => {
                outcomes.push(Outcome::App {
                    input: input.clone(),
                    error,
                });
                continue;
            }
        };

        for locale in locales {
            let result = match source.fetch(&resolved, locale).await {
                Ok(fields) => LocaleResult {
                    locale: locale.clone(),
                    name: fields
                        .name
                        .or_else(|| resolved.display_name.clone())
                        .or_else(|| resolved.bundle_id.clone()),
                    keywords: fields.keywords,
                    error: None,
                },
                Err(error) => LocaleResult {
                    locale: locale.clone(),
                    name: resolved
                        .display_name
                        .clone()
                        .or_else(|| resolved.bundle_id.clone()),
                    keywords: None,
                    error: Some(error),
                },
            };
            outcomes.push(Outcome::Locale {
                input: input.clone(),
                id_label: resolved.id_label(),
                result,
            });
        }
    }

    outcomes
}

/// Fold the aggregate failure flag used for the process exit status.
pub fn any_failed(outcomes: &[Outcome]) -> bool {
    outcomes.iter().any(Outcome::is_failure)
}

/// Authenticated retrieval through the App Store Connect catalog.
pub struct ConnectSource<'a> {
    connect: &'a mut ConnectClient,
    itunes: &'a ItunesClient,
    country: String,
    platform: Platform,
    prefer_live: bool,
    per_app: Option<PerAppFields>,
}

/// Locale maps fetched once per prepared app.
struct PerAppFields {
    names: HashMap<String, String>,
    keywords: Result<HashMap<String, String>, String>,
}

impl<'a> ConnectSource<'a> {
    pub fn new(
        connect: &'a mut ConnectClient,
        itunes: &'a ItunesClient,
        country: String,
        platform: Platform,
        prefer_live: bool,
    ) -> Self {
        Self {
            connect,
            itunes,
            country,
            platform,
            prefer_live,
            per_app: None,
        }
    }
}

impl Source for ConnectSource<'_> {
    async fn prepare(&mut self, input: &str) -> Result<ResolvedApp, String> {
        self.per_app = None;

        let resolved = connect::resolve(self.connect, self.itunes, input, &self.country)
            .await
            .map_err(|e| format!("resolution failed: {}", e))?;
        if resolved.is_empty() {
            return Err("no matching app found".to_string());
        }
        let Some(resource_id) = resolved.resource_id.clone() else {
            return Err(format!(
                "{} is not accessible in this App Store Connect account",
                resolved.id_label()
            ));
        };

        let version =
            connect::select_version(self.connect, &resource_id, self.platform, self.prefer_live)
                .await
                .map_err(|e| format!("version lookup failed: {}", e))?
                .ok_or_else(|| {
                    ConnectError::NoVersionFound {
                        platform: self.platform.to_string(),
                    }
                    .to_string()
                })?;
        tracing::debug!(
            "Selected version {} ({}) for {}",
            version.id,
            version.state,
            resource_id
        );

        // The keyword fetch error is held per app and surfaced per locale;
        // the name fetch degrades to an empty map on its own.
        let keywords = connect::locales::version_keywords(self.connect, &version.id)
            .await
            .map_err(|e| e.to_string());
        let names = connect::locales::app_info_names(self.connect, &resource_id).await;

        self.per_app = Some(PerAppFields { names, keywords });
        Ok(resolved)
    }

    async fn fetch(
        &mut self,
        _resolved: &ResolvedApp,
        locale: &str,
    ) -> Result<LocaleFields, String> {
        let Some(per_app) = &self.per_app else {
            return Err("app fields were not prepared".to_string());
        };
        let keywords = per_app.keywords.as_ref().map_err(Clone::clone)?;
        Ok(LocaleFields {
            name: per_app.names.get(locale).cloned(),
            keywords: keywords.get(locale).cloned(),
        })
    }
}

/// Unauthenticated retrieval from public storefront metadata, with
/// heuristically constructed keywords.
pub struct PublicSource<'a> {
    itunes: &'a ItunesClient,
    country: String,
    char_limit: usize,
}

impl<'a> PublicSource<'a> {
    pub fn new(itunes: &'a ItunesClient, country: String, char_limit: usize) -> Self {
        Self {
            itunes,
            country,
            char_limit,
        }
    }
}

impl Source for PublicSource<'_> {
    async fn prepare(&mut self, input: &str) -> Result<ResolvedApp, String> {
        // Classification only; lookups happen per locale because each
        // locale maps to its own storefront country.
        match AppIdentifier::classify(input) {
            AppIdentifier::StorefrontNumericId(numeric_id) => Ok(ResolvedApp {
                storefront_id: Some(numeric_id),
                ..Default::default()
            }),
            AppIdentifier::BundleId(bundle_id) => Ok(ResolvedApp {
                bundle_id: Some(bundle_id),
                ..Default::default()
            }),
            AppIdentifier::OpaqueResourceId(other) => Err(format!(
                "'{}' is not a public App Store id or bundle id",
                other
            )),
        }
    }

    async fn fetch(
        &mut self,
        resolved: &ResolvedApp,
        locale: &str,
    ) -> Result<LocaleFields, String> {
        let country = itunes::map_locale_to_country(locale, &self.country);
        let item = if let Some(id) = &resolved.storefront_id {
            self.itunes.lookup_by_id(id, &country).await
        } else if let Some(bundle_id) = &resolved.bundle_id {
            self.itunes.lookup_by_bundle_id(bundle_id, &country).await
        } else {
            Ok(None)
        }
        .map_err(|e| format!("{:#}", e))?;

        let Some(item) = item else {
            return Err(format!("no storefront entry in '{}'", country));
        };
        Ok(LocaleFields {
            keywords: keywords::build_keywords(&item, self.char_limit),
            name: item.track_name,
        })
    }
}
