use thiserror::Error;

/// Errors raised by the App Store Connect pipeline.
///
/// `KeyFormat` and `MissingCredentials` are fatal and surface before any
/// network call. Everything else is caught per app or per locale by the
/// batch driver. Resolution misses are not errors; they come back as an
/// empty [`super::ResolvedApp`].
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("private key material is not parseable as PEM, base64-encoded PEM, or DER")]
    KeyFormat,

    #[error("App Store Connect credentials are incomplete; missing {0}")]
    MissingCredentials(String),

    #[error("App Store Connect returned {status}: {detail}")]
    CatalogHttp { status: u16, detail: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("no {platform} release version found")]
    NoVersionFound { platform: String },
}
