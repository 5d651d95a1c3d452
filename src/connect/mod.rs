//! Authenticated App Store Connect retrieval pipeline
//!
//! Turns caller-supplied app identifiers into concrete catalog records and
//! reads per-locale name/keyword fields from them. The pipeline is layered
//! bottom-up: key loading, token issuance, the HTTP client, identifier
//! resolution, version selection, and localization fetches.

pub mod client;
pub mod error;
pub mod key;
pub mod locales;
pub mod resolve;
pub mod token;
pub mod version;

pub use client::ConnectClient;
pub use error::ConnectError;
pub use key::{KeyEncoding, SigningKey};
pub use resolve::{AppIdentifier, ResolvedApp, resolve};
pub use token::TokenIssuer;
pub use version::{ReleaseVersion, select_version};
