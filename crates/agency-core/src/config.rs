// ── Runtime site configuration ──
//
// Describes *how* to reach the backend and how list views are tuned.
// The CLI/TUI builds a `SiteConfig` (usually from agency-config) and hands
// it to `Site::new`; core never reads config files.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Configuration for one agency site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Backend URL (e.g. `https://api.agency.example`).
    pub backend: Url,
    /// Path prefix applied to every collection endpoint.
    pub api_prefix: String,
    /// Public website URL, used for shareable blog addresses.
    pub public_url: Url,
    /// Admin bearer token. Public reads and form submissions work without one.
    pub token: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Blog fixed page size.
    pub blog_page_size: usize,
    /// Portfolio incremental reveal step.
    pub portfolio_step: usize,
    /// Page size of admin review lists.
    pub admin_page_size: usize,
}

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_BLOG_PAGE_SIZE: usize = 6;
pub const DEFAULT_PORTFOLIO_STEP: usize = 6;
pub const DEFAULT_ADMIN_PAGE_SIZE: usize = 10;

impl SiteConfig {
    /// Defaults for everything except the two URLs.
    pub fn new(backend: Url, public_url: Url) -> Self {
        Self {
            backend,
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            public_url,
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            blog_page_size: DEFAULT_BLOG_PAGE_SIZE,
            portfolio_step: DEFAULT_PORTFOLIO_STEP,
            admin_page_size: DEFAULT_ADMIN_PAGE_SIZE,
        }
    }

    pub(crate) fn transport(&self) -> agency_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => agency_api::TlsMode::System,
            TlsVerification::CustomCa(path) => agency_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => agency_api::TlsMode::DangerAcceptInvalid,
        };
        agency_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
