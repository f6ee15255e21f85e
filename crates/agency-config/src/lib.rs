//! Shared configuration for the agency CLI and TUI.
//!
//! TOML profiles, admin token resolution (env indirection + plaintext),
//! and translation to `agency_core::SiteConfig`. Both binaries depend on
//! this crate; the CLI layers its global flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use agency_core::config::{
    DEFAULT_ADMIN_PAGE_SIZE, DEFAULT_API_PREFIX, DEFAULT_BLOG_PAGE_SIZE, DEFAULT_PORTFOLIO_STEP,
};
use agency_core::{SiteConfig, TlsVerification};

/// Environment prefix; nested keys are separated by `__`
/// (`AGENCY_PROFILES__DEFAULT__BACKEND`).
pub const ENV_PREFIX: &str = "AGENCY_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named site profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: explicit choice, then `default_profile`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named site profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g. "https://api.northlight.studio").
    pub backend: String,

    /// Collection path prefix; `/api` when unset.
    pub api_prefix: Option<String>,

    /// Public website URL used for shareable blog links; the backend URL when unset.
    pub public_url: Option<String>,

    /// Admin token (plaintext; prefer `admin_token_env`).
    pub admin_token: Option<String>,

    /// Environment variable name containing the admin token.
    pub admin_token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification (local development backends).
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    pub blog_page_size: Option<usize>,
    pub portfolio_step: Option<usize>,
    pub admin_page_size: Option<usize>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("studio", "northlight", "agency").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("agency");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file (missing files are skipped) + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution (without CLI flags) ────────────────────────────

/// Admin token from the profile: `admin_token_env` lookup, then plaintext.
/// `None` means public access only.
pub fn resolve_token(profile: &Profile) -> Option<SecretString> {
    if let Some(ref env_name) = profile.admin_token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }
    profile
        .admin_token
        .as_ref()
        .map(|token| SecretString::from(token.clone()))
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

fn positive(field: &str, value: Option<usize>, default: usize) -> Result<usize, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be at least 1".into(),
        }),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}

/// Build a `SiteConfig` from a profile (no CLI flag overrides).
pub fn profile_to_site_config(profile: &Profile) -> Result<SiteConfig, ConfigError> {
    let backend = parse_url("backend", &profile.backend)?;
    let public_url = match profile.public_url.as_deref() {
        Some(raw) => parse_url("public_url", raw)?,
        None => backend.clone(),
    };

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(SiteConfig {
        backend,
        api_prefix: profile
            .api_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PREFIX.into()),
        public_url,
        token: resolve_token(profile),
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        blog_page_size: positive("blog_page_size", profile.blog_page_size, DEFAULT_BLOG_PAGE_SIZE)?,
        portfolio_step: positive("portfolio_step", profile.portfolio_step, DEFAULT_PORTFOLIO_STEP)?,
        admin_page_size: positive(
            "admin_page_size",
            profile.admin_page_size,
            DEFAULT_ADMIN_PAGE_SIZE,
        )?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn profile(backend: &str) -> Profile {
        Profile {
            backend: backend.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let cfg = profile_to_site_config(&profile("https://api.example.com")).unwrap();
        assert_eq!(cfg.api_prefix, "/api");
        assert_eq!(cfg.public_url, cfg.backend);
        assert_eq!(cfg.blog_page_size, 6);
        assert_eq!(cfg.portfolio_step, 6);
        assert_eq!(cfg.admin_page_size, 10);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
        assert!(cfg.token.is_none());
    }

    #[test]
    fn invalid_backend_is_rejected() {
        let err = profile_to_site_config(&profile("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut p = profile("https://api.example.com");
        p.blog_page_size = Some(0);
        assert!(profile_to_site_config(&p).is_err());
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let mut p = profile("https://api.example.com");
        p.ca_cert = Some("/tmp/ca.pem".into());
        assert_eq!(
            profile_to_site_config(&p).unwrap().tls,
            TlsVerification::CustomCa("/tmp/ca.pem".into())
        );
        p.insecure = Some(true);
        assert_eq!(
            profile_to_site_config(&p).unwrap().tls,
            TlsVerification::DangerAcceptInvalid
        );
    }

    #[test]
    fn token_env_indirection_falls_back_to_plaintext() {
        let mut p = profile("https://api.example.com");
        p.admin_token_env = Some("AGENCY_TEST_TOKEN_THAT_IS_NEVER_SET".into());
        p.admin_token = Some("plain".into());
        assert_eq!(resolve_token(&p).unwrap().expose_secret(), "plain");
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut p = profile("https://api.example.com");
        p.portfolio_step = Some(3);
        cfg.profiles.insert("default".into(), p);
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let name = loaded.profile_name(None);
        assert_eq!(name, "default");
        let p = loaded.profile(name).unwrap();
        assert_eq!(p.backend, "https://api.example.com");
        assert_eq!(p.portfolio_step, Some(3));
        assert!(matches!(
            loaded.profile("staging"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.defaults.output, "table");
        assert!(loaded.profiles.is_empty());
    }
}
