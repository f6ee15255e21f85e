//! CLI configuration: thin wrapper around `agency_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--backend, --token, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use agency_core::{SiteConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use agency_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the `SiteConfig` for this invocation.
///
/// Flags override the active profile; with no profile at all, `--backend`
/// alone is enough for public commands.
pub fn build_site_config(global: &GlobalOpts) -> Result<SiteConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            let backend = global.backend.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile {
                backend,
                ..Profile::default()
            }
        }
    };

    apply_overrides(profile, global)
}

/// Profile values first, then flag overrides on top.
pub fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Result<SiteConfig, CliError> {
    if let Some(ref backend) = global.backend {
        profile.backend.clone_from(backend);
    }
    let mut site = agency_config::profile_to_site_config(&profile)?;

    if let Some(ref token) = global.token {
        site.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        site.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        site.timeout = Duration::from_secs(secs);
    }
    Ok(site)
}
