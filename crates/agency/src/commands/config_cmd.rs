//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const VALID_KEYS: &str = "backend, api_prefix, public_url, admin_token, admin_token_env, \
                          ca_cert, insecure, timeout, blog_page_size, portfolio_step, \
                          admin_page_size";

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the admin token.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "backend = \"{}\"", p.backend);
        if let Some(ref prefix) = p.api_prefix {
            let _ = writeln!(out, "api_prefix = \"{prefix}\"");
        }
        if let Some(ref public) = p.public_url {
            let _ = writeln!(out, "public_url = \"{public}\"");
        }
        if p.admin_token.is_some() {
            let _ = writeln!(out, "admin_token = \"****\"");
        }
        if let Some(ref env) = p.admin_token_env {
            let _ = writeln!(out, "admin_token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        for (key, value) in [
            ("blog_page_size", p.blog_page_size),
            ("portfolio_step", p.portfolio_step),
            ("admin_page_size", p.admin_page_size),
        ] {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = {value}");
            }
        }
    }

    out
}

/// Same redaction for structured output formats.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: agency_config::Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                if p.admin_token.is_some() {
                    p.admin_token = Some("****".into());
                }
                (name.clone(), p)
            })
            .collect(),
    }
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("must be {expected}"),
    })
}

fn parse_size(key: &str, value: &str) -> Result<usize, CliError> {
    match parse_value::<usize>(key, value, "a positive number")? {
        0 => Err(CliError::Validation {
            field: key.into(),
            reason: "must be at least 1".into(),
        }),
        n => Ok(n),
    }
}

/// Apply `config set <key> <value>` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "backend" => profile.backend = value,
        "api_prefix" | "api-prefix" => profile.api_prefix = Some(value),
        "public_url" | "public-url" => profile.public_url = Some(value),
        "admin_token" | "admin-token" | "token" => profile.admin_token = Some(value),
        "admin_token_env" | "admin-token-env" | "token_env" => {
            profile.admin_token_env = Some(value);
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_value(key, &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_value(key, &value, "a number (seconds)")?),
        "blog_page_size" | "blog-page-size" => {
            profile.blog_page_size = Some(parse_size(key, &value)?);
        }
        "portfolio_step" | "portfolio-step" => {
            profile.portfolio_step = Some(parse_size(key, &value)?);
        }
        "admin_page_size" | "admin-page-size" => {
            profile.admin_page_size = Some(parse_size(key, &value)?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {VALID_KEYS}"),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("agency: configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let backend: String = Input::new()
                .with_prompt("Backend URL")
                .default("http://localhost:5000".into())
                .interact_text()
                .map_err(prompt_err)?;

            let public_url: String = Input::new()
                .with_prompt("Public website URL")
                .default(backend.clone())
                .interact_text()
                .map_err(prompt_err)?;

            let token_choices = &[
                "No admin token (public commands only)",
                "Read the token from an environment variable (recommended)",
                "Save the token to the config file (plaintext)",
            ];
            let token_selection = Select::new()
                .with_prompt("Admin access")
                .items(token_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let (admin_token, admin_token_env) = match token_selection {
                0 => (None, None),
                1 => {
                    let var: String = Input::new()
                        .with_prompt("Variable name")
                        .default("AGENCY_ADMIN_TOKEN".into())
                        .interact_text()
                        .map_err(prompt_err)?;
                    (None, Some(var))
                }
                _ => {
                    let token = Password::new()
                        .with_prompt("Admin token")
                        .interact()
                        .map_err(prompt_err)?;
                    (Some(token), None)
                }
            };

            let profile = Profile {
                backend,
                public_url: Some(public_url),
                admin_token,
                admin_token_env,
                ..Profile::default()
            };
            agency_config::profile_to_site_config(&profile)?;

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }
            let written = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", written.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Try it: agency blog list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            set_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.profile_name(None);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: agency config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_key_parses_sizes_and_rejects_unknown_keys() {
        let mut profile = Profile::default();
        set_key(&mut profile, "portfolio-step", "9".into()).unwrap();
        assert_eq!(profile.portfolio_step, Some(9));

        assert!(set_key(&mut profile, "blog_page_size", "0".into()).is_err());
        assert!(set_key(&mut profile, "insecure", "maybe".into()).is_err());
        assert!(matches!(
            set_key(&mut profile, "colour", "x".into()),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn show_masks_the_token() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                backend: "https://api.example.com".into(),
                admin_token: Some("s3cret".into()),
                ..Profile::default()
            },
        );
        let text = format_config_redacted(&redacted(&cfg));
        assert!(text.contains("admin_token = \"****\""));
        assert!(!text.contains("s3cret"));
    }
}
