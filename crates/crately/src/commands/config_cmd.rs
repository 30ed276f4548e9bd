//! Config subcommand handlers.

use dialoguer::Input;

use crately_config::{Profile, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show: render the effective config ───────────────────────
        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let toml_str = crately_config::to_toml_string(&cfg)?;
            output::print_output(&toml_str, global.quiet);
            Ok(())
        }

        // ── Path: print the canonical config file location ──────────
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = config_path();
            eprintln!("crately -- configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let service: String = Input::new()
                .with_prompt("Service URL")
                .default("http://127.0.0.1:5000".into())
                .interact_text()
                .map_err(prompt_err)?;

            // Validate before writing so a typo doesn't poison the file.
            let _: url::Url = service.parse().map_err(|_| CliError::Validation {
                field: "service".into(),
                reason: format!("invalid URL: {service}"),
            })?;

            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(30u64)
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = load_config_or_default();
            cfg.default_profile = Some(profile_name.clone());
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    service,
                    timeout: Some(timeout),
                    refresh_interval: None,
                },
            );
            save_config(&cfg)?;

            output::print_status(
                &format!("\nProfile '{profile_name}' written to {}", path.display()),
                global,
            );
            Ok(())
        }
    }
}

