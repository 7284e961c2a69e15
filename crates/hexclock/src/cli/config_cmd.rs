//! `config` subcommand — show current configuration and file paths.

use std::path::Path;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width, print_json, time};

pub(super) fn cmd_config(json: bool, init: bool, custom_path: Option<&Path>) -> Result<()> {
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);

    if init {
        match &config_path {
            Some(p) if p.exists() => log::warn!("{} already exists, not overwriting", p.display()),
            Some(p) => {
                Config::default().save_to(p)?;
                if !json {
                    println!("Wrote default config to {}", p.display());
                }
            }
            None => log::warn!("no config directory, nothing written"),
        }
    }

    let config = super::load_config(custom_path);
    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);
    let host_timezone = time::host_timezone();

    if json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            host_timezone,
        });
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:", "Host timezone:"],
        &[
            "timezone:",
            "mode:",
            "start_in_date_mode:",
            "rainbow_interval_ms:",
            "rainbow_hue_step:",
            "show_label:",
        ],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    kv("Host timezone:", &host_timezone, w);
    println!();

    println!("Settings:");
    let tz_display = if config.timezone.trim().is_empty() {
        format!("(host) {host_timezone}")
    } else {
        config.timezone.clone()
    };
    kv_indent("timezone:", tz_display, w);
    kv_indent("mode:", config.mode, w);
    kv_indent("start_in_date_mode:", config.start_in_date_mode, w);
    kv_indent("rainbow_interval_ms:", config.rainbow_interval_ms, w);
    kv_indent("rainbow_hue_step:", config.rainbow_hue_step, w);
    kv_indent("show_label:", config.show_label, w);

    if let Err(errors) = config.validate() {
        println!();
        println!("Problems:");
        for e in &errors {
            println!("  {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_config_with_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(cmd_config(false, false, Some(&path)).is_ok());
        assert!(cmd_config(true, false, Some(&path)).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn cmd_config_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        cmd_config(false, true, Some(&path)).unwrap();

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn cmd_config_init_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "mode = \"reversed\"\n").unwrap();

        cmd_config(false, true, Some(&path)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "mode = \"reversed\"\n");
    }
}
