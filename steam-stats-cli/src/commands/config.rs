use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{AppConfig, ConfigSource, Sourced, config_path};

/// Hide all but the first two characters of a secret.
fn mask_value(s: &str) -> String {
    let prefix: String = s.chars().take(2).collect();
    if prefix.len() == s.len() {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}

/// Show current configuration and where each value comes from.
pub(crate) fn run_config_show(config: &AppConfig) {
    log::info!(
        "{}",
        "steam-stats Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match config_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let fields: [(&str, &Sourced<String>, bool); 3] = [
        ("steam.api_key", &config.steam_api_key, true),
        ("steam.steam_id", &config.steam_id, false),
        ("giantbomb.api_key", &config.giantbomb_api_key, true),
    ];

    for (name, sourced, is_secret) in fields {
        let label = format!("{}:", name);
        let source_str = format!("({})", sourced.source);
        match &sourced.value {
            Some(v) => {
                let shown = if is_secret { mask_value(v) } else { v.clone() };
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    shown,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    log::info!(
        "  {} {}",
        "http.user_agent:".if_supports_color(Stdout, |t| t.cyan()),
        config.user_agent,
    );

    let missing = fields
        .iter()
        .filter(|(_, sourced, _)| sourced.source == ConfigSource::Missing)
        .count();
    if missing > 0 {
        log::info!("");
        log::info!(
            "Set the missing values with STEAM_API_KEY, STEAM_ID and GIANTBOMB_API_KEY, or in the config file."
        );
    }
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::Config(crate::config::ConfigError::NoConfigDir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_two_characters() {
        assert_eq!(mask_value("abcdef"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value(""), "****");
    }
}
