//! Subcommand implementations

use crate::Format;
use anyhow::{Context, Result};
use lumen_theme::config::CONFIG_FILE;
use lumen_theme::{
    check_wcag_compliance, HealthStatus, LumenConfig, ReducedMotion, ThemeEngine, TokenOverrides,
    ValidationStatus,
};
use std::path::Path;
use std::process::ExitCode;

/// Load the given config, or `lumen.toml` from the working directory, or defaults
pub fn load_config(path: Option<&Path>) -> Result<LumenConfig> {
    match path {
        Some(path) => LumenConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None if Path::new(CONFIG_FILE).is_file() => {
            LumenConfig::load_from_path(Path::new(CONFIG_FILE))
                .with_context(|| format!("Failed to load {CONFIG_FILE}"))
        }
        None => {
            tracing::debug!("no {} found, using defaults", CONFIG_FILE);
            Ok(LumenConfig::default())
        }
    }
}

pub fn build_engine(config: &LumenConfig) -> Result<ThemeEngine> {
    ThemeEngine::from_config(config).context("Failed to build theme engine")
}

/// Parse a `category.token=value` argument
pub fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn overrides(assignments: &[(String, String)]) -> Result<TokenOverrides> {
    let mut overrides = TokenOverrides::default();
    for (key, value) in assignments {
        overrides
            .set_path(key, value)
            .with_context(|| format!("Invalid override {key}={value}"))?;
    }
    Ok(overrides)
}

pub fn list(engine: &ThemeEngine) -> Result<ExitCode> {
    println!("Themes:");
    for variant in engine.variants() {
        match engine.theme_config(&variant) {
            Some(config) if !config.extends.is_empty() => {
                println!("  {variant} (extends {})", config.extends.join(", "));
            }
            _ => println!("  {variant}"),
        }
    }

    let plugins = engine.plugin_statuses();
    if !plugins.is_empty() {
        println!("Plugins:");
        for status in plugins {
            println!("  {} {} [{}]", status.id, status.version, status.state);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn show(
    engine: &ThemeEngine,
    variant: &str,
    assignments: &[(String, String)],
    reduced_motion: bool,
    format: Format,
) -> Result<ExitCode> {
    if reduced_motion {
        engine
            .register_plugin(ReducedMotion::new())
            .await
            .context("Failed to enable reduced motion")?;
    }

    let overrides = overrides(assignments)?;
    let theme = engine
        .create_theme(variant, &overrides)
        .with_context(|| format!("Failed to create theme '{variant}'"))?;
    let variables = theme.css_variables();

    let output = match format {
        Format::Json => serde_json::to_string_pretty(&variables)?,
        Format::Toml => toml::to_string_pretty(&variables)?,
    };
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

pub fn validate(
    engine: &ThemeEngine,
    variant: &str,
    assignments: &[(String, String)],
) -> Result<ExitCode> {
    let overrides = overrides(assignments)?;
    let report = engine
        .validate(variant, &overrides)
        .with_context(|| format!("Failed to validate theme '{variant}'"))?;

    let status = match report.status {
        ValidationStatus::Pass => "pass",
        ValidationStatus::Warn => "warn",
        ValidationStatus::Fail => "fail",
    };
    println!("{}: {status} (score {})", report.theme, report.score);
    for (label, issues) in [
        ("error", &report.errors),
        ("warning", &report.warnings),
        ("info", &report.info),
    ] {
        for issue in issues {
            println!("  {label}: {issue}");
        }
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn contrast(foreground: &str, background: &str) -> Result<ExitCode> {
    let report = check_wcag_compliance(foreground, background)?;
    println!("{:.2}:1 {}", report.ratio, report.level);
    Ok(ExitCode::SUCCESS)
}

pub fn health(engine: &ThemeEngine) -> Result<ExitCode> {
    for variant in engine.variants() {
        if let Err(err) = engine.theme(&variant) {
            tracing::warn!(%variant, error = %err, "theme creation failed");
        }
    }

    let report = engine.health();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.status == HealthStatus::Unhealthy {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_assignment("colors.primary=#ff0066").unwrap(),
            ("colors.primary".to_string(), "#ff0066".to_string())
        );
        // only the first '=' splits
        assert_eq!(
            parse_assignment("easings.standard=a=b").unwrap().1,
            "a=b"
        );
        assert!(parse_assignment("colors.primary").is_err());
        assert!(parse_assignment("=red").is_err());
    }

    #[test]
    fn overrides_reject_unknown_tokens() {
        let assignments = vec![("colors.nope".to_string(), "#fff".to_string())];
        assert!(overrides(&assignments).is_err());

        let assignments = vec![("spacing.4".to_string(), "18".to_string())];
        assert!(!overrides(&assignments).unwrap().is_empty());
    }

    #[test]
    fn default_config_builds_an_engine_with_builtins() {
        let engine = build_engine(&LumenConfig::default()).unwrap();
        assert!(engine.variants().iter().any(|v| v == "light"));
    }
}
