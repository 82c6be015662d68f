//! Config command implementation.
//!
//! Manages CLI configuration settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_json, print_key_values, KeyValue, Notice};
use crate::settings::{ConfigKey, Settings};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

impl ConfigCommand {
    /// Whether the subcommand needs the current contents of the file.
    pub fn reads_settings(&self) -> bool {
        !matches!(
            self,
            Self::Path | Self::List | Self::Reset(ResetArgs { all: true, .. })
        )
    }
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_negative_numbers = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(&get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(&set_args, ctx),
        ConfigCommand::List => execute_list(ctx),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let settings = &ctx.settings;
    if ctx.format == OutputFormat::Json {
        return print_json(settings);
    }
    let rows: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), settings.get(*key)))
        .collect();
    print_key_values("Current Configuration", &rows, ctx.format, ctx.quiet)
}

/// Get a configuration value.
fn execute_get(args: &GetArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    let value = ctx.settings.get(key);

    match ctx.format {
        OutputFormat::Json => print_json(&json!({ "key": key.as_str(), "value": value })),
        OutputFormat::Minimal => {
            println!("{value}");
            Ok(())
        }
        format => print_key_values(
            "Configuration",
            &[KeyValue::new(key.as_str(), value)],
            format,
            ctx.quiet,
        ),
    }
}

/// Set a configuration value.
fn execute_set(args: &SetArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    let mut settings = ctx.settings.clone();
    settings.set(key, &args.value)?;
    settings.save(&ctx.config_path)?;

    tracing::info!(key = key.as_str(), value = %args.value, "configuration updated");
    Notice::Success.print(&format!("Set {} = {}", key.as_str(), settings.get(key)));
    Ok(())
}

/// List available configuration keys.
fn execute_list(ctx: &Context) -> Result<()> {
    let defaults = Settings::default();

    match ctx.format {
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": defaults.get(*key)
                    })
                })
                .collect();
            print_json(&output)
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
            Ok(())
        }
        format => {
            let rows: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), defaults.get(*key)),
                    )
                })
                .collect();
            print_key_values("Available Configuration Keys", &rows, format, ctx.quiet)
        }
    }
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    if args.all {
        Settings::default().save(&ctx.config_path)?;
        Notice::Success.print("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)?;
        let mut settings = ctx.settings.clone();
        settings.reset(key);
        settings.save(&ctx.config_path)?;
        Notice::Success.print(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            settings.get(key)
        ));
    } else {
        Notice::Warning.print("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = &ctx.config_path;
    if ctx.format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }
    let status = if path.exists() {
        "exists"
    } else {
        "not created yet (using defaults)"
    };
    let rows = [
        KeyValue::new("Config file", path.display().to_string()),
        KeyValue::new("Status", status),
    ];
    print_key_values("Configuration File", &rows, ctx.format, ctx.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_settings() {
        assert!(ConfigCommand::Show.reads_settings());
        assert!(!ConfigCommand::Path.reads_settings());
        assert!(!ConfigCommand::List.reads_settings());
        assert!(!ConfigCommand::Reset(ResetArgs { all: true, key: None }).reads_settings());
        assert!(ConfigCommand::Reset(ResetArgs {
            all: false,
            key: Some("precision".into())
        })
        .reads_settings());
    }
}
