//! Renderers and masking helpers for CLI commands.

use anyhow::anyhow;
use csuite_env::{EnvMap, mask_sensitive_value, vars};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

pub(crate) fn render_env_map(env: &EnvMap, all: bool, format: OutputFormat) -> CliResult<()> {
    let view = masked_view(env, all);
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&view)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => {
            println!("{:<40} VALUE", "KEY");
            for (key, value) in &view {
                println!("{key:<40} {value}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_export_lines(env: &EnvMap) {
    for line in export_lines(env) {
        println!("{line}");
    }
}

/// Managed slice of a resolved mapping, with sensitive values masked.
/// With `all` set, the whole mapping is included (still masked).
pub(crate) fn masked_view(env: &EnvMap, all: bool) -> EnvMap {
    env.iter()
        .filter(|(key, _)| all || vars::MANAGED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            let rendered = if vars::SENSITIVE_KEYS.contains(&key.as_str()) {
                mask_sensitive_value(value)
            } else {
                value.clone()
            };
            (key.clone(), rendered)
        })
        .collect()
}

/// `KEY=VALUE` lines for the managed variables present in the mapping,
/// unmasked, in emission order. Suitable for dotenv or `eval` use.
pub(crate) fn export_lines(env: &EnvMap) -> Vec<String> {
    vars::MANAGED_KEYS
        .iter()
        .filter_map(|key| env.get(*key).map(|value| format!("{key}={value}")))
        .collect()
}
