use std::env;
use std::fs;
use std::path::Path;

use shopcart_core::config::{resolve_config_path, LoadOptions};
use toml::Value;

use crate::commands::{load_config, CommandResult};

/// Plain-text report of the effective config on success; JSON error envelope on failure.
pub fn run(options: LoadOptions) -> CommandResult {
    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let config = match load_config("config", options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let catalog_path = config
        .catalog
        .path
        .as_deref()
        .map(display_path)
        .unwrap_or_else(|| "<unset>".to_string());

    let report = [
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "catalog.path",
            &catalog_path,
            source("catalog.path", &["SHOPCART_CATALOG_PATH"]),
        ),
        render_line(
            "cart.state_path",
            &display_path(&config.cart.state_path),
            source("cart.state_path", &["SHOPCART_CART_STATE_PATH"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", &["SHOPCART_LOGGING_LEVEL", "SHOPCART_LOG_LEVEL"]),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format).to_ascii_lowercase(),
            source("logging.format", &["SHOPCART_LOGGING_FORMAT", "SHOPCART_LOG_FORMAT"]),
        ),
    ]
    .join("\n");

    CommandResult { exit_code: 0, output: report }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(display_path)
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
