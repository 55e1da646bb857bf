use std::collections::HashMap;

use tracing::debug;

/// Variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "COURIER_CONFIG";

/// Environment variables that fill config fields left unset by files.
pub const ENV_FALLBACKS: &[(&str, &str)] = &[
    ("COURIER_LOG_LEVEL", "logging.level"),
    ("COURIER_LOG_FORMAT", "logging.format"),
];

/// Snapshot the `COURIER_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("COURIER_"))
        .collect()
}

/// Apply [`ENV_FALLBACKS`] to `merged` for every field `overlay` does not set.
///
/// Returns the number of fields filled from the environment.
pub fn apply_env_fallbacks(
    merged: &mut toml::Value,
    overlay: Option<&toml::Value>,
    env_vars: &HashMap<String, String>,
) -> usize {
    let mut applied = 0_usize;

    for (var, path) in ENV_FALLBACKS {
        let Some(value) = env_vars.get(*var).filter(|v| !v.is_empty()) else {
            continue;
        };
        if overlay.is_some_and(|o| lookup(o, path).is_some()) {
            debug!(var, path, "config file sets field, ignoring env fallback");
            continue;
        }
        if set(merged, path, toml::Value::String(value.clone())) {
            applied = applied.saturating_add(1);
        }
    }

    applied
}

fn lookup<'a>(value: &'a toml::Value, path: &str) -> Option<&'a toml::Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

fn set(root: &mut toml::Value, path: &str, value: toml::Value) -> bool {
    let mut node = root;
    let mut keys = path.split('.').peekable();
    while let Some(key) = keys.next() {
        let Some(table) = node.as_table_mut() else {
            return false;
        };
        if keys.peek().is_none() {
            table.insert(key.to_owned(), value);
            return true;
        }
        node = table
            .entry(key)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
    false
}
