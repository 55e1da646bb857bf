//! Config commands.

use anyhow::Result;
use colored::Colorize;
use courier_config::ResolvedConfig;

/// Print the resolved configuration as TOML.
pub(crate) fn show_config(resolved: &ResolvedConfig) -> Result<()> {
    print!("{}", resolved.config.to_toml_string()?);
    Ok(())
}

/// Print which config files were merged over the defaults.
pub(crate) fn show_paths(resolved: &ResolvedConfig) {
    if resolved.loaded_files.is_empty() {
        println!("{}", "No config files loaded (using defaults)".dimmed());
        return;
    }
    for path in &resolved.loaded_files {
        println!("  {} {path}", "loaded".green());
    }
}
