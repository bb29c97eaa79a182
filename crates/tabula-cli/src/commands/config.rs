//! `tabula config` - show the resolved configuration.

use tabula_config::ResolvedConfig;

use crate::theme::Theme;

pub(crate) fn show_config(resolved: &ResolvedConfig) -> anyhow::Result<()> {
    if resolved.loaded_files.is_empty() {
        println!("{}", Theme::dimmed("# No config files found, showing defaults"));
    }
    for file in &resolved.loaded_files {
        println!(
            "{}",
            Theme::dimmed(&format!("# Loaded from {}", file.display()))
        );
    }
    print!("{}", resolved.to_toml()?);
    Ok(())
}
