//! `tabula tables` - list discovered tables.

use std::path::PathBuf;
use std::sync::Arc;

use tabula_core::{ApplicationEnvironment, StaticApplicationEnvironment, TableDescriptor};
use tabula_runtime::{ModuleManifest, ProcessingSourceRegistry};

use crate::discovery::manifest_source;
use crate::theme::Theme;

/// Bind every manifest into a registry, skipping ones that fail.
fn build_registry(manifests: Vec<(ModuleManifest, PathBuf)>) -> ProcessingSourceRegistry {
    let environment: Arc<dyn ApplicationEnvironment> =
        Arc::new(StaticApplicationEnvironment::new("tabula"));
    let mut registry = ProcessingSourceRegistry::new();
    for (manifest, path) in manifests {
        let source = Arc::new(manifest_source(manifest));
        if let Err(e) = registry.register(source, Arc::clone(&environment)) {
            eprintln!(
                "{}",
                Theme::warning(&format!("Skipping {}: {e}", path.display()))
            );
        }
    }
    registry
}

pub(crate) fn list_tables(
    manifests: Vec<(ModuleManifest, PathBuf)>,
    json: bool,
) -> anyhow::Result<()> {
    let registry = build_registry(manifests);
    let tables = registry.all_tables();

    if json {
        let rows: Vec<_> = tables
            .iter()
            .map(|(source, table)| serde_json::json!({ "source": source, "table": table }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if tables.is_empty() {
        println!("{}", Theme::info("No tables discovered"));
        return Ok(());
    }

    println!("{}", Theme::header("Discovered Tables"));
    println!(
        "  {:<16} {:<24} {:<10} {:<16} {}",
        "SOURCE", "NAME", "KIND", "CATEGORY", "ID"
    );
    println!("{}", Theme::separator());
    for (source, table) in &tables {
        println!(
            "  {:<16} {:<24} {} {:<16} {}{}",
            source,
            table.name(),
            Theme::kind(table.kind(), 10),
            table.category(),
            table.id(),
            extension_note(table),
        );
    }
    println!();
    println!(
        "{}",
        Theme::dimmed(&format!(
            "{} table(s) from {} source(s)",
            tables.len(),
            registry.len()
        ))
    );
    Ok(())
}

fn extension_note(table: &TableDescriptor) -> String {
    if table.requires_extensions() {
        format!(" {}", Theme::dimmed("(extensions)"))
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(name: &str, guid: &str) -> ModuleManifest {
        ModuleManifest::from_toml_str(&format!(
            "[module]\nname = \"{name}\"\n\n[[table]]\ntype_name = \"T\"\nguid = \"{guid}\"\nname = \"T\"\n"
        ))
        .unwrap()
    }

    #[test]
    fn test_registry_skips_modules_that_fail_to_bind() {
        let guid = "00000000-0000-0000-0000-000000000001";
        let mut broken = manifest("broken", guid);
        let duplicate = broken.tables[0].clone();
        broken.tables.push(duplicate);

        let registry = build_registry(vec![
            (manifest("good", guid), PathBuf::from("good/Tables.toml")),
            (broken, PathBuf::from("broken/Tables.toml")),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all_tables().len(), 1);
    }

    #[test]
    fn test_same_module_name_registers_once() {
        let registry = build_registry(vec![
            (
                manifest("twin", "00000000-0000-0000-0000-000000000001"),
                PathBuf::from("a/Tables.toml"),
            ),
            (
                manifest("twin", "00000000-0000-0000-0000-000000000002"),
                PathBuf::from("b/Tables.toml"),
            ),
        ]);
        assert_eq!(registry.len(), 1);
    }
}
