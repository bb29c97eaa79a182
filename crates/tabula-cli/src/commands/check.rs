//! `tabula check` - validate manifests.

use std::path::PathBuf;

use tabula_core::ProcessingError;
use tabula_runtime::{ModuleManifest, ScannedTable, TableCatalog, TableScanner};

use crate::discovery::descriptor_module;
use crate::theme::Theme;

/// Resolve each manifest's catalog on its own. Fails if any module
/// declares the same table identity twice.
pub(crate) fn check_manifests(manifests: &[(ModuleManifest, PathBuf)]) -> anyhow::Result<()> {
    if manifests.is_empty() {
        println!("{}", Theme::info("No manifests found"));
        return Ok(());
    }

    let scanner = TableScanner::new();
    let mut failures: usize = 0;
    for (manifest, path) in manifests {
        let name = &manifest.module.name;
        let module = descriptor_module(manifest.clone());
        let candidates = scanner
            .scan(&module)
            .into_iter()
            .map(ScannedTable::into_descriptor)
            .collect();

        match TableCatalog::resolve(name, candidates) {
            Ok(catalog) => {
                println!(
                    "{}",
                    Theme::success(&format!("{name}: {} table(s)", catalog.len()))
                );
            },
            Err(ProcessingError::DuplicateTables { ids, .. }) => {
                failures = failures.saturating_add(1);
                println!(
                    "{}",
                    Theme::error(&format!("{name}: duplicate table identities"))
                );
                for id in ids {
                    println!("    {id}");
                }
            },
            Err(e) => {
                failures = failures.saturating_add(1);
                println!("{}", Theme::error(&format!("{name}: {e}")));
            },
        }
        println!("    {}", Theme::dimmed(&path.display().to_string()));
    }

    if failures > 0 {
        anyhow::bail!("{failures} manifest(s) failed validation");
    }
    Ok(())
}
