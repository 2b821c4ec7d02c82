use crate::domain::model::ImportSummary;
use crate::utils::error::Result;
use std::path::Path;

/// Write `summary` as pretty-printed JSON, creating parent directories.
pub fn write_report(path: &Path, summary: &ImportSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    tracing::debug!("Import report written to {}", path.display());
    Ok(())
}
