//! Persistence of merged analysis results as JSON files.

use crate::error::Result;
use crate::record::CombinedMap;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name prefix for saved analyses.
pub const RESULT_PREFIX: &str = "business_analysis_";

/// Save results to a new timestamped file inside `dir`, creating it if needed.
pub fn save_results(results: &CombinedMap, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}{}.json", RESULT_PREFIX, timestamp));
    write_results(results, &path)?;
    Ok(path)
}

/// Write results as pretty-printed JSON to `path`.
pub fn write_results(results: &CombinedMap, path: &Path) -> Result<()> {
    let json = to_json(results)?;
    std::fs::write(path, json)?;
    debug!("Wrote {} businesses to {}", results.len(), path.display());
    Ok(())
}

/// Render results as pretty-printed JSON.
pub fn to_json(results: &CombinedMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Load results previously written by [`save_results`] or [`write_results`].
pub fn load_results(path: &Path) -> Result<CombinedMap> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
