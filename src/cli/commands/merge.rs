//! Merge command implementation.

use crate::cli::Output;
use crate::record::{ExtractedRecord, RecordMerger};
use crate::store::{load_results, to_json, write_results};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the merge command.
///
/// Each saved business is folded back in as a single extraction, file by
/// file, so later files win field by field.
pub fn run_merge(inputs: &[String], output: Option<String>) -> Result<()> {
    let mut merger = RecordMerger::new();

    for input in inputs {
        let path = Path::new(input);
        let results =
            load_results(path).with_context(|| format!("Failed to load results from {}", input))?;

        Output::info(&format!("Loaded {} businesses from {}", results.len(), input));

        for (name, combined) in results {
            merger.absorb(&name, &ExtractedRecord::from(combined));
        }
    }

    let merged = merger.into_map();

    match output {
        Some(path) if path != "-" => {
            write_results(&merged, Path::new(&path))
                .with_context(|| format!("Failed to write {}", path))?;
            Output::success(&format!(
                "Merged {} files into {} ({} businesses)",
                inputs.len(),
                path,
                merged.len()
            ));
        }
        _ => {
            println!("{}", to_json(&merged)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CombinedMap, CompanyInfo};

    fn saved_file(dir: &Path, file: &str, sector: &str, extra_info: &str) -> String {
        let record = ExtractedRecord {
            business_name: "Acme".to_string(),
            company_info: CompanyInfo {
                sector: sector.to_string(),
                ..Default::default()
            },
            extra_info: extra_info.to_string(),
            ..Default::default()
        };
        let path = dir.join(file);
        write_results(&RecordMerger::merge(vec![("Acme".to_string(), record)]), &path).unwrap();
        path.to_string_lossy().to_string()
    }

    fn merged(inputs: &[String], out: &Path) -> CombinedMap {
        run_merge(inputs, Some(out.to_string_lossy().to_string())).unwrap();
        load_results(out).unwrap()
    }

    #[test]
    fn test_later_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = saved_file(dir.path(), "first.json", "Retail", "A");
        let second = saved_file(dir.path(), "second.json", "Tech", "B");

        let result = merged(&[first, second], &dir.path().join("out.json"));

        assert_eq!(result.len(), 1);
        let acme = &result["Acme"];
        assert_eq!(acme.company_info.sector, "Tech");
        assert_eq!(acme.extra_info, "A\nB");
        assert_eq!(acme.locations.len(), 1);
    }

    #[test]
    fn test_blank_fields_do_not_erase() {
        let dir = tempfile::tempdir().unwrap();
        let first = saved_file(dir.path(), "first.json", "Retail", "A");
        let second = saved_file(dir.path(), "second.json", "", "");

        let result = merged(&[first, second], &dir.path().join("out.json"));

        assert_eq!(result["Acme"].company_info.sector, "Retail");
        assert_eq!(result["Acme"].extra_info, "A");
    }

    #[test]
    fn test_single_file_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let input = saved_file(dir.path(), "input.json", "Retail", "A");
        let original = load_results(Path::new(&input)).unwrap();

        let result = merged(&[input], &dir.path().join("out.json"));

        assert_eq!(result, original);
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json").to_string_lossy().to_string();
        let out = dir.path().join("out.json").to_string_lossy().to_string();

        assert!(run_merge(&[missing], Some(out.clone())).is_err());
        assert!(!Path::new(&out).exists());
    }
}
