use std::fs;
use std::path::Path;

use crate::errors::AppError;
use crate::models::ResultSet;

pub const RESULTS_FILE: &str = "results.json";
pub const SUMMARY_FILE: &str = "summary.txt";

/// Write the structured report: an insertion-ordered JSON object mapping
/// company key to `{avg_score, news}`, pretty-printed with 2-space indent.
/// Companies with no scored articles appear without an `avg_score` field.
pub fn write_results_json(results: &ResultSet, path: impl AsRef<Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the human-readable report: one line per company,
/// `"{key}: {avg:.2}"`, with `n/a` for companies that produced no scores.
pub fn write_summary_txt(results: &ResultSet, path: impl AsRef<Path>) -> Result<(), AppError> {
    let mut out = String::new();
    for (key, company) in results {
        match company.avg_score {
            Some(avg) => out.push_str(&format!("{key}: {avg:.2}\n")),
            None => out.push_str(&format!("{key}: n/a\n")),
        }
    }
    fs::write(path, out)?;
    Ok(())
}

/// Read a structured report back, restoring each company's key from its map
/// position.
pub fn read_results_json(path: impl AsRef<Path>) -> Result<ResultSet, AppError> {
    let raw = fs::read_to_string(path)?;
    let mut parsed: ResultSet = serde_json::from_str(&raw)?;
    for (key, company) in parsed.iter_mut() {
        company.key = key.clone();
    }
    Ok(parsed)
}
