use std::fs;
use std::path::Path;

use crate::errors::AppError;

/// Runtime configuration, environment-driven. Input file paths and the
/// resolver strategy are overridable; output filenames are fixed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub companies_file: String,
    pub news_sites_file: String,
    pub resolver: String,
    pub search_api_key: Option<String>,
    pub fetch_concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            companies_file: std::env::var("COMPANIES_FILE")
                .unwrap_or_else(|_| "companies.txt".to_string()),
            news_sites_file: std::env::var("NEWS_SITES_FILE")
                .unwrap_or_else(|_| "news_websites.txt".to_string()),
            resolver: std::env::var("NEWS_RESOLVER").unwrap_or_else(|_| "yahoo".to_string()),
            search_api_key: std::env::var("SEARCH_API_KEY").ok(),
            fetch_concurrency: std::env::var("FETCH_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(8),
        }
    }
}

/// Read a line-delimited list file: one value per line, trimmed, blank lines
/// skipped.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines_trims_and_skips_blanks() {
        let path = std::env::temp_dir().join("marketmood_read_lines_test.txt");
        fs::write(&path, "  Apple \n\nMSFT\n   \nTesla\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["Apple", "MSFT", "Tesla"]);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_lines_missing_file_is_io_error() {
        let result = read_lines("definitely/not/a/real/path.txt");
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
