// Error taxonomy for the data loading boundary
//
// Fatal conditions (missing/unreadable required files, blocking gate
// failures) surface as LoadError. Non-fatal quality findings ride on the
// loaded table as warnings and never cross the loader boundary as errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::quality::GateIssue;

/// Result type for loader operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Errors raised by the data loader
#[derive(Debug, Error)]
pub enum LoadError {
    /// Required file missing from the data directory. The process must not
    /// serve pages without it.
    #[error("required file not found: {file} (expected at {path})")]
    MissingRequired { file: &'static str, path: PathBuf },

    /// File exists but cannot be parsed at all
    #[error("failed to parse {file} at {path}: {source}")]
    Malformed {
        file: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Read failure that persisted after one retry
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blocking quality gate failure on a required table
    #[error("quality gate failed for {file}: {}", format_issues(.issues))]
    Gate {
        file: &'static str,
        issues: Vec<GateIssue>,
    },

    /// Data directory itself is missing or not a directory
    #[error("data directory not found: {path} (set PROSPECT_DATA_DIR or ensure ./data exists)")]
    DataDirMissing { path: PathBuf },
}

fn format_issues(issues: &[GateIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::{GateIssue, Severity};

    #[test]
    fn test_missing_required_names_file_and_path() {
        let err = LoadError::MissingRequired {
            file: "scored_companies_final.csv",
            path: PathBuf::from("/data/scoring/scored_companies_final.csv"),
        };

        let msg = err.to_string();
        assert!(msg.contains("scored_companies_final.csv"));
        assert!(msg.contains("/data/scoring"));
    }

    #[test]
    fn test_gate_error_joins_issue_messages() {
        let err = LoadError::Gate {
            file: "companies.csv",
            issues: vec![
                GateIssue::blocking("required_columns", "missing column: company_id"),
                GateIssue::new(Severity::Warning, "naics_present", "row 3: no NAICS"),
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("missing column: company_id"));
        assert!(msg.contains("row 3: no NAICS"));
    }
}
