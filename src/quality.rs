// Quality Gate Validator
//
// Blocking and non-blocking checks applied to loaded tables before they are
// trusted for display. Gates are pure: the same table and schema always
// produce the same outcome. Expected violations never panic and never raise;
// they come back as ordered GateIssues with a severity.

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::entities::Building;
use crate::schema::TableSchema;

/// Critical scored-company fields must be at least this complete
pub const COMPLETENESS_THRESHOLD: f64 = 0.99;
/// Minimum share of buildings with usable coordinates
pub const COORDINATE_COVERAGE_THRESHOLD: f64 = 0.80;

const SAMPLE_LIMIT: usize = 5;

// ============================================================================
// GATE OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Table must not be served
    Blocking,
    /// Surfaced as an on-page banner, data still shown
    Warning,
    /// Informational only
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateIssue {
    pub severity: Severity,
    pub gate: String,
    pub message: String,
}

impl GateIssue {
    pub fn new(severity: Severity, gate: &str, message: impl Into<String>) -> Self {
        GateIssue {
            severity,
            gate: gate.to_string(),
            message: message.into(),
        }
    }

    pub fn blocking(gate: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Blocking, gate, message)
    }

    pub fn warning(gate: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, gate, message)
    }
}

/// Ordered result of running gates over one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateOutcome {
    pub issues: Vec<GateIssue>,
}

impl GateOutcome {
    pub fn valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == Severity::Blocking)
    }

    pub fn blocking_issues(&self) -> Vec<GateIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Blocking)
            .cloned()
            .collect()
    }

    pub fn warnings(&self) -> Vec<GateIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity != Severity::Blocking)
            .cloned()
            .collect()
    }

    pub fn merge(&mut self, other: GateOutcome) {
        self.issues.extend(other.issues);
    }

    pub fn summary(&self) -> String {
        let blocking = self.blocking_issues().len();
        format!(
            "{} issue(s), {} blocking",
            self.issues.len(),
            blocking
        )
    }
}

// ============================================================================
// SCHEMA GATES (raw records, before typed deserialization)
// ============================================================================

/// Validate one raw CSV table against its declarative schema: required
/// columns present, key cells non-empty, declared column types plausible.
pub fn validate_table(
    schema: &TableSchema,
    headers: &StringRecord,
    records: &[StringRecord],
) -> GateOutcome {
    let mut outcome = GateOutcome::default();

    // Gate: required columns present
    let found: Vec<&str> = headers.iter().collect();
    for column in schema.required_columns() {
        if !found.contains(&column) {
            outcome.issues.push(GateIssue::blocking(
                "required_columns",
                format!(
                    "{} missing required column '{}' (found: {})",
                    schema.file,
                    column,
                    found.join(", ")
                ),
            ));
        }
    }
    if !outcome.valid() {
        // No point type-checking rows against absent columns
        return outcome;
    }

    // Gate: primary key cells non-empty
    if let Some(key_idx) = column_index(headers, schema.key) {
        let mut empties = 0usize;
        for (row, record) in records.iter().enumerate() {
            if cell(record, key_idx).trim().is_empty() {
                empties += 1;
                if empties <= SAMPLE_LIMIT {
                    outcome.issues.push(GateIssue::blocking(
                        "key_present",
                        format!("{} row {}: empty {}", schema.file, row + 2, schema.key),
                    ));
                }
            }
        }
        if empties > SAMPLE_LIMIT {
            outcome.issues.push(GateIssue::blocking(
                "key_present",
                format!(
                    "{}: {} further rows with empty {}",
                    schema.file,
                    empties - SAMPLE_LIMIT,
                    schema.key
                ),
            ));
        }
    }

    // Gate: declared column types plausible
    for spec in schema.columns {
        let Some(idx) = column_index(headers, spec.name) else {
            continue;
        };
        let mut bad = 0usize;
        for (row, record) in records.iter().enumerate() {
            let raw = cell(record, idx);
            if !spec.ty.accepts(raw) {
                bad += 1;
                if bad <= SAMPLE_LIMIT {
                    let severity = if spec.required {
                        Severity::Blocking
                    } else {
                        Severity::Warning
                    };
                    outcome.issues.push(GateIssue::new(
                        severity,
                        "column_types",
                        format!(
                            "{} row {}: '{}' is not a valid {} for column {}",
                            schema.file,
                            row + 2,
                            raw,
                            spec.ty.name(),
                            spec.name
                        ),
                    ));
                }
            }
        }
    }

    outcome
}

/// Critical fields (the schema's required columns) must be ≥99% complete.
pub fn check_critical_completeness(
    schema: &TableSchema,
    headers: &StringRecord,
    records: &[StringRecord],
) -> GateOutcome {
    let mut outcome = GateOutcome::default();
    if records.is_empty() {
        return outcome;
    }

    for column in schema.required_columns() {
        let Some(idx) = column_index(headers, column) else {
            continue;
        };
        let filled = records
            .iter()
            .filter(|r| !cell(r, idx).trim().is_empty())
            .count();
        let completeness = filled as f64 / records.len() as f64;

        if completeness < COMPLETENESS_THRESHOLD {
            outcome.issues.push(GateIssue::blocking(
                "critical_completeness",
                format!(
                    "{}: critical field '{}' is only {:.1}% complete (required: >=99%)",
                    schema.file,
                    column,
                    completeness * 100.0
                ),
            ));
        }
    }

    outcome
}

/// Per-row NAICS presence. The code is optional so absence never blocks,
/// but each missing code is reported naming the row's key.
pub fn check_naics_presence(
    schema: &TableSchema,
    headers: &StringRecord,
    records: &[StringRecord],
) -> GateOutcome {
    let mut outcome = GateOutcome::default();

    let (Some(key_idx), Some(naics_idx)) = (
        column_index(headers, schema.key),
        column_index(headers, "primary_naics"),
    ) else {
        return outcome;
    };

    for record in records {
        if cell(record, naics_idx).trim().is_empty() {
            let key = cell(record, key_idx).trim();
            outcome.issues.push(GateIssue::warning(
                "naics_present",
                format!("{}: {} '{}' has no NAICS code", schema.file, schema.key, key),
            ));
        }
    }

    outcome
}

// ============================================================================
// CROSS-TABLE GATES (typed rows)
// ============================================================================

/// No duplicate primary keys.
pub fn check_unique_keys<'a>(
    file: &str,
    key_name: &str,
    ids: impl Iterator<Item = &'a str>,
) -> GateOutcome {
    let mut outcome = GateOutcome::default();
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();

    for id in ids {
        if !seen.insert(id) {
            duplicates.push(id);
        }
    }

    if !duplicates.is_empty() {
        let sample: Vec<&str> = duplicates.iter().take(SAMPLE_LIMIT).copied().collect();
        outcome.issues.push(GateIssue::blocking(
            "no_duplicates",
            format!(
                "{}: {} duplicate {} value(s). Sample: {}",
                file,
                duplicates.len(),
                key_name,
                sample.join(", ")
            ),
        ));
    }

    outcome
}

/// Referential integrity against a reference key set. Violations are soft:
/// unmatched rows are kept (null-filled in merged views), so this warns.
pub fn check_join_integrity<'a>(
    file: &str,
    reference_file: &str,
    ids: impl Iterator<Item = &'a str>,
    reference_ids: &std::collections::HashSet<&str>,
) -> GateOutcome {
    let mut outcome = GateOutcome::default();
    let orphans: Vec<&str> = ids.filter(|id| !reference_ids.contains(id)).collect();

    if !orphans.is_empty() {
        let sample: Vec<&str> = orphans.iter().take(SAMPLE_LIMIT).copied().collect();
        outcome.issues.push(GateIssue::warning(
            "join_integrity",
            format!(
                "{}: {} company_id(s) not found in {}. Sample: {}",
                file,
                orphans.len(),
                reference_file,
                sample.join(", ")
            ),
        ));
    }

    outcome
}

/// At least 80% of buildings should carry usable coordinates, otherwise the
/// heat map is too sparse to trust.
pub fn check_coordinate_coverage(buildings: &[Building]) -> GateOutcome {
    let mut outcome = GateOutcome::default();
    if buildings.is_empty() {
        return outcome;
    }

    let with_coords = buildings
        .iter()
        .filter(|b| b.latitude.is_some() && b.longitude.is_some())
        .count();
    let coverage = with_coords as f64 / buildings.len() as f64;

    if coverage < COORDINATE_COVERAGE_THRESHOLD {
        outcome.issues.push(GateIssue::warning(
            "coordinate_coverage",
            format!(
                "coordinate coverage is {:.1}% (threshold: >=80%); {} building(s) missing coordinates",
                coverage * 100.0,
                buildings.len() - with_coords
            ),
        ));
    }

    outcome
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn cell<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

// ============================================================================
// TESTS
// ============================================================================
