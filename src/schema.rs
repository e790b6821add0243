// Declarative per-table schema descriptors
//
// Each CSV artifact gets an explicit ordered column contract (name, expected
// type, required flag) consumed by the quality gate validator. Nothing here
// is inferred from loaded data at runtime.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Boolean,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
        }
    }

    /// Check whether a raw CSV cell is a plausible value of this type.
    /// Empty cells are handled by the required flag, not here.
    pub fn accepts(&self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return true;
        }
        match self {
            ColumnType::Text => true,
            ColumnType::Integer => value.parse::<i64>().is_ok() || parse_float_integral(value),
            ColumnType::Float => value.parse::<f64>().is_ok(),
            ColumnType::Boolean => matches!(
                value.to_ascii_lowercase().as_str(),
                "true" | "false" | "1" | "0" | "yes" | "no"
            ),
        }
    }
}

// Upstream pandas writes integer columns as "3.0" when the column ever held
// a null; accept those as integral.
fn parse_float_integral(value: &str) -> bool {
    value
        .parse::<f64>()
        .map(|f| f.fract() == 0.0)
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub ty: ColumnType,
    pub required: bool,
}

const fn col(name: &'static str, ty: ColumnType, required: bool) -> ColumnSpec {
    ColumnSpec { name, ty, required }
}

/// Schema descriptor for one CSV artifact
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// File name used in diagnostics
    pub file: &'static str,
    /// Path relative to the data directory
    pub rel_path: &'static str,
    /// Primary key column
    pub key: &'static str,
    /// Whether the process may start without this file
    pub required_file: bool,
    pub columns: &'static [ColumnSpec],
}

impl TableSchema {
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().filter(|c| c.required).map(|c| c.name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// TABLE CONTRACTS
// ============================================================================

pub const COMPANIES: TableSchema = TableSchema {
    file: "companies.csv",
    rel_path: "processed/companies.csv",
    key: "company_id",
    required_file: true,
    columns: &[
        col("company_id", ColumnType::Text, true),
        col("name", ColumnType::Text, true),
        // NAICS is optional per row; a missing code degrades to a warning
        col("primary_naics", ColumnType::Text, false),
        col("hq_latitude", ColumnType::Float, true),
        col("hq_longitude", ColumnType::Float, true),
        col("address", ColumnType::Text, false),
        col("city", ColumnType::Text, false),
        col("state", ColumnType::Text, false),
        col("zip", ColumnType::Text, false),
        col("employees", ColumnType::Integer, false),
        col("revenue", ColumnType::Float, false),
        col("building_count", ColumnType::Integer, false),
    ],
};

pub const BUILDINGS: TableSchema = TableSchema {
    file: "buildings.csv",
    rel_path: "processed/buildings.csv",
    key: "building_id",
    required_file: true,
    columns: &[
        col("building_id", ColumnType::Text, true),
        col("company_id", ColumnType::Text, true),
        col("latitude", ColumnType::Float, true),
        col("longitude", ColumnType::Float, true),
        col("source", ColumnType::Text, false),
        col("is_served", ColumnType::Boolean, false),
        col("square_footage", ColumnType::Integer, false),
    ],
};

/// Enhanced building set merged with the CRM source; preferred over
/// buildings.csv when present. Same column contract.
pub const GOLDEN_BUILDINGS: TableSchema = TableSchema {
    file: "golden_buildings.csv",
    rel_path: "processed/golden_buildings.csv",
    key: "building_id",
    required_file: false,
    columns: BUILDINGS.columns,
};

pub const SCORED_COMPANIES: TableSchema = TableSchema {
    file: "scored_companies_final.csv",
    rel_path: "scoring/scored_companies_final.csv",
    key: "company_id",
    required_file: true,
    columns: &[
        col("company_id", ColumnType::Text, true),
        col("company_name", ColumnType::Text, true),
        col("primary_naics", ColumnType::Text, false),
        col("final_score", ColumnType::Float, true),
        col("naics_attractiveness_score", ColumnType::Float, true),
        col("company_opportunity_score", ColumnType::Float, true),
        col("rank", ColumnType::Integer, true),
        col("scoring_path", ColumnType::Text, true),
        col("is_customer", ColumnType::Boolean, true),
        col("channel_id", ColumnType::Text, false),
    ],
};

pub const NAICS_FIT_SCORES: TableSchema = TableSchema {
    file: "naics_icp_fit_scores.csv",
    rel_path: "scoring/naics_icp_fit_scores.csv",
    key: "naics_code",
    required_file: false,
    columns: &[
        col("naics_code", ColumnType::Text, true),
        col("industry_name", ColumnType::Text, false),
        col("icp_fit_score", ColumnType::Float, true),
        col("justification", ColumnType::Text, false),
    ],
};

pub const RESEARCH_SCORES: TableSchema = TableSchema {
    file: "company_icp_scores_with_research.csv",
    rel_path: "scoring/company_icp_scores_with_research.csv",
    key: "company_id",
    required_file: false,
    columns: &[
        col("company_id", ColumnType::Text, true),
        col("company_name", ColumnType::Text, false),
        col("had_web_research", ColumnType::Boolean, false),
        col("icp_fit_score", ColumnType::Float, false),
        col("confidence", ColumnType::Float, false),
        col("reasoning", ColumnType::Text, false),
        col("recommendation", ColumnType::Text, false),
    ],
};

// YAML configuration artifacts (no column contract, just locations)
pub const EXCLUSIONS_FILE: &str = "exclusions.yaml";
pub const EXCLUSIONS_REL_PATH: &str = "config/exclusions.yaml";
pub const CHANNELS_FILE: &str = "channels.yaml";
pub const CHANNELS_REL_PATH: &str = "config/channels.yaml";
