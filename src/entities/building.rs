// Building record from processed/golden_buildings.csv (preferred) or
// processed/buildings.csv (fallback without served status)

use serde::{Deserialize, Serialize};

use super::{de_opt_flexible_bool, de_opt_lenient_int, normalize_id};

/// Where a building row originated upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingSource {
    DataAxle,
    HubSpot,
    Manual,
}

impl BuildingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingSource::DataAxle => "dataaxle",
            BuildingSource::HubSpot => "hubspot",
            BuildingSource::Manual => "manual",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dataaxle" => Some(BuildingSource::DataAxle),
            "hubspot" => Some(BuildingSource::HubSpot),
            "manual" => Some(BuildingSource::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub building_id: String,
    pub company_id: String,

    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Absent in plain buildings.csv; normalized to dataaxle on load
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default, deserialize_with = "de_opt_flexible_bool")]
    pub is_served: Option<bool>,

    #[serde(default, deserialize_with = "de_opt_lenient_int")]
    pub square_footage: Option<i64>,
}

impl Building {
    /// Fill source and served status the way the merged golden set defines
    /// them: missing source means dataaxle, and served status derives from
    /// source when the column is absent (manual/hubspot rows are served).
    pub fn normalize(&mut self) {
        if self
            .source
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
        {
            self.source = Some(BuildingSource::DataAxle.as_str().to_string());
        }

        if self.is_served.is_none() {
            let served = matches!(
                self.parsed_source(),
                Some(BuildingSource::Manual) | Some(BuildingSource::HubSpot)
            );
            self.is_served = Some(served);
        }
    }

    pub fn parsed_source(&self) -> Option<BuildingSource> {
        self.source.as_deref().and_then(BuildingSource::parse)
    }

    pub fn served(&self) -> bool {
        self.is_served.unwrap_or(false)
    }

    pub fn matches_company(&self, company_id: &str) -> bool {
        normalize_id(&self.company_id) == normalize_id(company_id)
    }
}
