// Company record from processed/companies.csv (upstream data collection output)

use serde::{Deserialize, Serialize};

use super::de_opt_lenient_int;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    pub name: String,

    /// NAICS industry code; missing codes degrade to a quality warning
    #[serde(default)]
    pub primary_naics: Option<String>,

    #[serde(default)]
    pub hq_latitude: Option<f64>,
    #[serde(default)]
    pub hq_longitude: Option<f64>,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,

    #[serde(default, deserialize_with = "de_opt_lenient_int")]
    pub employees: Option<i64>,
    #[serde(default)]
    pub revenue: Option<f64>,

    /// Some upstream versions emit building_count_estimate instead; the
    /// loader normalizes that alias into this field.
    #[serde(default, deserialize_with = "de_opt_lenient_int")]
    pub building_count: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_lenient_int")]
    pub building_count_estimate: Option<i64>,
}

impl Company {
    /// Fold the building_count_estimate alias into building_count.
    pub fn normalize(&mut self) {
        if self.building_count.is_none() {
            self.building_count = self.building_count_estimate.take();
        }
    }

    /// One-line headquarters address for display, skipping absent parts
    pub fn hq_address(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.address.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
