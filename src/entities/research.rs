// Company web-research scoring from scoring/company_icp_scores_with_research.csv
// (optional artifact; pages hide the research section when absent)

use serde::{Deserialize, Serialize};

use super::{de_opt_flexible_bool, normalize_id};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchScore {
    pub company_id: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "de_opt_flexible_bool")]
    pub had_web_research: Option<bool>,

    #[serde(default)]
    pub icp_fit_score: Option<f64>,

    /// 0-1 confidence in the research-backed assessment
    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl ResearchScore {
    pub fn matches_id(&self, other: &str) -> bool {
        normalize_id(&self.company_id) == normalize_id(other)
    }

    pub fn has_research(&self) -> bool {
        self.had_web_research.unwrap_or(false)
    }
}
