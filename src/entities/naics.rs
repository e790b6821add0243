// Industry-level ICP fit score from scoring/naics_icp_fit_scores.csv
// (optional artifact; its absence degrades the rankings page)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaicsFitScore {
    pub naics_code: String,

    #[serde(default)]
    pub industry_name: Option<String>,

    /// 0-100 fit against the ideal customer profile
    pub icp_fit_score: f64,

    /// Upstream-generated justification text
    #[serde(default)]
    pub justification: Option<String>,
}

impl NaicsFitScore {
    pub fn display_name(&self) -> &str {
        self.industry_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.naics_code)
    }
}
