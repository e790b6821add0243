// Scored company record from scoring/scored_companies_final.csv
// (upstream dual-path scoring output)

use serde::{Deserialize, Serialize};

use super::{de_flexible_bool, de_lenient_int};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCompany {
    pub company_id: String,
    pub company_name: String,

    #[serde(default)]
    pub primary_naics: Option<String>,

    /// Blended 0-100 score produced upstream
    pub final_score: f64,
    pub naics_attractiveness_score: f64,
    pub company_opportunity_score: f64,

    /// Upstream rank; re-ranked per segment after exclusions are applied
    #[serde(deserialize_with = "de_lenient_int")]
    pub rank: i64,

    /// "Customer Expansion" or "New Prospect"
    pub scoring_path: String,

    #[serde(deserialize_with = "de_flexible_bool")]
    pub is_customer: bool,

    #[serde(default)]
    pub channel_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_pandas_shaped_row() {
        let csv = "company_id,company_name,primary_naics,final_score,naics_attractiveness_score,company_opportunity_score,rank,scoring_path,is_customer,channel_id\n\
                   0042,Acme,56172001,88.4,82.0,92.1,3.0,Customer Expansion,True,\n";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row: ScoredCompany = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(row.company_id, "0042");
        assert_eq!(row.rank, 3);
        assert!(row.is_customer);
        assert_eq!(row.channel_id, None);
    }
}
