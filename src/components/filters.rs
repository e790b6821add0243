// Query-string filters shared by the rankings and companies pages.
// All filters are optional; an empty query means the full table.

use std::collections::HashMap;

use serde::Deserialize;

use crate::entities::Building;
use crate::views::RankedCompany;

const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring match on company name
    #[serde(default)]
    pub q: Option<String>,
    /// Exact NAICS segment
    #[serde(default)]
    pub naics: Option<String>,
    /// Exact scoring path ("New Prospect" / "Customer Expansion")
    #[serde(default)]
    pub scoring_path: Option<String>,
    /// Exact sales channel id
    #[serde(default)]
    pub channel: Option<String>,
    /// True keeps researched companies, false keeps unresearched ones
    #[serde(default)]
    pub has_research: Option<bool>,
    /// Restrict to current customers
    #[serde(default)]
    pub customers_only: Option<bool>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,

    /// Building source for the map ("dataaxle" / "hubspot" / "manual")
    #[serde(default)]
    pub source: Option<String>,
    /// True keeps served buildings on the map, false keeps unserved ones
    #[serde(default)]
    pub served: Option<bool>,
}

/// A filtered slice of the rankings plus the "showing X of Y" counts.
#[derive(Debug)]
pub struct FilteredRows<'a> {
    pub rows: Vec<&'a RankedCompany>,
    /// Rows that matched the filters before the limit was applied
    pub matching: usize,
    /// Size of the unfiltered table
    pub total: usize,
}

impl Filters {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Filters {
            q: non_empty(params.get("q")),
            naics: non_empty(params.get("naics")),
            scoring_path: non_empty(params.get("scoring_path")),
            channel: non_empty(params.get("channel")),
            has_research: params.get("has_research").and_then(|v| parse_bool(v)),
            customers_only: params.get("customers_only").map(|v| v == "true" || v == "1"),
            min_score: params.get("min_score").and_then(|v| v.parse().ok()),
            limit: params.get("limit").and_then(|v| v.parse().ok()),
            source: non_empty(params.get("source")).map(|v| v.to_lowercase()),
            served: params.get("served").and_then(|v| parse_bool(v)),
        }
    }

    pub fn matches(&self, row: &RankedCompany) -> bool {
        if let Some(q) = &self.q {
            if !row.company_name.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        if let Some(naics) = &self.naics {
            if row.primary_naics.as_deref() != Some(naics.as_str()) {
                return false;
            }
        }
        if let Some(path) = &self.scoring_path {
            if !row.scoring_path.eq_ignore_ascii_case(path) {
                return false;
            }
        }
        if let Some(channel) = &self.channel {
            if row.channel_id.as_deref() != Some(channel.as_str()) {
                return false;
            }
        }
        if let Some(wanted) = self.has_research {
            if row.has_research != wanted {
                return false;
            }
        }
        if self.customers_only == Some(true) && !row.is_customer {
            return false;
        }
        if let Some(min) = self.min_score {
            if row.final_score < min {
                return false;
            }
        }
        true
    }

    /// Map-level filter over building markers: source and served status.
    pub fn marker_matches(&self, building: &Building) -> bool {
        if let Some(source) = &self.source {
            if building.source.as_deref().map(str::to_lowercase).as_deref()
                != Some(source.as_str())
            {
                return false;
            }
        }
        if let Some(served) = self.served {
            if building.served() != served {
                return false;
            }
        }
        true
    }

    /// Apply filters to the full ranked table, preserving rank order.
    pub fn apply<'a>(&self, rows: &'a [RankedCompany]) -> FilteredRows<'a> {
        let matching: Vec<&RankedCompany> = rows.iter().filter(|r| self.matches(r)).collect();
        let matched = matching.len();
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        FilteredRows {
            rows: matching.into_iter().take(limit).collect(),
            matching: matched,
            total: rows.len(),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, naics: &str, score: f64, customer: bool) -> RankedCompany {
        RankedCompany {
            company_id: name.to_lowercase(),
            company_name: name.to_string(),
            primary_naics: Some(naics.to_string()),
            final_score: score,
            naics_attractiveness_score: score,
            company_opportunity_score: score,
            scoring_path: if customer {
                "Customer Expansion".to_string()
            } else {
                "New Prospect".to_string()
            },
            is_customer: customer,
            channel_id: None,
            hq_latitude: None,
            hq_longitude: None,
            hq_address: None,
            employees: None,
            revenue: None,
            building_count: None,
            matched: true,
            has_research: false,
            segment_rank: 1,
            global_rank: 1,
        }
    }

    fn sample_rows() -> Vec<RankedCompany> {
        let mut acme = row("Acme Janitorial", "56172001", 90.0, false);
        acme.channel_id = Some("franchise_west".to_string());
        acme.has_research = true;
        vec![
            acme,
            row("Globex Facilities", "23822001", 70.0, true),
            row("Initech Services", "56172001", 55.0, false),
        ]
    }

    #[test]
    fn test_empty_filters_return_everything() {
        let rows = sample_rows();
        let filtered = Filters::default().apply(&rows);

        assert_eq!(filtered.rows.len(), 3);
        assert_eq!(filtered.matching, 3);
        assert_eq!(filtered.total, 3);
    }

    #[test]
    fn test_name_search_is_case_insensitive() {
        let rows = sample_rows();
        let filters = Filters {
            q: Some("globex".to_string()),
            ..Filters::default()
        };

        let filtered = filters.apply(&rows);
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].company_name, "Globex Facilities");
    }

    #[test]
    fn test_filters_combine_with_and() {
        let rows = sample_rows();
        let filters = Filters {
            naics: Some("56172001".to_string()),
            min_score: Some(60.0),
            ..Filters::default()
        };

        let filtered = filters.apply(&rows);
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].company_name, "Acme Janitorial");
        assert_eq!(filtered.matching, 1);
        assert_eq!(filtered.total, 3);
    }

    #[test]
    fn test_customers_only() {
        let rows = sample_rows();
        let filters = Filters {
            customers_only: Some(true),
            ..Filters::default()
        };

        let filtered = filters.apply(&rows);
        assert_eq!(filtered.rows.len(), 1);
        assert!(filtered.rows[0].is_customer);
    }

    #[test]
    fn test_channel_filter() {
        let rows = sample_rows();
        let filters = Filters {
            channel: Some("franchise_west".to_string()),
            ..Filters::default()
        };

        let filtered = filters.apply(&rows);
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].company_name, "Acme Janitorial");
    }

    #[test]
    fn test_research_filter_both_directions() {
        let rows = sample_rows();

        let researched = Filters {
            has_research: Some(true),
            ..Filters::default()
        }
        .apply(&rows);
        assert_eq!(researched.rows.len(), 1);
        assert_eq!(researched.rows[0].company_name, "Acme Janitorial");

        let unresearched = Filters {
            has_research: Some(false),
            ..Filters::default()
        }
        .apply(&rows);
        assert_eq!(unresearched.rows.len(), 2);
    }

    #[test]
    fn test_marker_filters_source_and_served() {
        let building = |source: &str, served: bool| Building {
            building_id: "b1".to_string(),
            company_id: "1".to_string(),
            latitude: Some(33.7),
            longitude: Some(-117.8),
            source: Some(source.to_string()),
            is_served: Some(served),
            square_footage: None,
        };

        let by_source = Filters {
            source: Some("manual".to_string()),
            ..Filters::default()
        };
        assert!(by_source.marker_matches(&building("manual", true)));
        assert!(by_source.marker_matches(&building("Manual", true)));
        assert!(!by_source.marker_matches(&building("dataaxle", true)));

        let unserved_only = Filters {
            served: Some(false),
            ..Filters::default()
        };
        assert!(unserved_only.marker_matches(&building("dataaxle", false)));
        assert!(!unserved_only.marker_matches(&building("hubspot", true)));

        assert!(Filters::default().marker_matches(&building("dataaxle", false)));
    }

    #[test]
    fn test_limit_caps_rows_but_not_counts() {
        let rows = sample_rows();
        let filters = Filters {
            limit: Some(2),
            ..Filters::default()
        };

        let filtered = filters.apply(&rows);
        assert_eq!(filtered.rows.len(), 2);
        assert_eq!(filtered.matching, 3);
    }

    #[test]
    fn test_from_query_ignores_blank_params() {
        let mut params = HashMap::new();
        params.insert("q".to_string(), "  ".to_string());
        params.insert("min_score".to_string(), "60".to_string());
        params.insert("customers_only".to_string(), "1".to_string());
        params.insert("source".to_string(), "DataAxle".to_string());
        params.insert("has_research".to_string(), "false".to_string());
        params.insert("served".to_string(), "maybe".to_string());

        let filters = Filters::from_query(&params);
        assert!(filters.q.is_none());
        assert_eq!(filters.min_score, Some(60.0));
        assert_eq!(filters.customers_only, Some(true));
        assert_eq!(filters.source.as_deref(), Some("dataaxle"));
        assert_eq!(filters.has_research, Some(false));
        // Unparseable tri-state values fall back to no filter
        assert_eq!(filters.served, None);
    }
}
