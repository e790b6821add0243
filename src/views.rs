// Merged read-model built from the loaded tables. Scored companies are the
// spine; company attributes join on via zero-padding-insensitive ids, with
// unmatched rows preserved null-filled rather than dropped.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::entities::{
    normalize_id, Building, Company, ExclusionConfig, ResearchScore, ScoredCompany,
};

/// One row of the rankings view: scoring fields plus whatever company
/// attributes the join could supply.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCompany {
    pub company_id: String,
    pub company_name: String,
    pub primary_naics: Option<String>,
    pub final_score: f64,
    pub naics_attractiveness_score: f64,
    pub company_opportunity_score: f64,
    pub scoring_path: String,
    pub is_customer: bool,
    pub channel_id: Option<String>,

    // Joined attributes; all None when the company record is missing
    pub hq_latitude: Option<f64>,
    pub hq_longitude: Option<f64>,
    pub hq_address: Option<String>,
    pub employees: Option<i64>,
    pub revenue: Option<f64>,
    pub building_count: Option<i64>,
    /// False when no companies.csv row matched (join warning case)
    pub matched: bool,
    /// True when a web-research row with research performed exists
    pub has_research: bool,

    /// 1-based rank within the NAICS segment, contiguous after exclusions
    pub segment_rank: i64,
    /// 1-based rank across all segments
    pub global_rank: i64,
}

/// Build the rankings view: apply NAICS exclusions, left-join company
/// attributes, and assign contiguous ranks.
pub fn build_ranked(
    scored: &[ScoredCompany],
    companies: &[Company],
    buildings: &[Building],
    research: &[ResearchScore],
    exclusions: &ExclusionConfig,
) -> Vec<RankedCompany> {
    let company_index: HashMap<&str, &Company> = companies
        .iter()
        .map(|c| (normalize_id(&c.company_id), c))
        .collect();

    let researched: HashSet<&str> = research
        .iter()
        .filter(|r| r.has_research())
        .map(|r| normalize_id(&r.company_id))
        .collect();

    // Fallback building counts for companies that do not carry their own
    let mut building_counts: HashMap<&str, i64> = HashMap::new();
    for building in buildings {
        *building_counts
            .entry(normalize_id(&building.company_id))
            .or_insert(0) += 1;
    }

    let mut rows: Vec<RankedCompany> = scored
        .iter()
        .filter(|s| {
            s.primary_naics
                .as_deref()
                .map_or(true, |naics| !exclusions.excludes(naics))
        })
        .map(|s| {
            let key = normalize_id(&s.company_id);
            let company = company_index.get(key).copied();
            RankedCompany {
                company_id: s.company_id.clone(),
                company_name: s.company_name.clone(),
                primary_naics: s.primary_naics.clone(),
                final_score: s.final_score,
                naics_attractiveness_score: s.naics_attractiveness_score,
                company_opportunity_score: s.company_opportunity_score,
                scoring_path: s.scoring_path.clone(),
                is_customer: s.is_customer,
                channel_id: s.channel_id.clone(),
                hq_latitude: company.and_then(|c| c.hq_latitude),
                hq_longitude: company.and_then(|c| c.hq_longitude),
                hq_address: company.and_then(|c| c.hq_address()),
                employees: company.and_then(|c| c.employees),
                revenue: company.and_then(|c| c.revenue),
                building_count: company
                    .and_then(|c| c.building_count)
                    .or_else(|| building_counts.get(key).copied()),
                matched: company.is_some(),
                has_research: researched.contains(key),
                segment_rank: 0,
                global_rank: 0,
            }
        })
        .collect();

    assign_ranks(&mut rows);
    rows
}

/// Sort by score descending (company_id breaks ties deterministically) and
/// assign contiguous 1-based ranks, globally and within each NAICS segment.
fn assign_ranks(rows: &mut [RankedCompany]) {
    rows.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.company_id.cmp(&b.company_id))
    });

    let mut segment_counters: HashMap<String, i64> = HashMap::new();
    for (i, row) in rows.iter_mut().enumerate() {
        row.global_rank = i as i64 + 1;
        let segment = row.primary_naics.clone().unwrap_or_default();
        let counter = segment_counters.entry(segment).or_insert(0);
        *counter += 1;
        row.segment_rank = *counter;
    }
}

/// Drop buildings whose company exists in no companies.csv row. Orphans
/// indicate an upstream pipeline issue; they are warned about at load and
/// excluded from map views rather than plotted against nothing.
pub fn filter_orphaned_buildings<'a>(
    buildings: &'a [Building],
    companies: &[Company],
) -> Vec<&'a Building> {
    let company_ids: HashSet<&str> = companies
        .iter()
        .map(|c| normalize_id(&c.company_id))
        .collect();

    buildings
        .iter()
        .filter(|b| company_ids.contains(normalize_id(&b.company_id)))
        .collect()
}

/// Find one scored company by id, zero-padding-insensitive.
pub fn find_ranked<'a>(rows: &'a [RankedCompany], id: &str) -> Option<&'a RankedCompany> {
    let wanted = normalize_id(id);
    rows.iter().find(|r| normalize_id(&r.company_id) == wanted)
}
