// NAICS rankings page: one row per industry segment, combining the fit
// scores file (when generated) with aggregates over the scored universe.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::components::{absent_section_message, format_score};
use crate::loader::{Availability, DataLoader};
use crate::error::LoadResult;
use crate::quality::GateIssue;
use crate::views::{build_ranked, RankedCompany};

#[derive(Debug, Clone, Serialize)]
pub struct NaicsSegment {
    pub naics_code: String,
    /// Absent when the fit scores file is missing or lacks this code
    pub industry_name: Option<String>,
    pub icp_fit_score: Option<f64>,
    /// One-decimal rendering, "N/A" when no fit score exists
    pub icp_fit_display: String,
    pub justification: Option<String>,
    pub company_count: usize,
    pub customer_count: usize,
    pub avg_final_score: f64,
    pub top_company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NaicsRankingsPage {
    pub segments: Vec<NaicsSegment>,
    pub fit_scores_available: bool,
    /// Degraded-section copy shown when fit scores are absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub warnings: Vec<GateIssue>,
}

pub fn build(loader: &DataLoader) -> LoadResult<NaicsRankingsPage> {
    let companies = loader.companies()?.into_required()?;
    let buildings = loader.buildings()?.into_required()?;
    let scored = loader.scored_companies()?.into_required()?;
    let exclusions = loader.exclusions();

    // Research status does not feed segment aggregates
    let ranked = build_ranked(&scored.rows, &companies.rows, &buildings.rows, &[], &exclusions);

    let mut warnings: Vec<GateIssue> = Vec::new();
    warnings.extend(scored.warnings.iter().cloned());

    let fit = loader.naics_fit_scores()?;
    let (fit_rows, placeholder) = match &fit {
        Availability::Present(data) => {
            warnings.extend(data.warnings.iter().cloned());
            (data.rows.as_slice(), None)
        }
        Availability::AbsentOptional { file } | Availability::AbsentRequired { file, .. } => {
            (&[][..], Some(absent_section_message(file)))
        }
    };

    let mut segments = aggregate_segments(&ranked);
    for segment in segments.iter_mut() {
        if let Some(fit_row) = fit_rows.iter().find(|f| f.naics_code == segment.naics_code) {
            segment.industry_name = fit_row.industry_name.clone();
            segment.icp_fit_score = Some(fit_row.icp_fit_score);
            segment.justification = fit_row.justification.clone();
        }
        segment.icp_fit_display = format_score(segment.icp_fit_score);
    }

    // Scored fit first (descending), unscored segments trail by avg score
    segments.sort_by(|a, b| match (a.icp_fit_score, b.icp_fit_score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b
            .avg_final_score
            .partial_cmp(&a.avg_final_score)
            .unwrap_or(std::cmp::Ordering::Equal),
    });

    Ok(NaicsRankingsPage {
        segments,
        fit_scores_available: fit.is_present(),
        placeholder,
        warnings,
    })
}

fn aggregate_segments(ranked: &[RankedCompany]) -> Vec<NaicsSegment> {
    let mut by_naics: BTreeMap<&str, Vec<&RankedCompany>> = BTreeMap::new();
    for row in ranked {
        if let Some(naics) = row.primary_naics.as_deref() {
            by_naics.entry(naics).or_default().push(row);
        }
    }

    by_naics
        .into_iter()
        .map(|(naics, rows)| {
            let total: f64 = rows.iter().map(|r| r.final_score).sum();
            let top = rows
                .iter()
                .min_by_key(|r| r.segment_rank)
                .map(|r| r.company_name.clone());
            NaicsSegment {
                naics_code: naics.to_string(),
                industry_name: None,
                icp_fit_score: None,
                icp_fit_display: format_score(None),
                justification: None,
                company_count: rows.len(),
                customer_count: rows.iter().filter(|r| r.is_customer).count(),
                avg_final_score: total / rows.len() as f64,
                top_company: top,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_file(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn data_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "processed/companies.csv",
            "company_id,name,primary_naics,hq_latitude,hq_longitude\n\
             1,Acme,56172001,33.72,-117.83\n\
             2,Globex,23822001,34.05,-118.24\n\
             3,Initech,56172001,33.64,-117.74\n",
        );
        write_file(
            dir.path(),
            "processed/buildings.csv",
            "building_id,company_id,latitude,longitude\nb1,1,33.72,-117.83\n",
        );
        write_file(
            dir.path(),
            "scoring/scored_companies_final.csv",
            "company_id,company_name,primary_naics,final_score,naics_attractiveness_score,company_opportunity_score,rank,scoring_path,is_customer\n\
             1,Acme,56172001,90.0,82.0,92.0,1,New Prospect,False\n\
             2,Globex,23822001,70.0,64.0,73.0,1,New Prospect,False\n\
             3,Initech,56172001,60.0,82.0,50.0,2,Customer Expansion,True\n",
        );
        dir
    }

    #[test]
    fn test_segments_aggregate_scored_rows() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let page = build(&loader).unwrap();
        assert_eq!(page.segments.len(), 2);

        let janitorial = page
            .segments
            .iter()
            .find(|s| s.naics_code == "56172001")
            .unwrap();
        assert_eq!(janitorial.company_count, 2);
        assert_eq!(janitorial.customer_count, 1);
        assert!((janitorial.avg_final_score - 75.0).abs() < 1e-9);
        assert_eq!(janitorial.top_company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_absent_fit_scores_yields_placeholder() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let page = build(&loader).unwrap();
        assert!(!page.fit_scores_available);
        assert!(page
            .placeholder
            .as_deref()
            .unwrap()
            .contains("naics_icp_fit_scores.csv"));
        assert!(page.segments.iter().all(|s| s.icp_fit_score.is_none()));
        assert!(page.segments.iter().all(|s| s.icp_fit_display == "N/A"));
    }

    #[test]
    fn test_fit_scores_join_and_order_segments() {
        let dir = data_dir();
        write_file(
            dir.path(),
            "scoring/naics_icp_fit_scores.csv",
            "naics_code,industry_name,icp_fit_score,justification\n\
             23822001,Plumbing and HVAC,95.0,Strong overlap\n\
             56172001,Janitorial Services,60.0,Adjacent\n",
        );
        let loader = DataLoader::new(dir.path());

        let page = build(&loader).unwrap();
        assert!(page.fit_scores_available);
        assert!(page.placeholder.is_none());
        assert_eq!(page.segments[0].naics_code, "23822001");
        assert_eq!(
            page.segments[0].industry_name.as_deref(),
            Some("Plumbing and HVAC")
        );
        assert_eq!(page.segments[0].icp_fit_display, "95.0");
        assert_eq!(page.segments[1].icp_fit_score, Some(60.0));
    }
}
