// Companies page: the filtered rankings table plus the heat map markers,
// sharing one payload so table and map always show the same universe.

use serde::Serialize;

use crate::components::{
    build_markers, format_count, format_revenue, score_band, Filters, MapMarker, ScoreBand,
    NO_RESULTS_MESSAGE,
};
use crate::error::LoadResult;
use crate::loader::{Availability, DataLoader};
use crate::quality::GateIssue;
use crate::views::{build_ranked, filter_orphaned_buildings, RankedCompany};

#[derive(Debug, Clone, Serialize)]
pub struct CompanyRow {
    #[serde(flatten)]
    pub ranked: RankedCompany,
    pub band: ScoreBand,
    /// Channel display name; raw id when channels.yaml has no entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub revenue_display: String,
    pub employees_display: String,
}

#[derive(Debug, Serialize)]
pub struct RankedCompaniesPage {
    pub rows: Vec<CompanyRow>,
    /// Rows matching the filters (before the page limit)
    pub matching: usize,
    /// Size of the unfiltered rankings
    pub total: usize,
    pub markers: Vec<MapMarker>,
    pub warnings: Vec<GateIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

pub fn build(loader: &DataLoader, filters: &Filters) -> LoadResult<RankedCompaniesPage> {
    let companies = loader.companies()?.into_required()?;
    let buildings = loader.buildings()?.into_required()?;
    let scored = loader.scored_companies()?.into_required()?;
    let exclusions = loader.exclusions();
    let channels = loader.channels();

    let research = loader.research_scores()?;
    let research_rows = match &research {
        Availability::Present(data) => data.rows.as_slice(),
        _ => &[],
    };

    let ranked = build_ranked(
        &scored.rows,
        &companies.rows,
        &buildings.rows,
        research_rows,
        &exclusions,
    );
    let filtered = filters.apply(&ranked);

    let rows: Vec<CompanyRow> = filtered
        .rows
        .iter()
        .map(|r| CompanyRow {
            ranked: (*r).clone(),
            band: score_band(r.final_score),
            channel: r
                .channel_id
                .as_deref()
                .map(|id| channels.label(id).to_string()),
            revenue_display: format_revenue(r.revenue),
            employees_display: format_count(r.employees),
        })
        .collect();

    // Orphaned buildings never plot; source/served filters narrow the map
    let markers = build_markers(
        filter_orphaned_buildings(&buildings.rows, &companies.rows)
            .into_iter()
            .filter(|b| filters.marker_matches(b)),
        &ranked,
    );

    let mut warnings: Vec<GateIssue> = Vec::new();
    warnings.extend(companies.warnings.iter().cloned());
    warnings.extend(buildings.warnings.iter().cloned());
    warnings.extend(scored.warnings.iter().cloned());

    let empty_message = if rows.is_empty() {
        Some(NO_RESULTS_MESSAGE.to_string())
    } else {
        None
    };

    Ok(RankedCompaniesPage {
        rows,
        matching: filtered.matching,
        total: filtered.total,
        markers,
        warnings,
        empty_message,
    })
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
            "company_id,name,primary_naics,hq_latitude,hq_longitude,revenue,employees\n\
             1,Acme,56172001,33.72,-117.83,12500000,250\n\
             2,Globex,23822001,34.05,-118.24,,\n",
        );
        write_file(
            dir.path(),
            "processed/buildings.csv",
            "building_id,company_id,latitude,longitude,source\n\
             b1,1,33.72,-117.83,hubspot\n\
             b2,2,34.05,-118.24,dataaxle\n\
             b3,2,,,dataaxle\n",
        );
        write_file(
            dir.path(),
            "scoring/scored_companies_final.csv",
            "company_id,company_name,primary_naics,final_score,naics_attractiveness_score,company_opportunity_score,rank,scoring_path,is_customer,channel_id\n\
             1,Acme,56172001,90.0,82.0,92.0,1,New Prospect,False,franchise_west\n\
             2,Globex,23822001,45.0,64.0,40.0,1,New Prospect,False,\n",
        );
        dir
    }

    #[test]
    fn test_page_combines_table_and_markers() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let page = build(&loader, &Filters::default()).unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.total, 2);
        // b3 has no coordinates
        assert_eq!(page.markers.len(), 2);
        assert!(page.empty_message.is_none());
    }

    #[test]
    fn test_display_fields_format_absent_as_na() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let page = build(&loader, &Filters::default()).unwrap();
        let acme = page.rows.iter().find(|r| r.ranked.company_id == "1").unwrap();
        assert_eq!(acme.revenue_display, "$12.5M");
        assert_eq!(acme.employees_display, "250");
        assert_eq!(acme.band, ScoreBand::High);

        let globex = page.rows.iter().find(|r| r.ranked.company_id == "2").unwrap();
        assert_eq!(globex.revenue_display, "N/A");
        assert_eq!(globex.band, ScoreBand::Low);
    }

    #[test]
    fn test_channel_label_falls_back_to_raw_id() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let page = build(&loader, &Filters::default()).unwrap();
        let acme = page.rows.iter().find(|r| r.ranked.company_id == "1").unwrap();
        // No channels.yaml: raw id shown
        assert_eq!(acme.channel.as_deref(), Some("franchise_west"));

        write_file(
            dir.path(),
            "config/channels.yaml",
            "channels:\n  - id: franchise_west\n    name: Franchise (West)\n",
        );
        let page = build(&loader, &Filters::default()).unwrap();
        let acme = page.rows.iter().find(|r| r.ranked.company_id == "1").unwrap();
        assert_eq!(acme.channel.as_deref(), Some("Franchise (West)"));
    }

    #[test]
    fn test_orphaned_buildings_never_plot() {
        let dir = data_dir();
        // b9's company exists in no companies.csv row
        write_file(
            dir.path(),
            "processed/buildings.csv",
            "building_id,company_id,latitude,longitude,source\n\
             b1,1,33.72,-117.83,hubspot\n\
             b9,999,33.99,-117.99,dataaxle\n",
        );
        let loader = DataLoader::new(dir.path());

        let page = build(&loader, &Filters::default()).unwrap();
        assert_eq!(page.markers.len(), 1);
        assert_eq!(page.markers[0].building_id, "b1");
    }

    #[test]
    fn test_marker_source_and_served_filters() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let hubspot_only = Filters {
            source: Some("hubspot".to_string()),
            ..Filters::default()
        };
        let page = build(&loader, &hubspot_only).unwrap();
        assert_eq!(page.markers.len(), 1);
        assert_eq!(page.markers[0].building_id, "b1");
        // Row table is unaffected by map-level filters
        assert_eq!(page.rows.len(), 2);

        let unserved_only = Filters {
            served: Some(false),
            ..Filters::default()
        };
        let page = build(&loader, &unserved_only).unwrap();
        assert_eq!(page.markers.len(), 1);
        assert_eq!(page.markers[0].building_id, "b2");
    }

    #[test]
    fn test_research_filter_uses_research_artifact() {
        let dir = data_dir();
        write_file(
            dir.path(),
            "scoring/company_icp_scores_with_research.csv",
            "company_id,company_name,had_web_research,icp_fit_score,confidence,reasoning,recommendation\n\
             1,Acme,True,87.0,0.9,Strong fit,Pursue\n",
        );
        let loader = DataLoader::new(dir.path());

        let researched = Filters {
            has_research: Some(true),
            ..Filters::default()
        };
        let page = build(&loader, &researched).unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].ranked.company_id, "1");
        assert!(page.rows[0].ranked.has_research);

        let unresearched = Filters {
            has_research: Some(false),
            ..Filters::default()
        };
        let page = build(&loader, &unresearched).unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].ranked.company_id, "2");
    }

    #[test]
    fn test_filtered_out_universe_reports_empty_message() {
        let dir = data_dir();
        let loader = DataLoader::new(dir.path());

        let filters = Filters {
            q: Some("no such company".to_string()),
            ..Filters::default()
        };
        let page = build(&loader, &filters).unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.matching, 0);
        assert_eq!(page.total, 2);
        assert_eq!(page.empty_message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }
}
