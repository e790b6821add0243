// Company detail page: one scored company with its joined attributes,
// building footprint, and the web-research section when that artifact
// has been generated.

use serde::Serialize;

use crate::components::absent_section_message;
use crate::entities::{Building, ResearchScore};
use crate::error::LoadResult;
use crate::loader::{Availability, DataLoader};
use crate::views::{build_ranked, find_ranked, RankedCompany};

#[derive(Debug, Clone, Serialize)]
pub struct DetailBuilding {
    pub building_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source: Option<String>,
    pub served: bool,
    pub square_footage: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResearchSection {
    pub had_web_research: bool,
    pub icp_fit_score: Option<f64>,
    pub confidence: Option<f64>,
    pub reasoning: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanyDetailPage {
    #[serde(flatten)]
    pub company: RankedCompany,
    pub buildings: Vec<DetailBuilding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchSection>,
    pub research_available: bool,
    /// Degraded-section copy when the research artifact is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_placeholder: Option<String>,
}

/// Look up one company by id (zero-padding-insensitive). None means no
/// scored company with that id exists.
pub fn build(loader: &DataLoader, id: &str) -> LoadResult<Option<CompanyDetailPage>> {
    let companies = loader.companies()?.into_required()?;
    let buildings = loader.buildings()?.into_required()?;
    let scored = loader.scored_companies()?.into_required()?;
    let exclusions = loader.exclusions();

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
    let Some(company) = find_ranked(&ranked, id).cloned() else {
        return Ok(None);
    };

    let detail_buildings: Vec<DetailBuilding> = buildings
        .rows
        .iter()
        .filter(|b| b.matches_company(&company.company_id))
        .map(to_detail_building)
        .collect();

    let (section, placeholder) = match &research {
        Availability::Present(data) => (
            data.rows
                .iter()
                .find(|r| r.matches_id(&company.company_id))
                .map(to_research_section),
            None,
        ),
        Availability::AbsentOptional { file } | Availability::AbsentRequired { file, .. } => {
            (None, Some(absent_section_message(file)))
        }
    };

    Ok(Some(CompanyDetailPage {
        company,
        buildings: detail_buildings,
        research: section,
        research_available: research.is_present(),
        research_placeholder: placeholder,
    }))
}

fn to_detail_building(building: &Building) -> DetailBuilding {
    DetailBuilding {
        building_id: building.building_id.clone(),
        latitude: building.latitude,
        longitude: building.longitude,
        source: building.source.clone(),
        served: building.served(),
        square_footage: building.square_footage,
    }
}

fn to_research_section(score: &ResearchScore) -> ResearchSection {
    ResearchSection {
        had_web_research: score.has_research(),
        icp_fit_score: score.icp_fit_score,
        confidence: score.confidence,
        reasoning: score.reasoning.clone(),
        recommendation: score.recommendation.clone(),
    }
}
