// Map marker assembly for the heat map. Buildings without usable
// coordinates are skipped here; overall coverage is gated at load time.

use serde::Serialize;

use crate::components::score_display::{score_band, ScoreBand};
use crate::entities::{normalize_id, Building};
use crate::views::RankedCompany;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Building already served (golden dataset / manual / hubspot origin)
    Served,
    /// Prospect building from the scored universe
    Prospect,
}

/// One plottable building
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub building_id: String,
    pub company_id: String,
    pub company_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: MarkerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<ScoreBand>,
}

fn usable_coordinates(building: &Building) -> Option<(f64, f64)> {
    let (lat, lon) = (building.latitude?, building.longitude?);
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) && (lat, lon) != (0.0, 0.0)
    {
        Some((lat, lon))
    } else {
        None
    }
}

/// Produce markers for every building with usable coordinates, attaching
/// score and name when the owning company is in the rankings.
pub fn build_markers<'a, I>(buildings: I, ranked: &[RankedCompany]) -> Vec<MapMarker>
where
    I: IntoIterator<Item = &'a Building>,
{
    let scores: std::collections::HashMap<&str, &RankedCompany> = ranked
        .iter()
        .map(|r| (normalize_id(&r.company_id), r))
        .collect();

    buildings
        .into_iter()
        .filter_map(|building| {
            let (latitude, longitude) = usable_coordinates(building)?;
            let ranked_row = scores.get(normalize_id(&building.company_id)).copied();
            Some(MapMarker {
                building_id: building.building_id.clone(),
                company_id: building.company_id.clone(),
                company_name: ranked_row.map(|r| r.company_name.clone()),
                latitude,
                longitude,
                kind: if building.served() {
                    MarkerKind::Served
                } else {
                    MarkerKind::Prospect
                },
                final_score: ranked_row.map(|r| r.final_score),
                band: ranked_row.map(|r| score_band(r.final_score)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(id: &str, company_id: &str, lat: Option<f64>, lon: Option<f64>) -> Building {
        Building {
            building_id: id.to_string(),
            company_id: company_id.to_string(),
            latitude: lat,
            longitude: lon,
            source: Some("dataaxle".to_string()),
            is_served: Some(false),
            square_footage: None,
        }
    }

    fn ranked(id: &str, score: f64) -> RankedCompany {
        RankedCompany {
            company_id: id.to_string(),
            company_name: format!("Company {id}"),
            primary_naics: Some("56172001".to_string()),
            final_score: score,
            naics_attractiveness_score: score,
            company_opportunity_score: score,
            scoring_path: "New Prospect".to_string(),
            is_customer: false,
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

    #[test]
    fn test_skips_buildings_without_coordinates() {
        let buildings = vec![
            building("b1", "1", Some(33.7), Some(-117.8)),
            building("b2", "1", None, Some(-117.8)),
            building("b3", "1", Some(33.7), None),
        ];

        let markers = build_markers(&buildings, &[]);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].building_id, "b1");
    }

    #[test]
    fn test_rejects_out_of_range_and_null_island() {
        let buildings = vec![
            building("b1", "1", Some(91.0), Some(0.0)),
            building("b2", "1", Some(0.0), Some(0.0)),
            building("b3", "1", Some(33.7), Some(-181.0)),
        ];

        assert!(build_markers(&buildings, &[]).is_empty());
    }

    #[test]
    fn test_served_buildings_get_served_kind() {
        let mut served = building("b1", "1", Some(33.7), Some(-117.8));
        served.is_served = Some(true);
        let prospect = building("b2", "1", Some(33.8), Some(-117.9));

        let markers = build_markers(&[served, prospect], &[]);
        assert_eq!(markers[0].kind, MarkerKind::Served);
        assert_eq!(markers[1].kind, MarkerKind::Prospect);
    }

    #[test]
    fn test_scores_attach_by_normalized_id() {
        let buildings = vec![building("b1", "007526346", Some(33.7), Some(-117.8))];
        let rankings = vec![ranked("7526346", 88.4)];

        let markers = build_markers(&buildings, &rankings);
        assert_eq!(markers[0].final_score, Some(88.4));
        assert_eq!(markers[0].band, Some(ScoreBand::High));
        assert_eq!(markers[0].company_name.as_deref(), Some("Company 7526346"));
    }

    #[test]
    fn test_marker_serializes_with_lowercase_kind() {
        let buildings = vec![building("b1", "1", Some(33.7), Some(-117.8))];
        let markers = build_markers(&buildings, &[ranked("1", 40.0)]);

        let json = serde_json::to_value(&markers[0]).unwrap();
        assert_eq!(json["kind"], "prospect");
        assert_eq!(json["band"], "low");
        assert_eq!(json["latitude"], 33.7);
    }

    #[test]
    fn test_unranked_building_still_plots_without_score() {
        let buildings = vec![building("b1", "42", Some(33.7), Some(-117.8))];

        let markers = build_markers(&buildings, &[]);
        assert_eq!(markers.len(), 1);
        assert!(markers[0].final_score.is_none());
        assert!(markers[0].company_name.is_none());
    }
}
