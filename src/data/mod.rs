use crate::club::{ClubRecord, GroundRole, RugbyCode, Sport};
use crate::map::MapRenderer;
use anyhow::Result;
use geojson::{Feature, GeoJson, Value};
use std::fs;
use std::path::Path;

/// Load club records from a GeoJSON FeatureCollection of Point features.
/// Properties use the data file's camelCase keys; anything missing is left
/// `None` and the record still loads. Features without usable coordinates
/// are skipped with a warning.
pub fn load_clubs(path: &Path) -> Result<Vec<ClubRecord>> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;

    let mut clubs = Vec::new();
    if let GeoJson::FeatureCollection(fc) = geojson {
        for feature in fc.features {
            match record_from_feature(&feature) {
                Some(record) => clubs.push(record),
                None => eprintln!(
                    "Warning: skipping club feature without point coordinates in {}",
                    path.display()
                ),
            }
        }
    }
    Ok(clubs)
}

fn record_from_feature(feature: &Feature) -> Option<ClubRecord> {
    let coords = match &feature.geometry {
        Some(geometry) => match &geometry.value {
            Value::Point(coords) if coords.len() >= 2 => (coords[0], coords[1]),
            _ => return None,
        },
        None => return None,
    };

    let prop = |key: &str| -> Option<String> {
        feature
            .properties
            .as_ref()
            .and_then(|p| p.get(key))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    };

    Some(ClubRecord {
        team_name: prop("name"),
        club: prop("club"),
        sport: prop("sport").as_deref().and_then(Sport::parse),
        code: prop("code").as_deref().and_then(RugbyCode::parse),
        tier: prop("tier"),
        lng: coords.0,
        lat: coords.1,
        ground_name: prop("ground"),
        // Absent or unrecognized role means primary
        ground_role: prop("groundRole")
            .as_deref()
            .and_then(GroundRole::parse)
            .unwrap_or_default(),
        country: prop("country"),
        region_name: prop("region"),
        region_code: prop("regionCode"),
        division: prop("division"),
        notes: prop("notes"),
        founded: prop("founded"),
        website: prop("website"),
        instagram: prop("instagram"),
        twitter: prop("twitter"),
        streaming: prop("streaming"),
        other_socials: prop("otherSocials"),
    })
}

/// Load the coastline basemap from any Natural Earth files present
pub fn load_basemap(renderer: &mut MapRenderer, data_dir: &Path) {
    let coastline_files = ["ne_10m_coastline.json", "ne_50m_coastline.json"];

    for filename in coastline_files {
        let path = data_dir.join(filename);
        if path.exists() {
            if let Err(e) = load_coastlines(renderer, &path) {
                eprintln!("Warning: Failed to load {}: {}", filename, e);
            }
            if renderer.has_basemap() {
                break;
            }
        }
    }
}

fn load_coastlines(renderer: &mut MapRenderer, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;
    process_geojson_lines(&geojson, |line| renderer.add_coastline(line));
    Ok(())
}

/// Extract line features from any GeoJSON shape
fn process_geojson_lines<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(Vec<(f64, f64)>),
{
    let mut handle_geometry = |geometry: &geojson::Geometry| match &geometry.value {
        Value::LineString(coords) => {
            add_line(coords.iter().map(|c| (c[0], c[1])).collect());
        }
        Value::MultiLineString(lines) => {
            for coords in lines {
                add_line(coords.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(exterior.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    add_line(exterior.iter().map(|c| (c[0], c[1])).collect());
                }
            }
        }
        _ => {}
    };

    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    handle_geometry(geometry);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                handle_geometry(geometry);
            }
        }
        GeoJson::Geometry(geometry) => handle_geometry(geometry),
    }
}

/// Coarse British Isles outline used when no coastline file is available
pub fn generate_fallback_basemap(renderer: &mut MapRenderer) {
    // Great Britain
    renderer.add_coastline(vec![
        (-5.7, 50.1), (-4.5, 50.3), (-3.5, 50.4), (-2.5, 50.6), (-1.3, 50.8),
        (0.3, 50.8), (1.4, 51.2), (1.6, 52.1), (0.5, 52.9), (0.2, 53.5),
        (-0.2, 54.1), (-1.2, 54.7), (-1.6, 55.3), (-2.0, 55.8), (-2.5, 56.3),
        (-2.1, 57.2), (-2.8, 57.7), (-4.0, 57.9), (-5.1, 58.6), (-5.8, 57.9),
        (-5.7, 57.0), (-6.0, 56.5), (-5.2, 56.0), (-4.8, 55.4), (-5.1, 54.9),
        (-4.0, 54.8), (-3.2, 54.2), (-3.0, 53.7), (-4.2, 53.3), (-4.6, 52.9),
        (-4.1, 52.5), (-4.9, 52.0), (-5.3, 51.7), (-4.2, 51.6), (-3.2, 51.4),
        (-4.4, 51.2), (-5.7, 50.1),
    ]);

    // Ireland
    renderer.add_coastline(vec![
        (-6.0, 52.2), (-6.4, 52.2), (-7.6, 51.8), (-9.5, 51.5), (-10.4, 51.9),
        (-9.8, 52.6), (-9.9, 53.2), (-10.1, 53.6), (-9.6, 54.3), (-8.5, 54.7),
        (-8.3, 55.2), (-7.2, 55.4), (-6.2, 55.2), (-5.5, 54.6), (-6.2, 54.0),
        (-6.1, 53.4), (-6.0, 52.2),
    ]);
}

/// Built-in seed clubs used when no data file is present, so the app
/// always starts with something on screen. Mirrors the shipped data set.
pub fn sample_clubs() -> Vec<ClubRecord> {
    fn seed(
        name: &str,
        sport: Sport,
        tier: &str,
        lat: f64,
        lng: f64,
        ground: &str,
        region: (&str, &str),
    ) -> ClubRecord {
        ClubRecord {
            team_name: Some(name.to_string()),
            sport: Some(sport),
            tier: Some(tier.to_string()),
            lat,
            lng,
            ground_name: Some(ground.to_string()),
            region_name: Some(region.0.to_string()),
            region_code: Some(region.1.to_string()),
            country: Some("England".to_string()),
            ..Default::default()
        }
    }

    vec![
        {
            let mut c = seed(
                "Arsenal Women",
                Sport::Football,
                "tier1",
                51.5549,
                -0.1084,
                "Emirates Stadium",
                ("North London", "LDN"),
            );
            c.club = Some("Arsenal".into());
            c.division = Some("WSL".into());
            c.founded = Some("1987".into());
            c.twitter = Some("@ArsenalWFC".into());
            c.streaming = Some("Arsenal.com".into());
            c
        },
        {
            // Secondary venue for the same club; must not double-count
            let mut c = seed(
                "Arsenal Women",
                Sport::Football,
                "tier1",
                51.6507,
                -0.2023,
                "Meadow Park",
                ("North London", "LDN"),
            );
            c.club = Some("Arsenal".into());
            c.division = Some("WSL".into());
            c.ground_role = GroundRole::Secondary;
            c
        },
        {
            let mut c = seed(
                "Bristol Bears Women",
                Sport::Rugby,
                "tier1",
                51.4861,
                -2.5833,
                "Ashton Gate",
                ("South West", "SW"),
            );
            c.code = Some(RugbyCode::Union);
            c.division = Some("Premiership Women's Rugby".into());
            c.founded = Some("2009".into());
            c.twitter = Some("@BristolBearsW".into());
            c.streaming = Some("Premiership Women's Rugby".into());
            c
        },
        {
            let mut c = seed(
                "Durham Women",
                Sport::Football,
                "tier2",
                54.7753,
                -1.5763,
                "Maiden Castle",
                ("North East", "NE"),
            );
            c.division = Some("Women's Championship".into());
            c.founded = Some("2014".into());
            c.twitter = Some("@DurhamWFC".into());
            c.streaming = Some("FA Player".into());
            c
        },
        {
            let mut c = seed(
                "York Valkyrie",
                Sport::Rugby,
                "tier1",
                53.9430,
                -1.0508,
                "York Community Stadium",
                ("Yorkshire", "YRK"),
            );
            c.code = Some(RugbyCode::League);
            c.division = Some("Women's Super League (RL)".into());
            c
        },
        {
            let mut c = seed(
                "Harlequins Women",
                Sport::Rugby,
                "tier1",
                51.4340,
                -0.3417,
                "Twickenham Stoop",
                ("South West London", "LDN"),
            );
            c.code = Some(RugbyCode::Union);
            c.division = Some("Premiership Women's Rugby".into());
            c
        },
        {
            let mut c = seed(
                "Manchester United Women",
                Sport::Football,
                "tier1",
                53.4838,
                -2.2006,
                "Leigh Sports Village",
                ("North West", "NW"),
            );
            c.division = Some("WSL".into());
            c.founded = Some("2018".into());
            c
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{is_visible, FilterState};
    use crate::stats::compute_stats;

    #[test]
    fn test_sample_clubs_have_coordinates_and_names() {
        for club in sample_clubs() {
            assert!(club.lat != 0.0 && club.lng != 0.0);
            assert!(club.identity_key().is_some());
        }
    }

    #[test]
    fn test_sample_clubs_dedupe_multi_venue() {
        let clubs = sample_clubs();
        let records = clubs.len();
        let stats = compute_stats(&clubs, is_visible, &FilterState::default());
        // Arsenal's two venues collapse to one club
        assert_eq!(stats.total, records - 1);
        assert_eq!(stats.total, stats.football + stats.rugby);
    }

    #[test]
    fn test_record_from_feature_reads_properties() {
        let json = r#"{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-1.5763, 54.7753] },
            "properties": {
                "name": "Durham Women",
                "sport": "football",
                "tier": "tier2",
                "ground": "Maiden Castle",
                "region": "North East",
                "regionCode": "NE",
                "groundRole": "secondary",
                "founded": "2014"
            }
        }"#;
        let GeoJson::Feature(feature) = json.parse::<GeoJson>().unwrap() else {
            panic!("expected a feature");
        };
        let record = record_from_feature(&feature).unwrap();

        assert_eq!(record.team_name.as_deref(), Some("Durham Women"));
        assert_eq!(record.sport, Some(Sport::Football));
        assert_eq!(record.tier.as_deref(), Some("tier2"));
        assert_eq!(record.ground_role, GroundRole::Secondary);
        assert_eq!(record.region_code.as_deref(), Some("NE"));
        assert!((record.lat - 54.7753).abs() < 1e-9);
        assert!((record.lng - -1.5763).abs() < 1e-9);
        // Fields the feature never set stay empty
        assert_eq!(record.code, None);
        assert_eq!(record.website, None);
    }

    #[test]
    fn test_record_from_feature_defaults() {
        let json = r#"{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 51.0] },
            "properties": {}
        }"#;
        let GeoJson::Feature(feature) = json.parse::<GeoJson>().unwrap() else {
            panic!("expected a feature");
        };
        let record = record_from_feature(&feature).unwrap();
        assert_eq!(record.ground_role, GroundRole::Primary);
        assert_eq!(record.identity_key(), None);
    }

    #[test]
    fn test_feature_without_point_is_skipped() {
        let json = r#"{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[0,0],[1,1]] },
            "properties": { "name": "Not a club" }
        }"#;
        let GeoJson::Feature(feature) = json.parse::<GeoJson>().unwrap() else {
            panic!("expected a feature");
        };
        assert!(record_from_feature(&feature).is_none());
    }

    #[test]
    fn test_fallback_basemap_loads() {
        let mut renderer = MapRenderer::new();
        generate_fallback_basemap(&mut renderer);
        assert!(renderer.has_basemap());
    }
}
