use std::io::Write;

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use flow_model::CurveRecord;

/// Writes the curves as a GeoJSON FeatureCollection: one LineString through each curve's three
/// points, with the volume attributes as feature properties.
pub fn write_geojson(curves: &[CurveRecord], path: &str) -> Result<()> {
    let collection = FeatureCollection {
        bbox: None,
        features: curves.iter().map(to_feature).collect(),
        foreign_members: None,
    };
    let mut file = fs_err::File::create(path)?;
    writeln!(file, "{}", GeoJson::from(collection))?;
    Ok(())
}

fn to_feature(curve: &CurveRecord) -> Feature {
    let coordinates = curve
        .geometry
        .points()
        .iter()
        .map(|pt| vec![pt.x(), pt.y()])
        .collect();

    let mut properties = serde_json::Map::new();
    // Passthrough attributes first; the well-known names win any collision.
    for (key, value) in &curve.extra {
        properties.insert(key.clone(), value.clone().into());
    }
    properties.insert("id".to_string(), curve.id.clone().into());
    properties.insert("intersection".to_string(), curve.intersection.0.clone().into());
    properties.insert("direction".to_string(), curve.direction.to_string().into());
    properties.insert("start_direction".to_string(), curve.start_branch.clone().into());
    properties.insert("cars".to_string(), curve.volume.into());
    properties.insert("max_cars_in_intersection".to_string(), curve.stats.max.into());
    properties.insert("min_cars_in_intersection".to_string(), curve.stats.min.into());
    properties.insert(
        "cars_intersection_normalized".to_string(),
        curve.stats.normalized.into(),
    );
    properties.insert("feat_length".to_string(), curve.length.inner_meters().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(coordinates))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
