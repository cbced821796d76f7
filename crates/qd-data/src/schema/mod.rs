//! Mapping from GeoJSON features to quakes
//!
//! Expected feature shape:
//!
//! ```json
//! {
//!   "type": "Feature",
//!   "id": "us7000abcd",
//!   "properties": { "mag": 4.7, "place": "12 km SSE of Sylhet, Bangladesh", "time": 1615118400000, "felt": 12 },
//!   "geometry": { "type": "Point", "coordinates": [91.93, 24.77, 10.0] }
//! }
//! ```
//!
//! `id`, `properties.time`, `properties.place` and point coordinates are
//! required; `mag`, `felt` and depth are optional.

use ahash::AHashSet;
use geojson::feature::Id;
use geojson::{Feature, GeoJson, Value};
use tracing::debug;

use qd_core::{Dataset, GeoCoord, Quake};

use crate::DataError;

/// Parse a feature collection into a dataset sorted most recent first
pub fn parse_feature_collection(text: &str) -> Result<Dataset, DataError> {
    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) => return Err(DataError::NotFeatureCollection("Feature")),
        GeoJson::Geometry(_) => return Err(DataError::NotFeatureCollection("Geometry")),
    };

    let mut seen = AHashSet::with_capacity(collection.features.len());
    let mut quakes = Vec::with_capacity(collection.features.len());

    for (idx, feature) in collection.features.iter().enumerate() {
        let quake = convert(feature, idx)?;
        if !seen.insert(quake.id.clone()) {
            return Err(DataError::DuplicateId(quake.id));
        }
        quakes.push(quake);
    }

    debug!("Parsed {} features", quakes.len());
    Ok(Dataset::new(quakes))
}

/// Map a single feature to a quake
pub fn quake_from_feature(feature: &Feature) -> Result<Quake, DataError> {
    convert(feature, 0)
}

fn convert(feature: &Feature, idx: usize) -> Result<Quake, DataError> {
    let missing = |field: &'static str| DataError::MissingField {
        feature: feature_label(feature, idx),
        field,
    };

    let id = match &feature.id {
        Some(Id::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Id::Number(n)) => n.to_string(),
        _ => return Err(missing("id")),
    };

    let time_ms = feature
        .property("time")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64)))
        .ok_or_else(|| missing("properties.time"))?;

    let place = feature
        .property("place")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("properties.place"))?;

    let magnitude = feature.property("mag").and_then(|v| v.as_f64());
    let felt = feature
        .property("felt")
        .and_then(|v| v.as_u64())
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX));

    let geometry = feature.geometry.as_ref().ok_or_else(|| missing("geometry"))?;
    let (coord, depth_km) = point_coordinates(&geometry.value).map_err(|reason| {
        DataError::InvalidGeometry {
            feature: id.clone(),
            reason,
        }
    })?;

    let mut quake = Quake::new(id, time_ms, magnitude, place, coord);
    quake.felt = felt;
    quake.depth_km = depth_km;
    Ok(quake)
}

/// Longitude-first GeoJSON position to a coordinate plus optional depth
fn point_coordinates(value: &Value) -> Result<(GeoCoord, Option<f64>), String> {
    let position = match value {
        Value::Point(position) => position,
        other => return Err(format!("expected Point, found {}", geometry_name(other))),
    };

    let (lon, lat) = match position.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => return Err(format!("point has {} coordinates", position.len())),
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinates out of range: [{}, {}]", lon, lat));
    }

    Ok((GeoCoord::from_lon_lat(lon, lat), position.get(2).copied()))
}

fn geometry_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn feature_label(feature: &Feature, idx: usize) -> String {
    match &feature.id {
        Some(Id::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Id::Number(n)) => n.to_string(),
        _ => format!("#{}", idx),
    }
}
