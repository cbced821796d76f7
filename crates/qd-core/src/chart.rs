//! Year aggregation behind the timeline chart

use std::collections::BTreeMap;

use crate::quake::{GeoCoord, Quake};

/// Lower bound of the magnitude axis
pub const MAGNITUDE_AXIS_MIN: f64 = 2.0;

/// Upper bound of the magnitude axis
pub const MAGNITUDE_AXIS_MAX: f64 = 10.0;

/// Width of a year column, in years
pub const COLUMN_WIDTH: f64 = 0.7;

/// Count and strongest magnitude for one calendar year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearBucket {
    pub year: i32,
    pub count: usize,
    pub max_magnitude: f64,
}

/// Per-year series, ascending by year, without gap filling
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearSeries {
    buckets: Vec<YearBucket>,
}

impl YearSeries {
    pub fn from_quakes(quakes: &[Quake]) -> Self {
        let mut by_year: BTreeMap<i32, YearBucket> = BTreeMap::new();

        for quake in quakes {
            let year = quake.year();
            let magnitude = quake.magnitude_or_zero();
            let bucket = by_year.entry(year).or_insert(YearBucket {
                year,
                count: 0,
                max_magnitude: magnitude,
            });
            bucket.count += 1;
            bucket.max_magnitude = bucket.max_magnitude.max(magnitude);
        }

        Self {
            buckets: by_year.into_values().collect(),
        }
    }

    pub fn buckets(&self) -> &[YearBucket] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.buckets.iter().map(|b| b.year)
    }

    pub fn bucket(&self, year: i32) -> Option<&YearBucket> {
        self.buckets
            .binary_search_by_key(&year, |b| b.year)
            .ok()
            .map(|idx| &self.buckets[idx])
    }

    /// Largest yearly count, at least 1 so the count axis never collapses
    pub fn count_ceiling(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1)
    }

    /// Year of the count column under a chart coordinate, if any
    pub fn column_at(&self, x: f64, y: f64) -> Option<i32> {
        let year = x.round() as i32;
        let bucket = self.bucket(year)?;
        let inside_x = (x - year as f64).abs() <= COLUMN_WIDTH / 2.0;
        let inside_y = y >= 0.0 && y <= bucket.count as f64;
        (inside_x && inside_y).then_some(year)
    }

    /// Tooltip for the magnitude point nearest to chart x
    ///
    /// Reads the bucket rather than the plotted position, which is clamped
    /// to the axis range.
    pub fn magnitude_tooltip_at(&self, x: f64) -> Option<String> {
        self.bucket(x.round() as i32)
            .map(|bucket| magnitude_tooltip(bucket.max_magnitude))
    }
}

/// Maps magnitudes onto the count axis so both series share one plot
///
/// The magnitude axis spans [`MAGNITUDE_AXIS_MIN`, `MAGNITUDE_AXIS_MAX`] and is
/// stretched over `[0, ceiling]` of the count axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeAxis {
    ceiling: f64,
}

impl MagnitudeAxis {
    pub fn new(count_ceiling: usize) -> Self {
        Self {
            ceiling: count_ceiling.max(1) as f64,
        }
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Count-axis position of a magnitude
    pub fn to_plot(&self, magnitude: f64) -> f64 {
        let clamped = magnitude.clamp(MAGNITUDE_AXIS_MIN, MAGNITUDE_AXIS_MAX);
        (clamped - MAGNITUDE_AXIS_MIN) / (MAGNITUDE_AXIS_MAX - MAGNITUDE_AXIS_MIN) * self.ceiling
    }

    /// Magnitude at a count-axis position
    pub fn from_plot(&self, y: f64) -> f64 {
        MAGNITUDE_AXIS_MIN + (y / self.ceiling) * (MAGNITUDE_AXIS_MAX - MAGNITUDE_AXIS_MIN)
    }

    /// Label for a tick of the right-hand axis, blank outside the magnitude range
    pub fn tick_label(&self, y: f64) -> String {
        let magnitude = self.from_plot(y);
        let range = MAGNITUDE_AXIS_MIN - 1e-6..=MAGNITUDE_AXIS_MAX + 1e-6;
        if range.contains(&magnitude) {
            format!("M{:.1}", magnitude)
        } else {
            String::new()
        }
    }
}

/// Tooltip for a count column
pub fn count_tooltip(count: usize) -> String {
    if count == 1 {
        "1 earthquake".to_string()
    } else {
        format!("{} earthquakes", count)
    }
}

/// Tooltip for a point of the magnitude series
pub fn magnitude_tooltip(magnitude: f64) -> String {
    format!("Strongest: M {:.1}", magnitude)
}

/// Arithmetic mean of the quakes' coordinates
pub fn centroid<'a>(quakes: impl IntoIterator<Item = &'a Quake>) -> Option<GeoCoord> {
    let (sum_lat, sum_lon, n) = quakes
        .into_iter()
        .fold((0.0, 0.0, 0usize), |(lat, lon, n), q| (lat + q.coord.lat, lon + q.coord.lon, n + 1));

    if n == 0 {
        return None;
    }
    Some(GeoCoord::new(sum_lat / n as f64, sum_lon / n as f64))
}
