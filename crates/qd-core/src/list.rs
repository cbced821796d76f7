//! The capped "strong quakes" list

use crate::magnitude::MagnitudeBand;
use crate::quake::{format_magnitude, Quake};

/// Minimum magnitude for the list; independent of the map filter
pub const STRONG_QUAKE_THRESHOLD: f64 = 4.5;

/// Maximum number of rows shown
pub const STRONG_QUAKE_LIMIT: usize = 15;

/// View model for one list row
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub quake_id: String,
    pub magnitude_label: String,
    pub band: MagnitudeBand,
    pub place_label: String,
    pub date_label: String,
    pub felt: Option<u32>,
}

impl ListRow {
    fn from_quake(quake: &Quake) -> Self {
        Self {
            quake_id: quake.id.clone(),
            magnitude_label: format_magnitude(quake.magnitude),
            band: MagnitudeBand::classify(quake.magnitude_or_zero()),
            place_label: quake.short_place().to_string(),
            date_label: quake.date_label(),
            felt: quake.felt_reports(),
        }
    }

    /// Badge text, only for quakes with felt reports
    pub fn felt_badge(&self) -> Option<String> {
        self.felt.map(|n| format!("Felt: {}", n))
    }
}

/// First `limit` quakes at or above `threshold`, keeping dataset order
pub fn strong_quakes(quakes: &[Quake], threshold: f64, limit: usize) -> Vec<ListRow> {
    quakes
        .iter()
        .filter(|q| q.magnitude.map_or(false, |m| m >= threshold))
        .take(limit)
        .map(ListRow::from_quake)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::quake::GeoCoord;

    fn quake(id: &str, time_ms: i64, magnitude: Option<f64>) -> Quake {
        Quake::new(id, time_ms, magnitude, "Chittagong, Bangladesh", GeoCoord::new(22.3, 91.8))
    }

    #[test]
    fn test_threshold_and_order() {
        let dataset = Dataset::new(vec![
            quake("weak", 4_000, Some(4.4)),
            quake("a", 1_000, Some(5.2)),
            quake("b", 2_000, Some(6.1)),
            quake("edge", 3_000, Some(4.5)),
            quake("unknown", 5_000, None),
        ]);
        let rows = strong_quakes(dataset.quakes(), STRONG_QUAKE_THRESHOLD, STRONG_QUAKE_LIMIT);
        let ids: Vec<&str> = rows.iter().map(|r| r.quake_id.as_str()).collect();
        assert_eq!(ids, vec!["edge", "b", "a"]);
        assert_eq!(rows[1].band, MagnitudeBand::Major);
        assert_eq!(rows[1].magnitude_label, "M 6.1");
        assert_eq!(rows[0].place_label, "Chittagong");
    }

    #[test]
    fn test_cap() {
        let quakes: Vec<Quake> = (0..40).map(|i| quake(&format!("q{}", i), i, Some(5.0))).collect();
        let dataset = Dataset::new(quakes);
        let rows = strong_quakes(dataset.quakes(), STRONG_QUAKE_THRESHOLD, STRONG_QUAKE_LIMIT);
        assert_eq!(rows.len(), STRONG_QUAKE_LIMIT);
        assert_eq!(rows[0].quake_id, "q39");
    }

    #[test]
    fn test_felt_badge() {
        let quakes = vec![quake("felt", 1, Some(5.0)).with_felt(120), quake("quiet", 0, Some(5.0))];
        let rows = strong_quakes(&quakes, STRONG_QUAKE_THRESHOLD, STRONG_QUAKE_LIMIT);
        assert_eq!(rows[0].felt_badge().as_deref(), Some("Felt: 120"));
        assert_eq!(rows[1].felt_badge(), None);
    }
}
