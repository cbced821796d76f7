//! Summary statistics over the full dataset

use crate::magnitude::MagnitudeBand;
use crate::quake::{format_magnitude, Quake};

/// Headline shown on a card when there is nothing to summarize
pub const NO_DATA: &str = "No data";

/// A quake referenced by a stat card
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeSummary {
    pub id: String,
    pub magnitude: Option<f64>,
    pub place_label: String,
    pub date_label: String,
}

impl QuakeSummary {
    fn from_quake(quake: &Quake) -> Self {
        Self {
            id: quake.id.clone(),
            magnitude: quake.magnitude,
            place_label: quake.short_place().to_string(),
            date_label: quake.date_label(),
        }
    }
}

/// Dataset-wide figures: total count, strongest and latest quake
///
/// Computed once from the full dataset; filter thresholds never feed in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsSummary {
    pub total: usize,
    pub strongest: Option<QuakeSummary>,
    pub latest: Option<QuakeSummary>,
}

impl StatsSummary {
    /// Summarize quakes sorted most recent first
    pub fn compute(quakes: &[Quake]) -> Self {
        // Strict comparison keeps the first (most recent) of equal maxima
        let strongest = quakes.iter().fold(None::<&Quake>, |best, quake| match best {
            Some(b) if quake.magnitude_or_zero() <= b.magnitude_or_zero() => Some(b),
            _ => Some(quake),
        });

        Self {
            total: quakes.len(),
            strongest: strongest.map(QuakeSummary::from_quake),
            latest: quakes.first().map(QuakeSummary::from_quake),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The three cards, in display order: total, strongest, latest
    pub fn cards(&self) -> [StatCard; 3] {
        let total = StatCard {
            kind: StatKind::Total,
            headline: self.total.to_string(),
            caption: "Total Recorded Quakes".to_string(),
            detail: None,
            band: None,
            quake_id: None,
        };

        let strongest = match &self.strongest {
            Some(q) => StatCard {
                kind: StatKind::Strongest,
                headline: format_magnitude(q.magnitude),
                caption: "Strongest Ever".to_string(),
                detail: Some(format!("{} • {}", q.place_label, q.date_label)),
                band: Some(MagnitudeBand::classify(q.magnitude.unwrap_or(0.0))),
                quake_id: Some(q.id.clone()),
            },
            None => StatCard::empty(StatKind::Strongest, "Strongest Ever"),
        };

        let latest = match &self.latest {
            Some(q) => StatCard {
                kind: StatKind::Latest,
                headline: format_magnitude(q.magnitude),
                caption: "Latest".to_string(),
                detail: Some(format!("{} • {}", q.place_label, q.date_label)),
                band: Some(MagnitudeBand::classify(q.magnitude.unwrap_or(0.0))),
                quake_id: Some(q.id.clone()),
            },
            None => StatCard::empty(StatKind::Latest, "Latest"),
        };

        [total, strongest, latest]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Total,
    Strongest,
    Latest,
}

/// View model for one stat card
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub kind: StatKind,
    pub headline: String,
    pub caption: String,
    pub detail: Option<String>,
    pub band: Option<MagnitudeBand>,

    /// Quake focused on the map when the card is clicked
    pub quake_id: Option<String>,
}

impl StatCard {
    fn empty(kind: StatKind, caption: &str) -> Self {
        Self {
            kind,
            headline: NO_DATA.to_string(),
            caption: caption.to_string(),
            detail: None,
            band: None,
            quake_id: None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.quake_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::quake::GeoCoord;

    fn quake(id: &str, time_ms: i64, magnitude: Option<f64>) -> Quake {
        Quake::new(id, time_ms, magnitude, "Near Dhaka, Bangladesh", GeoCoord::new(23.7, 90.4))
    }

    #[test]
    fn test_two_event_scenario() {
        let dataset = Dataset::new(vec![quake("a", 1_000, Some(5.2)), quake("b", 2_000, Some(6.1))]);
        let stats = StatsSummary::compute(dataset.quakes());
        let [total, strongest, latest] = stats.cards();

        assert_eq!(total.headline, "2");
        assert!(!total.is_interactive());
        assert_eq!(strongest.headline, "M 6.1");
        assert_eq!(strongest.quake_id.as_deref(), Some("b"));
        assert_eq!(latest.headline, "M 6.1");
        assert_eq!(latest.quake_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_ties_resolve_to_most_recent() {
        let dataset = Dataset::new(vec![
            quake("old", 1_000, Some(5.5)),
            quake("new", 3_000, Some(5.5)),
            quake("weak", 2_000, Some(3.0)),
        ]);
        let stats = StatsSummary::compute(dataset.quakes());
        assert_eq!(stats.strongest.map(|s| s.id), Some("new".to_string()));
    }

    #[test]
    fn test_missing_magnitudes_do_not_win() {
        let dataset = Dataset::new(vec![quake("unknown", 2_000, None), quake("known", 1_000, Some(3.1))]);
        let stats = StatsSummary::compute(dataset.quakes());
        assert_eq!(stats.strongest.as_ref().map(|s| s.id.as_str()), Some("known"));
        assert_eq!(stats.latest.as_ref().map(|s| s.id.as_str()), Some("unknown"));
        assert_eq!(stats.cards()[2].headline, "M ?");
    }

    #[test]
    fn test_empty_dataset_shows_no_data() {
        let stats = StatsSummary::compute(&[]);
        assert!(stats.is_empty());

        let [total, strongest, latest] = stats.cards();
        assert_eq!(total.headline, "0");
        assert_eq!(strongest.headline, NO_DATA);
        assert_eq!(latest.headline, NO_DATA);
        assert!(!strongest.is_interactive());
        assert!(cards_contain_no_nan(&[total, strongest, latest]));
    }

    fn cards_contain_no_nan(cards: &[StatCard]) -> bool {
        cards.iter().all(|c| !c.headline.contains("NaN") && !c.headline.contains("inf"))
    }
}
