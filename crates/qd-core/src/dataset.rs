//! The loaded earthquake dataset

use std::sync::Arc;

use crate::quake::Quake;

/// Immutable, time-sorted collection of quakes
///
/// Quakes are kept in descending timestamp order (most recent first). Equal
/// timestamps keep their load order. Cloning is cheap: the underlying slice
/// is shared.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    quakes: Arc<[Quake]>,
}

impl Dataset {
    /// Create a dataset, sorting quakes by descending time
    pub fn new(mut quakes: Vec<Quake>) -> Self {
        quakes.sort_by(|a, b| b.time_ms.cmp(&a.time_ms));
        Self {
            quakes: quakes.into(),
        }
    }

    /// All quakes, most recent first
    pub fn quakes(&self) -> &[Quake] {
        &self.quakes
    }

    pub fn len(&self) -> usize {
        self.quakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quakes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quake> {
        self.quakes.iter()
    }

    /// The most recent quake
    pub fn latest(&self) -> Option<&Quake> {
        self.quakes.first()
    }

    /// Find a quake by identifier
    pub fn find(&self, id: &str) -> Option<&Quake> {
        self.quakes.iter().find(|q| q.id == id)
    }

    /// Earliest and latest event years present
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        // Sorted descending by time, so the ends carry the extreme years
        let latest = self.quakes.first()?.year();
        let earliest = self.quakes.last()?.year();
        Some((earliest, latest))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Quake;
    type IntoIter = std::slice::Iter<'a, Quake>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
