//! Screen-cell clustering for low zoom levels

use ahash::AHashMap;

use super::camera::Viewpoint;
use super::markers::{MarkerHandle, RenderedMarker};
use super::projection::scale;
use crate::magnitude::MagnitudeBand;

/// Markers are clustered below this zoom level
pub const CLUSTER_MAX_ZOOM: f64 = 9.0;

/// Edge length of a clustering cell, in screen pixels
pub const CLUSTER_CELL_PX: f64 = 60.0;

/// Markers sharing one screen cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Ascending by handle
    pub members: Vec<MarkerHandle>,

    /// Mean world position of the members
    pub world: [f64; 2],

    /// Band of the strongest member
    pub band: MagnitudeBand,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }
}

pub fn clustering_active(view: &Viewpoint) -> bool {
    view.zoom < CLUSTER_MAX_ZOOM
}

/// Group markers by screen cell at the view's zoom
///
/// Cells are anchored to the world rather than the viewport so clusters stay
/// put while panning. Output is ordered by each cluster's first member.
pub fn cluster_markers(markers: &[RenderedMarker], view: &Viewpoint) -> Vec<Cluster> {
    let s = scale(view.zoom);
    let mut cells: AHashMap<(i64, i64), Vec<&RenderedMarker>> = AHashMap::new();

    for marker in markers {
        let cell = (
            (marker.world[0] * s / CLUSTER_CELL_PX).floor() as i64,
            (marker.world[1] * s / CLUSTER_CELL_PX).floor() as i64,
        );
        cells.entry(cell).or_default().push(marker);
    }

    let mut clusters: Vec<Cluster> = cells
        .into_values()
        .map(|members| {
            let n = members.len() as f64;
            let world = [
                members.iter().map(|m| m.world[0]).sum::<f64>() / n,
                members.iter().map(|m| m.world[1]).sum::<f64>() / n,
            ];
            let band = members
                .iter()
                .map(|m| m.band)
                .min_by_key(|b| b.rank())
                .unwrap_or(MagnitudeBand::Light);
            let mut handles: Vec<MarkerHandle> = members.iter().map(|m| m.handle).collect();
            handles.sort();
            Cluster {
                members: handles,
                world,
                band,
            }
        })
        .collect();

    clusters.sort_by_key(|c| c.members[0]);
    clusters
}
