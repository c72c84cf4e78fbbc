use std::collections::HashMap;

use crate::math::Point3;
use crate::topology::{TopologyStore, VertexData, VertexId};

/// Result of resolving one input point to a merged vertex.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MergeOutcome {
    pub vertex: VertexId,
    /// Number of existing vertices within tolerance. More than one means the
    /// merge target was ambiguous.
    pub candidates: usize,
}

/// Spatial hash-based vertex merger.
///
/// Groups points by grid cell and merges each point into the nearest
/// existing vertex within `tolerance`. Cells are at least `tolerance` wide,
/// so every candidate lies in the 3x3x3 neighbourhood of the query cell.
pub(crate) struct VertexMerger {
    tolerance: f64,
    cell_size: f64,
    map: HashMap<(i64, i64, i64), Vec<(VertexId, Point3)>>,
}

impl VertexMerger {
    pub(crate) fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cell_size: tolerance.max(f64::EPSILON),
            map: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: &Point3) -> (i64, i64, i64) {
        let inv = 1.0 / self.cell_size;
        (
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        )
    }

    pub(crate) fn get_or_create(&mut self, store: &mut TopologyStore, point: &Point3) -> MergeOutcome {
        let key = self.cell_key(point);

        let mut best: Option<(VertexId, f64)> = None;
        let mut candidates = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (
                        key.0.saturating_add(dx),
                        key.1.saturating_add(dy),
                        key.2.saturating_add(dz),
                    );
                    let Some(entries) = self.map.get(&neighbor) else {
                        continue;
                    };
                    for &(vid, ref existing) in entries {
                        let dist = (point - existing).norm();
                        if dist > self.tolerance {
                            continue;
                        }
                        candidates += 1;
                        match best {
                            Some((_, best_dist)) if best_dist <= dist => {}
                            _ => best = Some((vid, dist)),
                        }
                    }
                }
            }
        }

        if let Some((vertex, _)) = best {
            return MergeOutcome { vertex, candidates };
        }

        // No match within tolerance
        let vertex = store.add_vertex(VertexData::new(*point));
        self.map.entry(key).or_default().push((vertex, *point));
        MergeOutcome {
            vertex,
            candidates: 0,
        }
    }
}
