//! Bounding-box R-tree over grid cells.

use geo::{BoundingRect, Geometry, Rect};
use gridscore_core::CellId;
use gridscore_grid::CellArena;
use rstar::{RTree, RTreeObject, AABB};
use smallvec::SmallVec;

/// One cell's envelope in the R-tree.
#[derive(Clone, Debug)]
struct CellEnvelope {
    id: CellId,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

/// Candidate cell ids for one feature. Features rarely span more than a
/// handful of cells, so candidates stay on the stack.
pub type Candidates = SmallVec<[CellId; 8]>;

/// Bounding-box spatial index over a grid's cells.
///
/// Because cells are axis-aligned rectangles, the envelope *is* the
/// cell geometry: an envelope hit is exact for point queries, and for
/// line/polygon queries it is the coarse phase that an exact
/// geometry-intersects test refines.
pub struct CellIndex {
    tree: RTree<CellEnvelope>,
}

impl CellIndex {
    /// Bulk-load the index from an arena's cells.
    pub fn build(arena: &CellArena) -> Self {
        let envelopes = arena
            .cells()
            .iter()
            .map(|cell| CellEnvelope {
                id: cell.id,
                aabb: rect_envelope(&cell.rect),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// Cells whose rectangle contains the point. Exact, not coarse:
    /// a point inside a rectangle's bounding box is inside the
    /// rectangle.
    pub fn locate_point(&self, x: f64, y: f64) -> Candidates {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|e| e.id)
            .collect()
    }

    /// Cells whose envelope intersects the feature's bounding box.
    /// Coarse phase only; callers must refine with an exact
    /// geometry-intersects test.
    pub fn candidates(&self, geometry: &Geometry<f64>) -> Candidates {
        let Some(bbox) = geometry.bounding_rect() else {
            return Candidates::new();
        };
        self.tree
            .locate_in_envelope_intersecting(&rect_envelope(&bbox))
            .map(|e| e.id)
            .collect()
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// True when the index holds no cells.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

fn rect_envelope(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}
