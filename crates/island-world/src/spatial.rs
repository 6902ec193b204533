//! Parcel claims and fence collision.
//!
//! Parcels are axis-aligned rectangles of integer tiles. Every query here
//! works on a parcel's bounding box (the min/max of its tile coordinates)
//! rather than its exact outline, which is exact for rectangles.
//!
//! - [`is_area_available`] -- can a new rectangle be claimed?
//! - [`build_parcel_tiles`] -- the tiles of a new parcel, border flagged
//! - [`movement_crosses_any_fence`] -- would a step enter or leave a parcel?

use island_types::{GardenTile, PrivateGarden};

/// Inclusive integer bounds of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Smallest tile column.
    pub min_x: i32,
    /// Largest tile column.
    pub max_x: i32,
    /// Smallest tile row.
    pub min_y: i32,
    /// Largest tile row.
    pub max_y: i32,
}

impl BoundingBox {
    /// Bounds of a parcel's tile set, or `None` for an empty set.
    pub fn of_tiles(tiles: &[GardenTile]) -> Option<Self> {
        let first = tiles.first()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(tiles.iter().fold(init, |b, t| Self {
            min_x: b.min_x.min(t.x),
            max_x: b.max_x.max(t.x),
            min_y: b.min_y.min(t.y),
            max_y: b.max_y.max(t.y),
        }))
    }

    /// Bounds of a claimed garden.
    pub fn of_garden(garden: &PrivateGarden) -> Option<Self> {
        Self::of_tiles(&garden.tiles)
    }
}

/// A rectangle someone wants to claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRect {
    /// Left column.
    pub start_x: i32,
    /// Bottom row.
    pub start_y: i32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
}

impl ClaimRect {
    /// One past the right edge.
    fn end_x(&self) -> i64 {
        i64::from(self.start_x).saturating_add(i64::from(self.width))
    }

    /// One past the top edge.
    fn end_y(&self) -> i64 {
        i64::from(self.start_y).saturating_add(i64::from(self.height))
    }

    /// Whether this rectangle is clear of `other` on at least one axis.
    pub fn is_disjoint_from(&self, other: &BoundingBox) -> bool {
        self.end_x() < i64::from(other.min_x)
            || self.start_x > other.max_x
            || self.end_y() < i64::from(other.min_y)
            || self.start_y > other.max_y
    }

    /// Whether the rectangle fits inside a circular island of `radius`.
    ///
    /// The corner's distance from the island center must leave room for
    /// half the larger side.
    pub fn fits_island(&self, radius: f64) -> bool {
        let distance = f64::from(self.start_x).hypot(f64::from(self.start_y));
        let half_extent = f64::from(self.width.max(self.height)) / 2.0;
        distance <= radius - half_extent
    }
}

/// Inclusive membership of a point in a bounding box.
pub fn is_point_inside_bounds(x: f64, y: f64, bounds: &BoundingBox) -> bool {
    x >= f64::from(bounds.min_x)
        && x <= f64::from(bounds.max_x)
        && y >= f64::from(bounds.min_y)
        && y <= f64::from(bounds.max_y)
}

/// Whether `rect` can be claimed: inside the island and clear of every
/// existing parcel.
pub fn is_area_available(gardens: &[PrivateGarden], island_radius: f64, rect: &ClaimRect) -> bool {
    if !rect.fits_island(island_radius) {
        return false;
    }
    gardens
        .iter()
        .filter_map(BoundingBox::of_garden)
        .all(|bounds| rect.is_disjoint_from(&bounds))
}

/// Every tile of `[start_x, start_x + width) x [start_y, start_y + height)`,
/// with the perimeter flagged as fence.
pub fn build_parcel_tiles(rect: &ClaimRect) -> Vec<GardenTile> {
    let (x0, y0) = (i64::from(rect.start_x), i64::from(rect.start_y));
    let (x_last, y_last) = (rect.end_x().saturating_sub(1), rect.end_y().saturating_sub(1));

    let mut tiles = Vec::new();
    for x in x0..=x_last {
        for y in y0..=y_last {
            let (Ok(tx), Ok(ty)) = (i32::try_from(x), i32::try_from(y)) else {
                continue;
            };
            tiles.push(GardenTile {
                x: tx,
                y: ty,
                has_fence: x == x0 || x == x_last || y == y0 || y == y_last,
            });
        }
    }
    tiles
}

/// Whether moving from `from` to `to` enters or leaves any parcel.
///
/// A move is blocked when the two endpoints disagree on being inside some
/// parcel's bounding box. Direction does not matter: leaving is blocked the
/// same as entering.
pub fn movement_crosses_any_fence(
    gardens: &[PrivateGarden],
    from: (f64, f64),
    to: (f64, f64),
) -> bool {
    gardens
        .iter()
        .filter_map(BoundingBox::of_garden)
        .any(|bounds| {
            is_point_inside_bounds(from.0, from.1, &bounds)
                != is_point_inside_bounds(to.0, to.1, &bounds)
        })
}

#[cfg(test)]
mod tests {
    use island_types::{FenceType, OwnerId};

    use super::*;

    const RADIUS: f64 = 20.0;

    fn rect(start_x: i32, start_y: i32, width: u32, height: u32) -> ClaimRect {
        ClaimRect {
            start_x,
            start_y,
            width,
            height,
        }
    }

    fn garden(r: &ClaimRect) -> PrivateGarden {
        PrivateGarden {
            owner_id: OwnerId::new("owner"),
            tiles: build_parcel_tiles(r),
            created_at: 0,
            fence_type: FenceType::Wooden,
        }
    }

    #[test]
    fn border_tiles_are_exactly_the_perimeter() {
        let tiles = build_parcel_tiles(&rect(2, -1, 5, 4));
        assert_eq!(tiles.len(), 20);

        let interior = tiles.iter().filter(|t| !t.has_fence).count();
        assert_eq!(interior, (5 - 2) * (4 - 2));

        for t in &tiles {
            let on_edge = t.x == 2 || t.x == 6 || t.y == -1 || t.y == 2;
            assert_eq!(t.has_fence, on_edge, "tile ({}, {})", t.x, t.y);
        }
    }

    #[test]
    fn bounding_box_of_parcel() {
        let g = garden(&rect(-3, 4, 3, 6));
        assert_eq!(
            BoundingBox::of_garden(&g),
            Some(BoundingBox {
                min_x: -3,
                max_x: -1,
                min_y: 4,
                max_y: 9,
            })
        );
        assert!(BoundingBox::of_tiles(&[]).is_none());
    }

    #[test]
    fn empty_island_accepts_central_claim() {
        assert!(is_area_available(&[], RADIUS, &rect(0, 0, 5, 5)));
    }

    #[test]
    fn claim_outside_island_is_rejected() {
        // Corner at distance 18 leaves less than 2.5 tiles of room.
        assert!(!is_area_available(&[], RADIUS, &rect(18, 0, 5, 5)));
        // Corner at distance 17 fits within 17.5.
        assert!(is_area_available(&[], RADIUS, &rect(0, 17, 5, 5)));
    }

    #[test]
    fn overlapping_claim_is_rejected() {
        let existing = vec![garden(&rect(0, 0, 5, 5))];
        assert!(!is_area_available(&existing, RADIUS, &rect(2, 2, 4, 4)));
        assert!(!is_area_available(&existing, RADIUS, &rect(-3, -3, 4, 4)));
    }

    #[test]
    fn neighbour_claims_use_the_extent_test() {
        // Existing parcel covers columns 0..=4.
        let existing = vec![garden(&rect(0, 0, 5, 5))];
        // A right neighbour starting on the next column is clear.
        assert!(is_area_available(&existing, RADIUS, &rect(5, 0, 3, 3)));
        // A left neighbour's one-past-the-end column must stay left of 0.
        assert!(is_area_available(&existing, RADIUS, &rect(-4, 0, 3, 3)));
        assert!(!is_area_available(&existing, RADIUS, &rect(-3, 0, 3, 3)));
    }

    #[test]
    fn accepted_claims_never_overlap() {
        let mut gardens: Vec<PrivateGarden> = Vec::new();
        for start_x in (-10..10).step_by(2) {
            for start_y in (-10..10).step_by(3) {
                let r = rect(start_x, start_y, 3, 3);
                if is_area_available(&gardens, RADIUS, &r) {
                    gardens.push(garden(&r));
                }
            }
        }
        assert!(gardens.len() > 1);
        let boxes: Vec<BoundingBox> = gardens.iter().filter_map(BoundingBox::of_garden).collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in boxes.iter().skip(i + 1) {
                let overlap = a.min_x <= b.max_x
                    && b.min_x <= a.max_x
                    && a.min_y <= b.max_y
                    && b.min_y <= a.max_y;
                assert!(!overlap, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn point_membership_is_inclusive() {
        let bounds = BoundingBox {
            min_x: 0,
            max_x: 4,
            min_y: 0,
            max_y: 4,
        };
        assert!(is_point_inside_bounds(0.0, 0.0, &bounds));
        assert!(is_point_inside_bounds(4.0, 4.0, &bounds));
        assert!(!is_point_inside_bounds(4.01, 2.0, &bounds));
        assert!(!is_point_inside_bounds(2.0, -0.01, &bounds));
    }

    #[test]
    fn crossing_is_blocked_both_ways() {
        let gardens = vec![garden(&rect(5, -1, 3, 3))];
        // Entering.
        assert!(movement_crosses_any_fence(&gardens, (4.99, 0.0), (5.0, 0.0)));
        // Leaving.
        assert!(movement_crosses_any_fence(&gardens, (6.0, 0.0), (7.5, 0.0)));
        // Staying outside or inside.
        assert!(!movement_crosses_any_fence(&gardens, (0.0, 0.0), (1.0, 0.0)));
        assert!(!movement_crosses_any_fence(&gardens, (5.5, 0.0), (6.5, 1.0)));
    }
}
