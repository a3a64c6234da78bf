//! Collision detection based on axis-aligned bounding boxes.

use nalgebra::Vector3;

pub trait HasCollision {
    fn has_collision(&self, other: &dyn HasCollision) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    fn bounding_box(&self) -> BoundingBox;
}

/// Axis-aligned box given by its center and half-size. Axes are (lateral, up, forward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    center: Vector3<f64>,
    half_extent: Vector3<f64>,
}

impl BoundingBox {
    pub fn new(center: Vector3<f64>, half_extent: Vector3<f64>) -> Self {
        Self {
            center,
            half_extent: half_extent.abs(),
        }
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    pub fn half_extent(&self) -> Vector3<f64> {
        self.half_extent
    }

    /// Closed intervals: boxes that merely touch on a face count as overlapping.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        let distance = (self.center - other.center).abs();
        let reach = self.half_extent + other.half_extent;
        distance.iter().zip(reach.iter()).all(|(d, r)| d <= r)
    }
}

/// Overlap of the tested object with one of the candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub forward_distance: f64,
}

/// Tests `object` against every candidate and reports the overlapping candidate nearest along
/// the forward axis. Equal distances resolve to the lowest index.
pub fn detect<'a, T>(
    object: &dyn HasCollision,
    candidates: impl IntoIterator<Item = &'a T>,
) -> Option<Hit>
where
    T: HasCollision + 'a,
{
    let bounding_box = object.bounding_box();
    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let other = candidate.bounding_box();
            bounding_box.overlaps(&other).then(|| Hit {
                index,
                forward_distance: (other.center.z - bounding_box.center.z).abs(),
            })
        })
        .min_by(|a, b| {
            a.forward_distance
                .total_cmp(&b.forward_distance)
                .then(a.index.cmp(&b.index))
        })
}
