//! Obstacle list for camera collision
//!
//! A linear scan over a few dozen boxes per step; walls come from the static
//! obstacle file and furniture from the scene objects.

use crate::foundation::Aabb;

/// Append-only set of obstacle boxes
#[derive(Debug, Clone, Default)]
pub struct CollisionMap {
    boxes: Vec<Aabb>,
}

impl CollisionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one obstacle
    pub fn add_box(&mut self, obstacle: Aabb) {
        log::debug!("Obstacle added: {:?} .. {:?}", obstacle.min, obstacle.max);
        self.boxes.push(obstacle);
    }

    /// True if `candidate` overlaps any obstacle.
    ///
    /// Boxes that only touch along a face do not collide, so the avatar can
    /// stand flush against a wall.
    pub fn collides(&self, candidate: &Aabb) -> bool {
        self.boxes.iter().any(|obstacle| obstacle.intersects(candidate))
    }

    /// Stored obstacles in insertion order
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    /// Number of stored obstacles
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// True when nothing blocks movement
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl Extend<Aabb> for CollisionMap {
    fn extend<I: IntoIterator<Item = Aabb>>(&mut self, iter: I) {
        for obstacle in iter {
            self.add_box(obstacle);
        }
    }
}

impl FromIterator<Aabb> for CollisionMap {
    fn from_iter<I: IntoIterator<Item = Aabb>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn aabb(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vec3::from(min), Vec3::from(max))
    }

    #[test]
    fn test_empty_map_never_collides() {
        let map = CollisionMap::new();
        assert!(map.is_empty());
        assert!(!map.collides(&aabb([-1e6; 3], [1e6; 3])));
    }

    #[test]
    fn test_shared_face_is_not_a_collision() {
        let mut map = CollisionMap::new();
        map.add_box(aabb([0.0; 3], [10.0; 3]));
        assert!(!map.collides(&aabb([10.0, 0.0, 0.0], [20.0, 10.0, 10.0])));
        assert!(map.collides(&aabb([9.9, 0.0, 0.0], [20.0, 10.0, 10.0])));
    }

    #[test]
    fn test_overlap_needs_all_three_axes() {
        let mut map = CollisionMap::new();
        map.add_box(aabb([0.0; 3], [10.0; 3]));
        // Overlaps on X and Y, separated on Z
        assert!(!map.collides(&aabb([5.0, 5.0, 11.0], [15.0, 15.0, 20.0])));
        assert!(map.collides(&aabb([5.0, 5.0, 5.0], [15.0, 15.0, 20.0])));
        // Containment counts
        assert!(map.collides(&aabb([2.0; 3], [3.0; 3])));
    }

    #[test]
    fn test_collides_is_symmetric() {
        let boxes = [
            aabb([0.0; 3], [10.0; 3]),
            aabb([10.0, 0.0, 0.0], [20.0, 10.0, 10.0]),
            aabb([5.0, -5.0, 5.0], [6.0, 5.0, 6.0]),
            aabb([-3.0; 3], [-1.0; 3]),
        ];
        for a in &boxes {
            for b in &boxes {
                let forward: CollisionMap = std::iter::once(*a).collect();
                let backward: CollisionMap = std::iter::once(*b).collect();
                assert_eq!(forward.collides(b), backward.collides(a));
            }
        }
    }

    #[test]
    fn test_duplicate_boxes_do_not_change_answers() {
        let obstacle = aabb([0.0; 3], [10.0; 3]);
        let probes = [
            aabb([5.0; 3], [15.0; 3]),
            aabb([10.0, 0.0, 0.0], [20.0, 10.0, 10.0]),
            aabb([20.0; 3], [30.0; 3]),
        ];

        let mut once = CollisionMap::new();
        once.add_box(obstacle);
        let mut twice = once.clone();
        twice.add_box(obstacle);

        assert_eq!(twice.len(), 2);
        for probe in &probes {
            assert_eq!(once.collides(probe), twice.collides(probe));
        }
    }
}
