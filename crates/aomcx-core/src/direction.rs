use glam::{IVec3, UVec3, Vec3};

/// The 26 neighbor offsets of a voxel: 6 faces, 12 edges, 8 corners.
pub const NEIGHBOR_OFFSETS: [IVec3; 26] = [
    // Faces
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
    // Edges (xy plane)
    IVec3::new(1, 1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, -1, 0),
    // Edges (xz plane)
    IVec3::new(1, 0, 1),
    IVec3::new(-1, 0, 1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, -1),
    // Edges (yz plane)
    IVec3::new(0, 1, 1),
    IVec3::new(0, -1, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(0, -1, -1),
    // Corners
    IVec3::new(1, 1, 1),
    IVec3::new(-1, 1, 1),
    IVec3::new(1, -1, 1),
    IVec3::new(-1, -1, 1),
    IVec3::new(1, 1, -1),
    IVec3::new(-1, 1, -1),
    IVec3::new(1, -1, -1),
    IVec3::new(-1, -1, -1),
];

/// Corner offsets of a unit voxel relative to its minimum corner.
pub const CORNER_OFFSETS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Flat-index deltas of the 26 neighbors in a column-major buffer of `dims`.
pub fn flat_neighbor_deltas(dims: UVec3) -> [isize; 26] {
    let sx = 1isize;
    let sy = dims.x as isize;
    let sz = dims.x as isize * dims.y as isize;
    let mut deltas = [0isize; 26];
    for (delta, offset) in deltas.iter_mut().zip(NEIGHBOR_OFFSETS) {
        *delta = offset.x as isize * sx + offset.y as isize * sy + offset.z as isize * sz;
    }
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_count() {
        assert_eq!(NEIGHBOR_OFFSETS.len(), 26);
    }

    #[test]
    fn test_neighbors_unique() {
        for (i, a) in NEIGHBOR_OFFSETS.iter().enumerate() {
            for (j, b) in NEIGHBOR_OFFSETS.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "neighbors {i} and {j} share offset");
                }
            }
        }
    }

    #[test]
    fn test_no_zero_offset() {
        for offset in NEIGHBOR_OFFSETS {
            assert_ne!(offset, IVec3::ZERO);
            assert!(offset.abs().max_element() == 1, "{offset:?} is not adjacent");
        }
    }

    #[test]
    fn test_faces_edges_corners() {
        let moved: Vec<i32> = NEIGHBOR_OFFSETS.iter().map(|o| o.abs().element_sum()).collect();
        assert_eq!(moved.iter().filter(|&&m| m == 1).count(), 6);
        assert_eq!(moved.iter().filter(|&&m| m == 2).count(), 12);
        assert_eq!(moved.iter().filter(|&&m| m == 3).count(), 8);
    }

    #[test]
    fn test_corner_offsets_span_unit_cube() {
        let sum: Vec3 = CORNER_OFFSETS.iter().copied().sum();
        assert_eq!(sum, Vec3::splat(4.0));
    }

    #[test]
    fn test_flat_neighbor_deltas() {
        let deltas = flat_neighbor_deltas(UVec3::new(4, 5, 6));
        assert_eq!(deltas[0], 1);
        assert_eq!(deltas[2], 4);
        assert_eq!(deltas[4], 20);
        assert_eq!(deltas[25], -1 - 4 - 20);
    }
}
