use glam::{UVec3, Vec3};

use crate::constants::HALO;
use crate::error::PrepError;
use crate::types::GridDims;

/// Number of voxels in the grid. Fails on zero-sized or unaddressable grids.
pub fn voxel_count(dims: GridDims) -> Result<usize, PrepError> {
    if dims.x == 0 || dims.y == 0 || dims.z == 0 {
        return Err(PrepError::EmptyGrid(dims));
    }
    (dims.x as usize)
        .checked_mul(dims.y as usize)
        .and_then(|xy| xy.checked_mul(dims.z as usize))
        .ok_or(PrepError::GridOverflow(dims))
}

/// Whether any axis is zero.
pub fn is_degenerate(dims: GridDims) -> bool {
    dims.x == 0 || dims.y == 0 || dims.z == 0
}

/// Column-major (x fastest) flat index: `dimx*dimy*z + dimx*y + x`.
pub fn linear_index(dims: GridDims, coord: UVec3) -> usize {
    let (dx, dy) = (dims.x as usize, dims.y as usize);
    dx * dy * coord.z as usize + dx * coord.y as usize + coord.x as usize
}

/// Row-major (z fastest) flat index: `dimy*dimz*x + dimz*y + z`.
pub fn row_major_index(dims: GridDims, coord: UVec3) -> usize {
    let (dy, dz) = (dims.y as usize, dims.z as usize);
    dy * dz * coord.x as usize + dz * coord.y as usize + coord.z as usize
}

/// Inverse of [`linear_index`].
pub fn coord_of(dims: GridDims, index: usize) -> UVec3 {
    let (dx, dy) = (dims.x as usize, dims.y as usize);
    UVec3::new(
        (index % dx) as u32,
        ((index / dx) % dy) as u32,
        (index / (dx * dy)) as u32,
    )
}

/// Inverse of [`row_major_index`].
pub fn row_major_coord_of(dims: GridDims, index: usize) -> UVec3 {
    let (dy, dz) = (dims.y as usize, dims.z as usize);
    UVec3::new(
        (index / (dy * dz)) as u32,
        ((index / dz) % dy) as u32,
        (index % dz) as u32,
    )
}

/// Half-open bounds test `[0, dim)` on every axis. NaN is never inside.
pub fn contains(dims: GridDims, pos: Vec3) -> bool {
    pos.x >= 0.0
        && pos.y >= 0.0
        && pos.z >= 0.0
        && pos.x < dims.x as f32
        && pos.y < dims.y as f32
        && pos.z < dims.z as f32
}

/// Voxel containing `pos`, by per-axis floor. Only meaningful when
/// [`contains`] holds.
pub fn voxel_of(pos: Vec3) -> UVec3 {
    let f = pos.floor();
    UVec3::new(f.x as u32, f.y as u32, f.z as u32)
}

/// Dimensions of the grid with a zero halo on every face.
pub fn padded_dims(dims: GridDims) -> GridDims {
    dims + UVec3::splat(2 * HALO)
}
