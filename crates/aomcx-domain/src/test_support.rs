//! Synthetic volumes for masking and source-placement tests.

use aomcx_core::types::Voxel;
use glam::UVec3;

use crate::volume::VolumeStore;

/// All-air volume with one medium-filled z layer.
pub fn slab(dims: UVec3, layer: u32, medium: u8) -> VolumeStore {
    block(dims, UVec3::new(0, 0, layer), UVec3::new(dims.x - 1, dims.y - 1, layer), medium)
}

/// All-air volume with the inclusive box `[min, max]` filled with `medium`.
pub fn block(dims: UVec3, min: UVec3, max: UVec3, medium: u8) -> VolumeStore {
    let mut store = VolumeStore::filled(dims, 0).expect("test volume");
    for z in min.z..=max.z {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                store.set(UVec3::new(x, y, z), Voxel::new(medium));
            }
        }
    }
    store
}

/// Coordinates of every flagged voxel, in storage order.
pub fn flagged(store: &VolumeStore) -> Vec<UVec3> {
    let dims = store.dims();
    store
        .voxels()
        .iter()
        .enumerate()
        .filter(|(_, v)| v.detector)
        .map(|(i, _)| aomcx_core::grid::coord_of(dims, i))
        .collect()
}
