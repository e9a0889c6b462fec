//! Detector footprint masking.
//!
//! For every detector, the boundary voxels (non-background voxels touching
//! background through any of their 26 neighbors, or lying on the grid edge)
//! that fall inside the detector's capture radius get their detector flag
//! set. The transport kernel then attributes an exiting photon to a
//! detector with a single flag test instead of a distance computation.
//!
//! The footprint search samples a cube of half-width `radius + 1` around the
//! center every half voxel, restricted to the part of the cube over the grid, and screens each candidate voxel by its corner
//! distances. This is not an exact sphere/box intersection, and must not be
//! replaced by one: detection statistics are calibrated against this mask.

use std::collections::HashSet;

use aomcx_core::constants::{CORNER_MARGIN, SAMPLE_STEP, VERY_BIG};
use aomcx_core::direction::{flat_neighbor_deltas, CORNER_OFFSETS};
use aomcx_core::error::try_alloc;
use aomcx_core::grid::{linear_index, padded_dims, voxel_count};
use aomcx_core::types::{Detector, GridDims, MediumId};
use aomcx_core::PrepError;
use glam::{UVec3, Vec3};

use crate::volume::VolumeStore;

/// Outcome of a masking pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskReport {
    /// Distinct voxels captured per detector, in detector order.
    pub coverage: Vec<u32>,
    /// Non-fatal problems, e.g. a detector touching no exposed interface.
    pub warnings: Vec<String>,
}

/// Copy of the medium grid with a one-voxel background halo on every face,
/// so neighbor lookups never need bounds checks.
struct PaddedVolume {
    dims: GridDims,
    media: Vec<MediumId>,
    deltas: [isize; 26],
}

impl PaddedVolume {
    fn new(volume: &VolumeStore) -> Result<Self, PrepError> {
        let dims = volume.dims();
        let pdims = padded_dims(dims);
        let n = voxel_count(pdims)?;
        let mut media = try_alloc(n)?;
        media.resize(n, MediumId::AIR);

        let src = volume.voxels();
        let row = dims.x as usize;
        for z in 0..dims.z {
            for y in 0..dims.y {
                let from = linear_index(dims, UVec3::new(0, y, z));
                let to = linear_index(pdims, UVec3::new(1, y + 1, z + 1));
                for (dst, voxel) in media[to..to + row].iter_mut().zip(&src[from..from + row]) {
                    *dst = voxel.medium;
                }
            }
        }

        Ok(Self {
            dims: pdims,
            media,
            deltas: flat_neighbor_deltas(pdims),
        })
    }

    /// Whether the unpadded voxel `coord` is medium with at least one
    /// background neighbor.
    fn is_exposed(&self, coord: UVec3) -> bool {
        let idx = linear_index(self.dims, coord + UVec3::ONE);
        if self.media[idx].is_air() {
            return false;
        }
        self.deltas
            .iter()
            .any(|&d| self.media[(idx as isize + d) as usize].is_air())
    }
}

/// Flag the footprint of every detector in `volume`.
///
/// The volume is normalized to column-major order first. Detectors are
/// independent: flags only accumulate, so order does not matter and a
/// second pass changes nothing.
pub fn mask_detectors(
    volume: &mut VolumeStore,
    detectors: &[Detector],
) -> Result<MaskReport, PrepError> {
    volume.normalize_layout()?;
    let padded = PaddedVolume::new(volume)?;

    let mut report = MaskReport::default();
    for (i, det) in detectors.iter().enumerate() {
        let count = mask_detector(&padded, volume, det);
        log::debug!(
            "detector {} at {} (r = {}) covers {} boundary voxels",
            i + 1,
            det.center,
            det.radius,
            count
        );
        if count == 0 {
            let msg = format!(
                "detector {} is not located on an interface, please check coordinates",
                i + 1
            );
            log::warn!("{msg}");
            report.warnings.push(msg);
        }
        report.coverage.push(count);
    }
    Ok(report)
}

fn mask_detector(padded: &PaddedVolume, volume: &mut VolumeStore, det: &Detector) -> u32 {
    let w = det.radius;
    if !w.is_finite() || w < 0.0 || !det.center.is_finite() {
        return 0;
    }
    let dims = volume.dims();
    let reach = w + 1.0;
    let reach2 = reach * reach;
    let outer2 = (w + CORNER_MARGIN) * (w + CORNER_MARGIN);
    let c = det.center;

    let (Some(xs), Some(ys), Some(zs)) = (
        sample_range(reach, c.x, dims.x),
        sample_range(reach, c.y, dims.y),
        sample_range(reach, c.z, dims.z),
    ) else {
        return 0;
    };
    let offset = |k: i64| -reach + k as f32 * SAMPLE_STEP;

    let mut captured = HashSet::new();
    for kz in zs.0..=zs.1 {
        let z = offset(kz);
        let iz = z + c.z;
        for ky in ys.0..=ys.1 {
            let y = offset(ky);
            let iy = y + c.y;
            for kx in xs.0..=xs.1 {
                let x = offset(kx);
                let ix = x + c.x;
                let outside = ix < 0.0
                    || iy < 0.0
                    || iz < 0.0
                    || ix >= dims.x as f32
                    || iy >= dims.y as f32
                    || iz >= dims.z as f32;
                if !outside && x * x + y * y + z * z <= reach2 {
                    let voxel = UVec3::new(ix as u32, iy as u32, iz as u32);
                    if in_footprint(voxel, det, outer2) && padded.is_exposed(voxel) {
                        let idx = volume.index_of(voxel);
                        volume.set_detector(idx);
                        captured.insert(idx);
                    }
                }
            }
        }
    }
    captured.len() as u32
}

/// Inclusive index range of the sample lattice `-reach + k * SAMPLE_STEP`,
/// `k` in `0..=4 * reach`, that can land inside `[0, dim)` once offset by
/// `center`. None when the lattice misses the axis entirely. Indices stay
/// integral so large radii neither stall nor walk the whole cube.
fn sample_range(reach: f32, center: f32, dim: u32) -> Option<(i64, i64)> {
    let last = ((2.0 * reach) / SAMPLE_STEP).floor() as i64;
    let lo = (((reach - center) / SAMPLE_STEP).floor() as i64 - 1).max(0);
    let hi = (((dim as f32 - center + reach) / SAMPLE_STEP).ceil() as i64 + 1).min(last);
    (lo <= hi).then_some((lo, hi))
}

/// Corner screen for one candidate voxel.
///
/// Rejected outright when any corner lies beyond `outer2`; accepted when the
/// nearest corner is strictly inside the radius. A zero-radius detector is
/// a point and captures the voxels whose closed box contains it.
fn in_footprint(voxel: UVec3, det: &Detector, outer2: f32) -> bool {
    let base = voxel.as_vec3() - det.center;
    let mut min_d2 = VERY_BIG;
    for corner in CORNER_OFFSETS {
        let r = base + corner;
        let d2 = r.x * r.x + r.y * r.y + r.z * r.z;
        if d2 > outer2 {
            return false;
        }
        if d2 < min_d2 {
            min_d2 = d2;
        }
    }
    if det.radius > 0.0 {
        min_d2 < det.radius * det.radius
    } else {
        let lo = voxel.as_vec3();
        det.center.cmpge(lo).all() && det.center.cmple(lo + Vec3::ONE).all()
    }
}
