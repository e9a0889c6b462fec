use std::path::Path;

use aomcx_core::error::try_alloc;
use aomcx_core::grid::voxel_count;
use aomcx_core::types::{AcousticRecord, AcousticsField, GridDims};
use aomcx_core::PrepError;

use crate::volume::read_raw;

/// Number of planar channels in an acoustics file: Px, Py, Pz, phase.
pub const CHANNELS: usize = 4;

/// Load a channel-planar acoustics file into per-voxel records.
///
/// Layout: four consecutive blocks of `N = dimx*dimy*dimz` f32 in host byte
/// order (Px, Py, Pz, phase), no header. The float count must be exactly `4N`.
pub fn load_acoustics(path: &Path, dims: GridDims) -> Result<AcousticsField, PrepError> {
    let n = voxel_count(dims)?;
    let bytes = read_raw(path)?;
    let expected = n * CHANNELS;
    if bytes.len() != expected * 4 {
        return Err(PrepError::AcousticsLength {
            expected,
            actual: bytes.len() / 4,
        });
    }
    let raw = decode_f32(&bytes)?;
    drop(bytes);

    let records = deinterleave(&raw, n)?;
    log::debug!(
        "loaded acoustics {} ({} records, dims {})",
        path.display(),
        records.len(),
        dims
    );
    AcousticsField::new(dims, records)
}

/// Decode raw f32 values in host byte order, as the kernel writes them.
/// Trailing bytes short of a float are ignored.
pub fn decode_f32(bytes: &[u8]) -> Result<Vec<f32>, PrepError> {
    let n = bytes.len() / 4;
    let mut out = try_alloc(n)?;
    out.resize(n, 0.0f32);
    // Copy through the aligned destination; `bytes` may be unaligned for f32
    bytemuck::cast_slice_mut::<f32, u8>(&mut out).copy_from_slice(&bytes[..n * 4]);
    Ok(out)
}

/// Encode f32 values as raw bytes in host byte order.
pub fn encode_f32(values: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice::<f32, u8>(values).to_vec()
}

/// Split four planar channels of length `n` into `n` records.
///
/// Record `idx` reads channel `p` at `p*n + idx`.
pub fn deinterleave(raw: &[f32], n: usize) -> Result<Vec<AcousticRecord>, PrepError> {
    if raw.len() != n * CHANNELS {
        return Err(PrepError::AcousticsLength {
            expected: n * CHANNELS,
            actual: raw.len(),
        });
    }
    let mut records = try_alloc(n)?;
    if n == 0 {
        return Ok(records);
    }
    records.resize(n, AcousticRecord::default());
    let flat = bytemuck::cast_slice_mut::<AcousticRecord, f32>(&mut records);
    for (p, plane) in raw.chunks_exact(n).enumerate() {
        for (idx, &v) in plane.iter().enumerate() {
            flat[idx * CHANNELS + p] = v;
        }
    }
    Ok(records)
}

/// Inverse of [`deinterleave`]: records back to four planar channels.
pub fn interleave(records: &[AcousticRecord]) -> Vec<f32> {
    let n = records.len();
    let flat = bytemuck::cast_slice::<AcousticRecord, f32>(records);
    let mut raw = vec![0.0f32; n * CHANNELS];
    for (i, &v) in flat.iter().enumerate() {
        raw[(i % CHANNELS) * n + i / CHANNELS] = v;
    }
    raw
}

/// Write a field back out in the planar file layout.
pub fn write_acoustics(path: &Path, field: &AcousticsField) -> Result<(), PrepError> {
    let bytes = encode_f32(&interleave(field.records()));
    std::fs::write(path, bytes).map_err(|source| PrepError::Write {
        path: path.to_path_buf(),
        source,
    })
}
