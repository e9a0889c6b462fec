use std::path::Path;

use aomcx_core::grid::voxel_count;
use aomcx_core::types::GridDims;
use aomcx_core::PrepError;

/// Read a whole file into memory.
pub fn read_raw(path: &Path) -> Result<Vec<u8>, PrepError> {
    std::fs::read(path).map_err(|source| PrepError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a headerless volume file: one medium byte per voxel.
///
/// The byte count must match `dims` exactly. Medium indices are validated
/// later, when the bytes are unpacked into a volume store.
pub fn read_volume(path: &Path, dims: GridDims) -> Result<Vec<u8>, PrepError> {
    let expected = voxel_count(dims)?;
    let bytes = read_raw(path)?;
    check_volume_len(&bytes, expected)?;
    log::debug!(
        "loaded volume {} ({} voxels, dims {})",
        path.display(),
        expected,
        dims
    );
    Ok(bytes)
}

fn check_volume_len(bytes: &[u8], expected: usize) -> Result<(), PrepError> {
    if bytes.len() != expected {
        return Err(PrepError::VolumeLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Write packed voxel bytes as a headerless volume file.
pub fn write_volume(path: &Path, bytes: &[u8]) -> Result<(), PrepError> {
    std::fs::write(path, bytes).map_err(|source| PrepError::Write {
        path: path.to_path_buf(),
        source,
    })
}
