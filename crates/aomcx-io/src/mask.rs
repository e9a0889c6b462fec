use std::path::{Path, PathBuf};

use aomcx_core::constants::MASK_EXTENSION;
use aomcx_core::PrepError;

use crate::volume::write_volume;

/// Path of the detector-mask dump for a session: `<session>.mask`.
pub fn mask_path(dir: &Path, session: &str) -> PathBuf {
    dir.join(format!("{session}.{MASK_EXTENSION}"))
}

/// Dump the flagged volume (packed bytes, column-major) for inspection.
pub fn write_mask(path: &Path, packed: &[u8]) -> Result<(), PrepError> {
    write_volume(path, packed)?;
    log::info!("wrote detector mask to {} ({} bytes)", path.display(), packed.len());
    Ok(())
}
