use std::path::PathBuf;

use glam::{UVec3, Vec3};
use thiserror::Error;

use crate::constants::{MAX_DETECTORS, MAX_MEDIA};

/// Broad classification of a [`PrepError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable, unwritable or short.
    Io,
    /// Source position outside the grid or not relocatable.
    Domain,
    /// Inputs inconsistent with the declared configuration.
    Config,
    /// Allocation failure or an unaddressable grid.
    Resource,
}

/// Errors that abort domain preparation. None of them are recoverable.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("acoustics data holds {actual} floats, expected {expected}")]
    AcousticsLength { expected: usize, actual: usize },

    #[error("source position {0} is outside of the volume")]
    SourceOutside(Vec3),

    #[error("searching non-zero voxel failed along the incident vector from {start}, left the volume at {exit}")]
    SourceSearchExhausted { start: Vec3, exit: Vec3 },

    #[error("grid dimensions must all be nonzero, got {0}")]
    EmptyGrid(UVec3),

    #[error("volume data holds {actual} bytes, expected {expected} for the specified dimensions")]
    VolumeLength { expected: usize, actual: usize },

    #[error("medium index {index} at voxel {voxel} exceeds the {count} specified medium types")]
    MediumOutOfRange { index: u8, voxel: UVec3, count: usize },

    #[error("input media types ({0}) exceed the maximum ({max})", max = MAX_MEDIA)]
    TooManyMedia(usize),

    #[error("too many detectors ({0}), the maximum is {max}", max = MAX_DETECTORS)]
    TooManyDetectors(usize),

    #[error("detector {index} has an invalid radius {radius}")]
    InvalidDetectorRadius { index: usize, radius: f32 },

    #[error("anisotropic voxels are not supported (steps {0})")]
    AnisotropicVoxels(Vec3),

    #[error("incorrect time gate settings: start {start}, end {end}, step {step}")]
    InvalidTimeGates { start: f32, end: f32, step: f32 },

    #[error("a binary volume file is required to prepare the domain")]
    MissingVolume,

    #[error("failed to parse domain manifest: {0}")]
    ManifestParse(String),

    #[error("cannot allocate {0} elements")]
    Alloc(usize),

    #[error("grid {0} exceeds addressable memory")]
    GridOverflow(UVec3),
}

impl PrepError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrepError::Read { .. } | PrepError::Write { .. } | PrepError::AcousticsLength { .. } => {
                ErrorKind::Io
            }
            PrepError::SourceOutside(_) | PrepError::SourceSearchExhausted { .. } => {
                ErrorKind::Domain
            }
            PrepError::EmptyGrid(_)
            | PrepError::VolumeLength { .. }
            | PrepError::MediumOutOfRange { .. }
            | PrepError::TooManyMedia(_)
            | PrepError::TooManyDetectors(_)
            | PrepError::InvalidDetectorRadius { .. }
            | PrepError::AnisotropicVoxels(_)
            | PrepError::InvalidTimeGates { .. }
            | PrepError::MissingVolume
            | PrepError::ManifestParse(_) => ErrorKind::Config,
            PrepError::Alloc(_) | PrepError::GridOverflow(_) => ErrorKind::Resource,
        }
    }
}

/// Allocate an empty vector able to hold `len` elements without reallocating.
pub fn try_alloc<T>(len: usize) -> Result<Vec<T>, PrepError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| PrepError::Alloc(len))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            PrepError::SourceOutside(Vec3::new(-1.0, 0.0, 0.0)).kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            PrepError::VolumeLength {
                expected: 8,
                actual: 7
            }
            .kind(),
            ErrorKind::Config
        );
        assert_eq!(
            PrepError::AcousticsLength {
                expected: 32,
                actual: 31
            }
            .kind(),
            ErrorKind::Io
        );
        assert_eq!(PrepError::Alloc(1).kind(), ErrorKind::Resource);
    }

    #[test]
    fn test_message_names_voxel() {
        let err = PrepError::MediumOutOfRange {
            index: 9,
            voxel: UVec3::new(1, 2, 3),
            count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("medium index 9"));
        assert!(msg.contains("[1, 2, 3]"));
    }

    #[test]
    fn test_try_alloc_capacity() {
        let v: Vec<u8> = try_alloc(64).expect("small allocation");
        assert!(v.capacity() >= 64);
        assert!(v.is_empty());
    }
}
