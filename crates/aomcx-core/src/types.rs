use glam::{UVec3, Vec3};

use crate::constants::{AIR, DET_FLAG_SHIFT, DET_MASK, MED_MASK};
use crate::error::PrepError;

/// Grid extent in voxels along x, y and z.
pub type GridDims = UVec3;

/// Newtype for medium indices. 0 = background/air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MediumId(pub u8);

impl MediumId {
    pub const AIR: MediumId = MediumId(AIR);

    pub fn is_air(self) -> bool {
        self.0 == AIR
    }
}

/// Unpacked voxel record.
///
/// At file and kernel boundaries a voxel is a single byte:
///   bit  7      detector flag
///   bits [0:6]  medium index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Voxel {
    pub medium: MediumId,
    pub detector: bool,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        medium: MediumId::AIR,
        detector: false,
    };

    pub fn new(medium: u8) -> Self {
        Self {
            medium: MediumId(medium & MED_MASK),
            detector: false,
        }
    }

    pub fn is_air(self) -> bool {
        self.medium.is_air()
    }

    /// Pack into the single-byte wire form.
    pub fn pack(self) -> u8 {
        ((self.detector as u8) << DET_FLAG_SHIFT) | (self.medium.0 & MED_MASK)
    }

    /// Decode the single-byte wire form.
    pub fn unpack(byte: u8) -> Self {
        Self {
            medium: MediumId(byte & MED_MASK),
            detector: byte & DET_MASK != 0,
        }
    }
}

/// Detector fiber: center in grid units and capture radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detector {
    pub center: Vec3,
    pub radius: f32,
}

impl Detector {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Photon source. `dir` is the launch direction and need not be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    pub pos: Vec3,
    pub dir: Vec3,
}

impl Source {
    pub fn new(pos: Vec3, dir: Vec3) -> Self {
        Self { pos, dir }
    }
}

/// Per-voxel acoustic pressure sample. 16 bytes, repr(C) so a record slice
/// can be viewed as interleaved f32.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AcousticRecord {
    pub px: f32,
    pub py: f32,
    pub pz: f32,
    /// Ultrasound phase.
    pub phase: f32,
}

/// Acoustic pressure grid sharing the volume's flattened indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct AcousticsField {
    dims: GridDims,
    records: Vec<AcousticRecord>,
}

impl AcousticsField {
    pub fn new(dims: GridDims, records: Vec<AcousticRecord>) -> Result<Self, PrepError> {
        let expected = crate::grid::voxel_count(dims)?;
        if records.len() != expected {
            return Err(PrepError::AcousticsLength {
                expected: expected * 4,
                actual: records.len() * 4,
            });
        }
        Ok(Self { dims, records })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn records(&self) -> &[AcousticRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&AcousticRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<AcousticRecord> {
        self.records
    }
}
