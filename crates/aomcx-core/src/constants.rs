//! Shared constants for domain preparation and the transport kernel.
//! The packed-byte masks must stay in sync with the kernel's voxel decoding.

/// Bit set in a packed voxel byte when the voxel belongs to a detector footprint.
pub const DET_MASK: u8 = 0x80;

/// Bits of a packed voxel byte holding the medium index.
pub const MED_MASK: u8 = 0x7F;

/// Shift of the detector flag inside a packed voxel byte.
pub const DET_FLAG_SHIFT: u32 = 7;

/// Maximum number of media (air included) addressable with 7 index bits.
pub const MAX_MEDIA: usize = 128;

/// Maximum number of detectors the kernel tracks.
pub const MAX_DETECTORS: usize = 256;

/// Medium index reserved for background/air.
pub const AIR: u8 = 0;

/// Width of the zero halo around the padded masking volume.
pub const HALO: u32 = 1;

/// Sub-voxel step of the detector footprint scan, in grid units.
pub const SAMPLE_STEP: f32 = 0.5;

/// Corner-distance margin added to a detector radius (rounded-up sqrt(3)).
/// The exact historical value is kept; detection statistics depend on it.
pub const CORNER_MARGIN: f32 = 1.7321;

/// Sentinel for "no corner found yet" in the minimum corner search.
pub const VERY_BIG: f32 = 1e10;

/// Frequencies below this are given in MHz rather than Hz.
pub const MHZ_THRESHOLD: f32 = 1e3;

/// Wavelengths above this are given in nm rather than m.
pub const NM_THRESHOLD: f32 = 1.0;

/// File extension of the diagnostic detector-mask dump.
pub const MASK_EXTENSION: &str = "mask";
