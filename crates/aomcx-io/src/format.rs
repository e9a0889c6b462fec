/// Magic bytes identifying a detected-photon history file.
pub const HISTORY_MAGIC: [u8; 4] = *b"MCXH";

/// Current history format version.
pub const HISTORY_VERSION: u32 = 1;

/// Size of the history header in bytes.
pub const HISTORY_HEADER_SIZE: usize = 64;

/// Extra per-photon columns beyond one partial path length per medium.
const EXTRA_COLUMNS: u32 = 3;

/// Header of the detected-photon history file written by the transport
/// kernel. Fixed 64 bytes, repr(C) for byte-level serialization.
///
/// Domain preparation fills the geometry fields; the photon counters stay
/// zero until the kernel has run.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HistoryHeader {
    pub magic: [u8; 4],
    pub version: u32,
    /// Highest medium index (air excluded from the count).
    pub maxmedia: u32,
    pub detnum: u32,
    /// Floats per detected photon record.
    pub colcount: u32,
    pub totalphoton: u32,
    pub detected: u32,
    pub savedphoton: u32,
    pub unitinmm: f32,
    pub reserved: [u32; 7],
}

impl HistoryHeader {
    /// Header for a domain with `media` media (air included) and `detectors` detectors.
    pub fn for_domain(media: usize, detectors: usize, unit_in_mm: f32) -> Self {
        let media = media as u32;
        Self {
            magic: HISTORY_MAGIC,
            version: HISTORY_VERSION,
            maxmedia: media.saturating_sub(1),
            detnum: detectors as u32,
            colcount: media + EXTRA_COLUMNS,
            totalphoton: 0,
            detected: 0,
            savedphoton: 0,
            unitinmm: unit_in_mm,
            reserved: [0; 7],
        }
    }

    pub fn to_bytes(&self) -> [u8; HISTORY_HEADER_SIZE] {
        let mut out = [0u8; HISTORY_HEADER_SIZE];
        out.copy_from_slice(bytemuck::bytes_of(self));
        out
    }

    /// Parse a header from the first 64 bytes. None if too short or the magic is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HISTORY_HEADER_SIZE {
            return None;
        }
        let header: Self = bytemuck::pod_read_unaligned(&bytes[..HISTORY_HEADER_SIZE]);
        (header.magic == HISTORY_MAGIC).then_some(header)
    }
}
