//! RON domain manifest and its validation into a preparation plan.
//!
//! A manifest names the input files and carries everything the transport
//! kernel needs to know about the domain. Example:
//!
//! ```ron
//! (
//!     session: "slab",
//!     volume_file: Some("slab.bin"),
//!     dims: (60, 60, 60),
//!     source: (pos: (30.0, 30.0, 1.0), dir: (0.0, 0.0, 1.0)),
//!     media: [(mus: 10.0, g: 0.9, mua: 0.005, n: 1.37)],
//!     detectors: [(pos: (30.0, 40.0, 1.0))],
//! )
//! ```

use std::path::{Path, PathBuf};

use aomcx_core::constants::MAX_DETECTORS;
use aomcx_core::media::{AcousticConstants, Medium, MediumTable, OpticalConstants};
use aomcx_core::types::{Detector, GridDims, Source};
use aomcx_core::PrepError;
use aomcx_domain::{DomainFiles, Layout, PrepOptions};
use aomcx_io::read_raw;
use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

/// How positions in the manifest count voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Origin {
    /// The first voxel spans [1, 2) (Matlab convention).
    #[default]
    OneBased,
    /// The first voxel spans [0, 1).
    ZeroBased,
}

impl Origin {
    fn shift(self) -> Vec3 {
        match self {
            Origin::OneBased => Vec3::ONE,
            Origin::ZeroBased => Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub pos: [f32; 3],
    pub dir: [f32; 3],
    /// Half-width of the photon cache box around the source. Negative keeps
    /// the manifest's explicit `cache_box`.
    #[serde(default)]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorEntry {
    pub pos: [f32; 3],
    /// Falls back to the manifest's `detector_radius`.
    #[serde(default)]
    pub radius: Option<f32>,
}

/// Time window of the simulation, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGates {
    pub start: f32,
    pub end: f32,
    pub step: f32,
}

impl Default for TimeGates {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 5e-9,
            step: 5e-9,
        }
    }
}

impl TimeGates {
    /// Number of gates in the window.
    pub fn count(&self) -> Result<u32, PrepError> {
        let invalid = PrepError::InvalidTimeGates {
            start: self.start,
            end: self.end,
            step: self.step,
        };
        if self.start > self.end || self.step == 0.0 {
            return Err(invalid);
        }
        let gates = ((self.end - self.start) / self.step).round();
        if !gates.is_finite() || gates < 0.0 {
            return Err(invalid);
        }
        Ok(gates as u32)
    }
}

/// Inclusive voxel box in which the kernel caches photon weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheBox {
    pub min: [u32; 3],
    pub max: [u32; 3],
}

impl CacheBox {
    /// Box of half-width `radius` around `center`, clamped to the grid.
    /// Zero radius gives the empty box; negative radius keeps `explicit`.
    pub fn around(center: Vec3, radius: f32, dims: GridDims, explicit: CacheBox) -> Self {
        if radius < 0.0 {
            return explicit;
        }
        if radius == 0.0 {
            return Self::default();
        }
        let lo = (center - Vec3::splat(radius)).max(Vec3::ZERO);
        let hi = center + Vec3::splat(radius);
        let last = dims.saturating_sub(UVec3::ONE);
        Self {
            min: [lo.x as u32, lo.y as u32, lo.z as u32],
            max: [
                (hi.x.max(0.0) as u32).min(last.x),
                (hi.y.max(0.0) as u32).min(last.y),
                (hi.z.max(0.0) as u32).min(last.z),
            ],
        }
    }
}

/// Settings passed through to the transport kernel untouched by domain
/// preparation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KernelSettings {
    pub time: TimeGates,
    pub gates: u32,
    pub max_gates: u32,
    pub cache_box: CacheBox,
    pub acoustic: AcousticConstants,
    pub optical: OpticalConstants,
}

fn default_session() -> String {
    "default".to_string()
}

fn default_disk_layout() -> Layout {
    Layout::RowMajor
}

fn default_step() -> [f32; 3] {
    [1.0; 3]
}

fn default_detector_radius() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Domain description read from a RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainManifest {
    #[serde(default = "default_session")]
    pub session: String,
    /// Directory that relative file names resolve against.
    #[serde(default)]
    pub root: PathBuf,
    #[serde(default)]
    pub volume_file: Option<PathBuf>,
    #[serde(default)]
    pub acoustics_file: Option<PathBuf>,
    /// Storage order of the volume and acoustics files.
    #[serde(default = "default_disk_layout")]
    pub layout: Layout,
    pub dims: [u32; 3],
    /// Voxel edge length in mm along each axis.
    #[serde(default = "default_step")]
    pub step: [f32; 3],
    #[serde(default)]
    pub origin: Origin,
    pub source: SourceEntry,
    /// Declared media; air is added as medium 0.
    pub media: Vec<Medium>,
    #[serde(default = "default_detector_radius")]
    pub detector_radius: f32,
    #[serde(default)]
    pub detectors: Vec<DetectorEntry>,
    #[serde(default)]
    pub acoustic: AcousticConstants,
    #[serde(default)]
    pub optical: OpticalConstants,
    #[serde(default)]
    pub time: TimeGates,
    #[serde(default)]
    pub max_gates: Option<u32>,
    #[serde(default)]
    pub cache_box: CacheBox,
    #[serde(default = "default_true")]
    pub save_detectors: bool,
    #[serde(default)]
    pub dump_mask: bool,
}

/// A validated manifest: zero-based positions in grid units, media scaled
/// to the grid unit, resolved paths.
#[derive(Debug, Clone)]
pub struct PrepPlan {
    pub files: DomainFiles,
    pub dims: GridDims,
    pub source: Source,
    pub detectors: Vec<Detector>,
    pub media: MediumTable,
    pub unit_in_mm: f32,
    pub options: PrepOptions,
    pub kernel: KernelSettings,
}

/// Parse a manifest from RON text.
pub fn parse_manifest(ron_str: &str) -> Result<DomainManifest, PrepError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| PrepError::ManifestParse(e.to_string()))
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<DomainManifest, PrepError> {
    let bytes = read_raw(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| PrepError::ManifestParse(format!("{}: {e}", path.display())))?;
    parse_manifest(&text)
}

impl DomainManifest {
    /// Validate the manifest and convert it into a plan.
    pub fn resolve(self) -> Result<PrepPlan, PrepError> {
        let volume = self.volume_file.ok_or(PrepError::MissingVolume)?;
        let dims = UVec3::from_array(self.dims);
        if dims.cmpeq(UVec3::ZERO).any() {
            return Err(PrepError::EmptyGrid(dims));
        }

        let step = Vec3::from_array(self.step);
        if step.x != step.y || step.y != step.z {
            return Err(PrepError::AnisotropicVoxels(step));
        }
        let unit_in_mm = step.x;

        let mut media = MediumTable::with_air(&self.media)?;
        media.scale_to_unit(unit_in_mm);

        let shift = self.origin.shift();
        let source = Source::new(
            Vec3::from_array(self.source.pos) - shift,
            Vec3::from_array(self.source.dir),
        );

        if self.detectors.len() > MAX_DETECTORS {
            return Err(PrepError::TooManyDetectors(self.detectors.len()));
        }
        // No footprint can usefully exceed the grid diagonal
        let max_radius = dims.as_vec3().length();
        let mut detectors = Vec::with_capacity(self.detectors.len());
        for (i, det) in self.detectors.iter().enumerate() {
            let radius = det.radius.unwrap_or(self.detector_radius);
            if !radius.is_finite() || radius < 0.0 || radius > max_radius {
                return Err(PrepError::InvalidDetectorRadius {
                    index: i + 1,
                    radius,
                });
            }
            detectors.push(Detector::new(Vec3::from_array(det.pos) - shift, radius));
        }

        let save_detectors = self.save_detectors && !detectors.is_empty();
        if self.save_detectors && !save_detectors {
            log::debug!("no detectors declared, detector saving disabled");
        }

        let gates = self.time.count()?;
        let kernel = KernelSettings {
            time: self.time,
            gates,
            max_gates: self.max_gates.map_or(gates, |m| m.min(gates)),
            cache_box: CacheBox::around(source.pos, self.source.radius, dims, self.cache_box),
            acoustic: self.acoustic.normalized(),
            optical: self.optical.normalized(),
        };

        let files = DomainFiles {
            volume: self.root.join(volume),
            layout: self.layout,
            acoustics: self.acoustics_file.map(|p| self.root.join(p)),
        };
        let options = PrepOptions {
            save_detectors,
            dump_mask: self.dump_mask,
            session: self.session,
            output_dir: self.root,
        };

        Ok(PrepPlan {
            files,
            dims,
            source,
            detectors,
            media,
            unit_in_mm,
            options,
            kernel,
        })
    }
}
