use std::path::PathBuf;

use aomcx_core::media::MediumTable;
use aomcx_core::types::{AcousticsField, Detector, Source};

use crate::volume::VolumeStore;

/// Switches for a preparation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepOptions {
    /// Mask detector footprints into the volume.
    pub save_detectors: bool,
    /// Write `<session>.mask` after masking and stop.
    pub dump_mask: bool,
    pub session: String,
    /// Directory receiving the mask dump.
    pub output_dir: PathBuf,
}

impl Default for PrepOptions {
    fn default() -> Self {
        Self {
            save_detectors: true,
            dump_mask: false,
            session: "default".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Everything the preparation stages read and update, moved from stage to
/// stage. Positions are zero-based grid units.
#[derive(Debug, Clone)]
pub struct DomainContext {
    pub volume: VolumeStore,
    pub acoustics: Option<AcousticsField>,
    pub source: Source,
    pub detectors: Vec<Detector>,
    pub media: MediumTable,
    /// Length of one grid unit in mm.
    pub unit_in_mm: f32,
    pub options: PrepOptions,
}

impl DomainContext {
    pub fn new(volume: VolumeStore, source: Source) -> Self {
        Self {
            volume,
            acoustics: None,
            source,
            detectors: Vec::new(),
            media: MediumTable::default(),
            unit_in_mm: 1.0,
            options: PrepOptions::default(),
        }
    }

    pub fn with_acoustics(mut self, acoustics: AcousticsField) -> Self {
        self.acoustics = Some(acoustics);
        self
    }

    pub fn with_detectors(mut self, detectors: Vec<Detector>) -> Self {
        self.detectors = detectors;
        self
    }

    pub fn with_media(mut self, media: MediumTable) -> Self {
        self.media = media;
        self
    }

    pub fn with_unit(mut self, unit_in_mm: f32) -> Self {
        self.unit_in_mm = unit_in_mm;
        self
    }

    pub fn with_options(mut self, options: PrepOptions) -> Self {
        self.options = options;
        self
    }
}
