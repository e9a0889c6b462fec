//! The preparation sequence run once before transport:
//! layout normalization, acoustics, source placement, detector masking
//! and the optional mask dump.

use std::path::PathBuf;

use aomcx_core::media::MediumTable;
use aomcx_core::types::{AcousticsField, Detector, GridDims, Source};
use aomcx_core::PrepError;
use aomcx_io::{load_acoustics, mask_path, read_volume, write_mask, HistoryHeader};

use crate::context::DomainContext;
use crate::detector::{mask_detectors, MaskReport};
use crate::layout::{self, Layout};
use crate::source::place_source;
use crate::volume::VolumeStore;

/// Input files of a domain. The acoustics file shares the volume's storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainFiles {
    pub volume: PathBuf,
    pub layout: Layout,
    pub acoustics: Option<PathBuf>,
}

/// Result of a successful preparation run.
#[derive(Debug)]
pub enum PrepOutcome {
    /// Domain ready for the transport kernel.
    Ready(PreparedDomain),
    /// The detector mask was written and the run is over.
    MaskDumped { path: PathBuf, report: MaskReport },
}

/// Validated domain handed to the transport kernel.
#[derive(Debug, Clone)]
pub struct PreparedDomain {
    /// Column-major volume with detector flags set.
    pub volume: VolumeStore,
    /// Acoustic records in the volume's column-major order.
    pub acoustics: Option<AcousticsField>,
    pub source: Source,
    /// Source as given, before relocation.
    pub initial_source: Source,
    pub detectors: Vec<Detector>,
    pub media: MediumTable,
    pub unit_in_mm: f32,
    pub report: MaskReport,
    pub history: HistoryHeader,
}

impl PreparedDomain {
    /// Packed volume bytes as the kernel reads them.
    pub fn packed_volume(&self) -> Vec<u8> {
        self.volume.to_packed()
    }

    pub fn source_moved(&self) -> bool {
        self.source.pos != self.initial_source.pos
    }
}

/// Load the volume and acoustics files into a fresh context.
///
/// Medium indices are validated against `media`, which must already hold air.
pub fn load_context(
    files: &DomainFiles,
    dims: GridDims,
    source: Source,
    media: MediumTable,
) -> Result<DomainContext, PrepError> {
    let bytes = read_volume(&files.volume, dims)?;
    let volume = VolumeStore::from_packed(dims, &bytes, media.len(), files.layout)?;
    drop(bytes);

    let mut ctx = DomainContext::new(volume, source).with_media(media);
    if let Some(path) = &files.acoustics {
        ctx = ctx.with_acoustics(load_acoustics(path, dims)?);
    }
    Ok(ctx)
}

/// Run every preparation stage on `ctx`.
pub fn prepare(ctx: DomainContext) -> Result<PrepOutcome, PrepError> {
    let DomainContext {
        mut volume,
        acoustics,
        source,
        detectors,
        media,
        unit_in_mm,
        options,
    } = ctx;

    let stored_as = volume.layout();
    volume.normalize_layout()?;
    let dims = volume.dims();

    let acoustics = match acoustics {
        Some(field) => Some(normalize_acoustics(field, dims, stored_as)?),
        None => None,
    };

    let placed = place_source(source, &volume)?;

    let masked = options.save_detectors && !detectors.is_empty();
    let report = if masked {
        mask_detectors(&mut volume, &detectors)?
    } else {
        MaskReport::default()
    };

    // Dump only follows a masking pass
    if masked && options.dump_mask {
        let path = mask_path(&options.output_dir, &options.session);
        write_mask(&path, &volume.to_packed())?;
        return Ok(PrepOutcome::MaskDumped { path, report });
    }

    let history = HistoryHeader::for_domain(media.len(), detectors.len(), unit_in_mm);
    Ok(PrepOutcome::Ready(PreparedDomain {
        volume,
        acoustics,
        source: placed,
        initial_source: source,
        detectors,
        media,
        unit_in_mm,
        report,
        history,
    }))
}

fn normalize_acoustics(
    field: AcousticsField,
    dims: GridDims,
    stored_as: Layout,
) -> Result<AcousticsField, PrepError> {
    if field.dims() != dims {
        return Err(PrepError::AcousticsLength {
            expected: dims.x as usize * dims.y as usize * dims.z as usize * 4,
            actual: field.len() * 4,
        });
    }
    match stored_as {
        Layout::ColumnMajor => Ok(field),
        Layout::RowMajor => AcousticsField::new(dims, layout::row_to_col(field.into_records(), dims)?),
    }
}
