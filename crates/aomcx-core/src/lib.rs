pub mod constants;
pub mod direction;
pub mod error;
pub mod grid;
pub mod media;
pub mod types;

pub use error::{ErrorKind, PrepError};
pub use types::{AcousticRecord, AcousticsField, Detector, GridDims, MediumId, Source, Voxel};
