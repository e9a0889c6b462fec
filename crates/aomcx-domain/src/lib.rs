pub mod context;
pub mod detector;
pub mod layout;
pub mod pipeline;
pub mod source;
pub mod volume;

#[cfg(test)]
mod test_support;

pub use context::{DomainContext, PrepOptions};
pub use detector::{mask_detectors, MaskReport};
pub use layout::Layout;
pub use pipeline::{load_context, prepare, DomainFiles, PrepOutcome, PreparedDomain};
pub use source::place_source;
pub use volume::VolumeStore;
