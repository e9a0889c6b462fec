pub mod acoustics;
pub mod format;
pub mod mask;
pub mod volume;

pub use acoustics::{deinterleave, interleave, load_acoustics};
pub use format::HistoryHeader;
pub use mask::{mask_path, write_mask};
pub use volume::{read_raw, read_volume, write_volume};
