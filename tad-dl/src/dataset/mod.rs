//! Dataset processing toolkit.

mod anchors;
mod annotation;
mod dataset_;
mod features;
mod record;
mod supervision;
mod video;

pub use anchors::*;
pub use annotation::*;
pub use dataset_::*;
pub use features::*;
pub use record::*;
pub use supervision::*;
pub use video::*;
