//! Safe temporal span types and functions.

mod common;

pub use span::*;
pub mod span;

pub use se::*;
pub mod se;

pub use sd::*;
pub mod sd;

pub use overlap::*;
pub mod overlap;

pub mod prelude {
    pub use crate::span::{Span, SpanFloat, SpanNum};
}
