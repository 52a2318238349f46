//! Command implementations for seoaio CLI

mod analyze;
mod classify;
mod misc;

pub use analyze::*;
pub use classify::*;
pub use misc::*;
