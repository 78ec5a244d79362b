//! Utility functions

pub mod crypto;
pub mod encode;
pub mod safe;
pub mod time;

pub use encode::Params;
pub use safe::*;
