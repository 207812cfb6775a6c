//! FLIP layout animation, scale compensation and keyed enter/exit
//! reconciliation, independent of any particular rendering environment.

pub mod animation;
pub mod error;
pub mod host;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Result, StyleParseError};
pub use host::{LayoutHost, PointerEvents, StyleWrite, TransformWrite};
