//! Image to pixel-literal conversion
//!
//! The conversion runs in three stages:
//!
//! 1. [`loader`] decodes an image file and normalizes it to 8-bit RGB.
//! 2. [`resizer`] scales it down so neither side exceeds a maximum dimension.
//! 3. [`emitter`] writes a source file with a function that rebuilds the pixel grid.
//!
//! [`reader`] parses such a generated file back, [`convert`] strings the stages together.

pub mod convert;
pub mod emitter;
pub mod loader;
pub mod pixmap;
pub mod reader;
pub mod resizer;

pub use crate::convert::{ConvertReport, Converter};
pub use crate::pixmap::{Color, Image};
pub use crate::resizer::{MaxDim, MaxDimArg, ResizeFilter};
