//! Proportional downsizing to a bounded dimension.
//!
//! The scale factor is `min(max_dim / width, max_dim / height)`. Images that already fit are
//! passed through untouched, larger images are resampled to the truncated scaled size.

use crate::pixmap::Image;
use derive_more::Display;
use image::imageops::{self, FilterType};
use imgembed_shared::errors::{EmbedResult, Error};
use imgembed_shared::types::Size;
use log::debug;
use std::num::NonZeroU32;
use std::str::FromStr;

pub const DEFAULT_MAX_DIM: u32 = 64;

/// Upper bound for both sides of the resized image. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct MaxDim(NonZeroU32);

impl MaxDim {
    pub fn new(value: i64) -> EmbedResult<Self> {
        if value <= 0 {
            return Err(Error::InvalidArgument(format!(
                "max_dim must be positive, got {value}"
            )));
        }

        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| Error::InvalidArgument(format!("max_dim {value} is too large")))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for MaxDim {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(DEFAULT_MAX_DIM - 1))
    }
}

/// The optional max dimension as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxDimArg {
    /// Nothing given, use the default
    Missing,
    /// A number, not yet validated
    Parsed(i64),
    /// Not a number. Callers warn and fall back to the default.
    Invalid(String),
}

impl MaxDimArg {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Missing,
            Some(raw) => match parse_integer(raw) {
                Some(value) => Self::Parsed(value),
                None => Self::Invalid(raw.to_string()),
            },
        }
    }
}

/// Integer with optional surrounding whitespace and sign. Single underscores may group
/// digits, as in `1_000`.
fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let valid = digits
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !valid {
        return None;
    }
    raw.replace('_', "").parse().ok()
}

/// Resampling filter used when an image has to shrink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ResizeFilter {
    #[display("nearest")]
    Nearest,
    #[display("triangle")]
    Triangle,
    #[default]
    #[display("catmullrom")]
    CatmullRom,
    #[display("gaussian")]
    Gaussian,
    #[display("lanczos3")]
    Lanczos3,
}

impl FromStr for ResizeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "linear" | "bilinear" => Ok(Self::Triangle),
            "catmullrom" | "cubic" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(Error::InvalidArgument(format!("unknown resize filter: {s}"))),
        }
    }
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Outcome of [`resize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resized {
    /// The image already fit and is returned as is
    Unchanged(Image),
    /// The image was resampled down from `original`
    Scaled { image: Image, original: Size<u32> },
}

impl Resized {
    pub fn image(&self) -> &Image {
        match self {
            Self::Unchanged(image) | Self::Scaled { image, .. } => image,
        }
    }

    pub fn into_image(self) -> Image {
        match self {
            Self::Unchanged(image) | Self::Scaled { image, .. } => image,
        }
    }

    pub fn is_scaled(&self) -> bool {
        matches!(self, Self::Scaled { .. })
    }
}

/// Returns the downsized dimensions for `size`, or `None` when it already fits within
/// `max_dim`. Truncated sides are kept at least one pixel wide.
pub fn scaled_size(size: Size<u32>, max_dim: MaxDim) -> EmbedResult<Option<Size<u32>>> {
    if size.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "cannot resize an image of {size}"
        )));
    }

    let max = f64::from(max_dim.get());
    let scale = (max / f64::from(size.width)).min(max / f64::from(size.height));
    if scale >= 1.0 {
        return Ok(None);
    }

    let width = ((f64::from(size.width) * scale) as u32).max(1);
    let height = ((f64::from(size.height) * scale) as u32).max(1);

    Ok(Some(Size::new(width, height)))
}

pub fn resize(image: Image, max_dim: MaxDim, filter: ResizeFilter) -> EmbedResult<Resized> {
    let original = image.size();
    let Some(target) = scaled_size(original, max_dim)? else {
        debug!("{original} fits within {max_dim}, not resizing");
        return Ok(Resized::Unchanged(image));
    };

    debug!("resizing {original} to {target} with {filter} filter");
    let buffer = imageops::resize(
        &image.to_rgb(),
        target.width,
        target.height,
        filter.into(),
    );

    Ok(Resized::Scaled {
        image: Image::from_rgb(&buffer),
        original,
    })
}
