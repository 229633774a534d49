//! The load, resize and emit pipeline.

use crate::emitter;
use crate::loader;
use crate::pixmap::Image;
use crate::resizer::{self, MaxDim, ResizeFilter, Resized};
use imgembed_config::config;
use imgembed_shared::errors::EmbedResult;
use imgembed_shared::types::Size;
use std::path::Path;
use std::str::FromStr;

/// Summary of a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertReport {
    /// Size of the decoded input
    pub original: Size<u32>,
    /// Size written to the literal
    pub output: Size<u32>,
    pub resized: bool,
}

/// Converts image files into pixel literals. The stages can be run one by one when a caller
/// wants to report progress in between, or all at once through [`Converter::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Converter {
    max_dim: MaxDim,
    filter: ResizeFilter,
}

impl Converter {
    pub fn new(max_dim: MaxDim, filter: ResizeFilter) -> Self {
        Self { max_dim, filter }
    }

    /// Converter with `convert.max_dim` and `convert.filter` from the config store
    pub fn from_config() -> EmbedResult<Self> {
        let max_dim = i64::try_from(config!(uint "convert.max_dim")).unwrap_or(i64::MAX);
        Ok(Self {
            max_dim: MaxDim::new(max_dim)?,
            filter: ResizeFilter::from_str(&config!(string "convert.filter"))?,
        })
    }

    pub fn with_max_dim(self, max_dim: MaxDim) -> Self {
        Self { max_dim, ..self }
    }

    pub fn max_dim(&self) -> MaxDim {
        self.max_dim
    }

    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }

    pub fn load(&self, input: &Path) -> EmbedResult<Image> {
        loader::load(input)
    }

    pub fn resize(&self, image: Image) -> EmbedResult<Resized> {
        resizer::resize(image, self.max_dim, self.filter)
    }

    pub fn emit(&self, image: &Image, input: &Path, output: &Path) -> EmbedResult<()> {
        emitter::emit(image, input, output)
    }

    /// Runs all stages. Nothing is written when loading or resizing fails.
    pub fn convert(&self, input: &Path, output: &Path) -> EmbedResult<ConvertReport> {
        let image = self.load(input)?;
        let original = image.size();

        let resized = self.resize(image)?;
        self.emit(resized.image(), input, output)?;

        Ok(ConvertReport {
            original,
            output: resized.image().size(),
            resized: resized.is_scaled(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reader;
    use image::RgbImage;
    use imgembed_shared::errors::Error;

    #[test]
    fn converts_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("wide.mbt");
        RgbImage::from_fn(200, 50, |x, y| image::Rgb([x as u8, y as u8, 0]))
            .save(&input)
            .unwrap();

        let converter = Converter::new(MaxDim::new(20).unwrap(), ResizeFilter::Triangle);
        let report = converter.convert(&input, &output).unwrap();

        assert_eq!(report.original, Size::new(200, 50));
        assert_eq!(report.output, Size::new(20, 5));
        assert!(report.resized);

        let literal = reader::read_file(&output).unwrap();
        assert_eq!(literal.source, "wide.png");
        assert_eq!(literal.image.size(), report.output);
        assert_eq!(literal.image.pixels().len(), 100);
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mbt");

        let err = Converter::default()
            .convert(&dir.path().join("nope.png"), &output)
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(!output.exists());
    }

    #[test]
    fn defaults_from_config() {
        let converter = Converter::from_config().unwrap();
        assert_eq!(converter.max_dim(), MaxDim::default());
        assert_eq!(converter.filter(), ResizeFilter::CatmullRom);

        let converter = converter.with_max_dim(MaxDim::new(8).unwrap());
        assert_eq!(converter.max_dim().get(), 8);
    }
}
