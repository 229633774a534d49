//! Writes an image as a function literal that rebuilds it at compile time.
//!
//! The generated text looks like this:
//!
//! ```text
//! ///| Generated image data from sprite.png
//! fn get_parsed_image() -> Image {
//!   let width = 2
//!   let height = 1
//!   let pixels = [
//!     RgbaColor::{ r: 255, g: 0, b: 0 },
//!     RgbaColor::{ r: 0, g: 0, b: 255 },
//!   ]
//!   Image::{ pixels, width, height }
//! }
//! ```
//!
//! The consuming compiler relies on this exact layout.

use crate::pixmap::{Color, Image};
use imgembed_shared::errors::{EmbedResult, Error};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub(crate) const COMMENT_PREFIX: &str = "///| Generated image data from ";
pub(crate) const FUNCTION_OPEN: &str = "fn get_parsed_image() -> Image {";
pub(crate) const WIDTH_PREFIX: &str = "  let width = ";
pub(crate) const HEIGHT_PREFIX: &str = "  let height = ";
pub(crate) const PIXELS_OPEN: &str = "  let pixels = [";
pub(crate) const PIXEL_PREFIX: &str = "    RgbaColor::{ ";
pub(crate) const PIXEL_SUFFIX: &str = " },";
pub(crate) const PIXELS_CLOSE: &str = "  ]";
pub(crate) const CONSTRUCTOR: &str = "  Image::{ pixels, width, height }";
pub(crate) const FUNCTION_CLOSE: &str = "}";

/// Name of the source image as written in the header comment
pub fn source_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// Renders the literal for `image` into `out`
pub fn write_literal<W: Write>(image: &Image, source_name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "{COMMENT_PREFIX}{source_name}")?;
    writeln!(out, "{FUNCTION_OPEN}")?;
    writeln!(out, "{WIDTH_PREFIX}{}", image.width())?;
    writeln!(out, "{HEIGHT_PREFIX}{}", image.height())?;
    writeln!(out, "{PIXELS_OPEN}")?;
    for Color { r, g, b } in image.pixels() {
        writeln!(out, "{PIXEL_PREFIX}r: {r}, g: {g}, b: {b}{PIXEL_SUFFIX}")?;
    }
    writeln!(out, "{PIXELS_CLOSE}")?;
    writeln!(out, "{CONSTRUCTOR}")?;
    writeln!(out, "{FUNCTION_CLOSE}")
}

/// Renders the literal into a string
pub fn render_literal(image: &Image, source_name: &str) -> String {
    let mut buf = Vec::with_capacity(64 * (image.pixels().len() + 10));
    // writing into a Vec cannot fail
    let _ = write_literal(image, source_name, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes the literal for `image` to `output`, replacing any existing file. The parent
/// directory must exist.
pub fn emit(image: &Image, input: &Path, output: &Path) -> EmbedResult<()> {
    let write_error = |source: io::Error| Error::Write {
        path: output.to_path_buf(),
        source,
    };

    let file = File::create(output).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    write_literal(image, &source_name(input), &mut writer).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    debug!(
        "wrote {} pixels for {} to {}",
        image.pixels().len(),
        image.size(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_pixels() -> Image {
        Image::new(2, 1, vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]).unwrap()
    }

    #[test]
    fn exact_layout() {
        let text = render_literal(&two_pixels(), "sprite.png");
        assert_eq!(
            text,
            "///| Generated image data from sprite.png\n\
             fn get_parsed_image() -> Image {\n\
             \x20 let width = 2\n\
             \x20 let height = 1\n\
             \x20 let pixels = [\n\
             \x20   RgbaColor::{ r: 255, g: 0, b: 0 },\n\
             \x20   RgbaColor::{ r: 0, g: 0, b: 255 },\n\
             \x20 ]\n\
             \x20 Image::{ pixels, width, height }\n\
             }\n"
        );
    }

    #[test]
    fn one_line_per_pixel() {
        let image = Image::filled(5, 3, Color::new(1, 2, 3));
        let text = render_literal(&image, "x.png");
        let pixel_lines = text.lines().filter(|l| l.starts_with(PIXEL_PREFIX)).count();
        assert_eq!(pixel_lines, 15);
    }

    #[test]
    fn source_names() {
        assert_eq!(source_name(Path::new("assets/art/logo.png")), "logo.png");
        assert_eq!(source_name(Path::new("logo.png")), "logo.png");
        assert_eq!(source_name(Path::new("/")), "/");
    }

    #[test]
    fn emit_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("image.mbt");
        std::fs::write(&output, "stale contents that are much longer than the literal").unwrap();

        let image = Image::filled(1, 1, Color::new(9, 8, 7));
        emit(&image, Path::new("in/dot.png"), &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text, render_literal(&image, "dot.png"));
    }

    #[test]
    fn emit_needs_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("image.mbt");

        let err = emit(&two_pixels(), Path::new("a.png"), &output).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!output.exists());
    }
}
