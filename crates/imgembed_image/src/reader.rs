//! Parses a generated literal back into an image.

use crate::emitter::{
    COMMENT_PREFIX, CONSTRUCTOR, FUNCTION_CLOSE, FUNCTION_OPEN, HEIGHT_PREFIX, PIXELS_CLOSE,
    PIXELS_OPEN, PIXEL_PREFIX, PIXEL_SUFFIX, WIDTH_PREFIX,
};
use crate::pixmap::{Color, Image};
use imgembed_shared::errors::{EmbedResult, Error};
use std::fs;
use std::path::Path;
use std::str::Lines;

/// A parsed literal: the source name from its header comment and the pixel grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLiteral {
    pub source: String,
    pub image: Image,
}

pub fn read_file(path: &Path) -> EmbedResult<ImageLiteral> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    read_literal(&fs::read_to_string(path)?)
}

pub fn read_literal(text: &str) -> EmbedResult<ImageLiteral> {
    let mut cursor = Cursor::new(text);

    let source = cursor.prefixed(COMMENT_PREFIX)?.to_string();
    cursor.exact(FUNCTION_OPEN)?;
    let width = cursor.number(WIDTH_PREFIX)?;
    let height = cursor.number(HEIGHT_PREFIX)?;
    cursor.exact(PIXELS_OPEN)?;

    let mut pixels = Vec::new();
    loop {
        let (line_nr, line) = cursor.next_line()?;
        if line == PIXELS_CLOSE {
            let expected = width as usize * height as usize;
            if pixels.len() != expected {
                return Err(Error::parse(
                    line_nr,
                    format!(
                        "expected {expected} pixels for {width}x{height}, found {}",
                        pixels.len()
                    ),
                ));
            }
            break;
        }

        let color = parse_pixel(line)
            .ok_or_else(|| Error::parse(line_nr, format!("invalid pixel: {line}")))?;
        pixels.push(color);
    }

    cursor.exact(CONSTRUCTOR)?;
    cursor.exact(FUNCTION_CLOSE)?;
    cursor.finish()?;

    Ok(ImageLiteral {
        source,
        image: Image::new(width, height, pixels)?,
    })
}

fn parse_pixel(line: &str) -> Option<Color> {
    let body = line.strip_prefix(PIXEL_PREFIX)?.strip_suffix(PIXEL_SUFFIX)?;
    let mut fields = body.split(", ");

    let r = channel(fields.next()?, "r")?;
    let g = channel(fields.next()?, "g")?;
    let b = channel(fields.next()?, "b")?;
    if fields.next().is_some() {
        return None;
    }

    Some(Color::new(r, g, b))
}

fn channel(field: &str, name: &str) -> Option<u8> {
    field.strip_prefix(name)?.strip_prefix(": ")?.parse().ok()
}

/// Line reader that tracks 1-based line numbers for error messages
struct Cursor<'a> {
    lines: Lines<'a>,
    line_nr: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_nr: 0,
        }
    }

    fn next_line(&mut self) -> EmbedResult<(usize, &'a str)> {
        self.line_nr += 1;
        self.lines
            .next()
            .map(|line| (self.line_nr, line))
            .ok_or_else(|| Error::parse(self.line_nr, "unexpected end of input"))
    }

    fn exact(&mut self, expected: &str) -> EmbedResult<()> {
        let (line_nr, line) = self.next_line()?;
        if line != expected {
            return Err(Error::parse(
                line_nr,
                format!("expected `{expected}`, found `{line}`"),
            ));
        }
        Ok(())
    }

    fn prefixed(&mut self, prefix: &str) -> EmbedResult<&'a str> {
        let (line_nr, line) = self.next_line()?;
        line.strip_prefix(prefix).ok_or_else(|| {
            Error::parse(line_nr, format!("expected `{}`", prefix.trim_end()))
        })
    }

    fn number(&mut self, prefix: &str) -> EmbedResult<u32> {
        let line_nr = self.line_nr + 1;
        let value = self.prefixed(prefix)?;
        value
            .parse()
            .map_err(|_| Error::parse(line_nr, format!("invalid number: {value}")))
    }

    /// Only blank lines may follow the closing brace
    fn finish(&mut self) -> EmbedResult<()> {
        for line in self.lines.by_ref() {
            self.line_nr += 1;
            if !line.trim().is_empty() {
                return Err(Error::parse(
                    self.line_nr,
                    format!("unexpected trailing content: {line}"),
                ));
            }
        }
        Ok(())
    }
}
