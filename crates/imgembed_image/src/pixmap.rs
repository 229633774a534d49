use image::{Rgb, RgbImage};
use imgembed_shared::errors::{EmbedResult, Error};
use imgembed_shared::types::Size;
use std::fmt::{Display, Formatter};

/// A single 8-bit RGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.r, color.g, color.b])
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Owned pixel grid in row-major order. `pixels.len() == width * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: Size<u32>,
    pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> EmbedResult<Self> {
        let size = Size::new(width, height);
        if pixels.len() != size.area() {
            return Err(Error::InvalidArgument(format!(
                "{size} image needs {} pixels, got {}",
                size.area(),
                pixels.len()
            )));
        }

        Ok(Self { size, pixels })
    }

    /// Image filled with a single color
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            pixels: vec![color; size.area()],
        }
    }

    pub fn from_rgb(buffer: &RgbImage) -> Self {
        Self {
            size: Size::new(buffer.width(), buffer.height()),
            pixels: buffer.pixels().map(|pixel| Color::from(*pixel)).collect(),
        }
    }

    pub fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.size.width, self.size.height, |x, y| {
            Rgb::from(self.pixels[self.index(x, y)])
        })
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.size.width.max(1) as usize)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    #[test]
    fn pixel_count_must_match() {
        assert!(Image::new(2, 2, vec![RED; 4]).is_ok());
        assert!(matches!(
            Image::new(2, 2, vec![RED; 3]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Image::new(0, 5, Vec::new()).is_ok());
    }

    #[test]
    fn row_major_order() {
        let mut buffer = RgbImage::new(3, 2);
        buffer.put_pixel(2, 0, Rgb([255, 0, 0]));
        buffer.put_pixel(0, 1, Rgb([0, 0, 255]));

        let image = Image::from_rgb(&buffer);
        assert_eq!(image.pixels()[2], RED);
        assert_eq!(image.pixels()[3], BLUE);
        assert_eq!(image.pixel(2, 0), Some(RED));
        assert_eq!(image.pixel(0, 1), Some(BLUE));
        assert_eq!(image.pixel(3, 0), None);

        let rows: Vec<_> = image.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], BLUE);

        assert_eq!(image.to_rgb(), buffer);
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::new(255, 16, 0).to_string(), "#ff1000");
        assert_eq!(Image::filled(4, 3, RED).pixels().len(), 12);
    }
}
