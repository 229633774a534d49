//! Decodes image files into RGB pixel grids.

use crate::pixmap::Image;
use image::{ImageError, ImageReader};
use imgembed_shared::errors::{EmbedResult, Error};
use log::debug;
use std::path::Path;

/// Loads the image at `path`. The format is sniffed from the file contents; alpha and any
/// extra channels are dropped.
pub fn load(path: &Path) -> EmbedResult<Image> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let decode_error = |source: ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| decode_error(ImageError::IoError(err)))?
        .decode()
        .map_err(decode_error)?;

    debug!(
        "decoded {} as {:?} ({}x{})",
        path.display(),
        decoded.color(),
        decoded.width(),
        decoded.height()
    );

    Ok(Image::from_rgb(&decoded.to_rgb8()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pixmap::Color;
    use image::{Rgba, RgbaImage};

    #[test]
    fn loads_png_and_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");

        let mut buffer = RgbaImage::new(4, 2);
        buffer.put_pixel(1, 0, Rgba([10, 20, 30, 0]));
        buffer.put_pixel(3, 1, Rgba([200, 100, 50, 255]));
        buffer.save(&path).unwrap();

        let image = load(&path).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 2);
        assert_eq!(image.pixels().len(), 8);
        assert_eq!(image.pixel(1, 0), Some(Color::new(10, 20, 30)));
        assert_eq!(image.pixel(3, 1), Some(Color::new(200, 100, 50)));
    }

    #[test]
    fn sniffs_format_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("tile.png");
        image::RgbImage::new(3, 3).save(&png).unwrap();

        let renamed = dir.path().join("tile.data");
        std::fs::rename(&png, &renamed).unwrap();

        assert_eq!(load(&renamed).unwrap().width(), 3);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
