use std::fmt::{Display, Formatter};

/// Result that can be returned which holds either T or an Error
pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<T: Copy> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl Size<u32> {
    /// Number of pixels covered by this size
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The larger of both extents
    pub fn max_extent(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl<T: Copy + Display> Display for Size<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_display() {
        assert_eq!(Size::new(64u32, 32).to_string(), "64x32");
    }

    #[test]
    fn size_area() {
        assert_eq!(Size::new(128u32, 64).area(), 8192);
        assert_eq!(Size::new(3u32, 9).max_extent(), 9);
        assert!(Size::new(0u32, 9).is_empty());
        assert!(Size::new(4u32, 0).is_empty());
        assert!(!Size::new(1u32, 1).is_empty());
    }
}
