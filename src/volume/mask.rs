use image::{GrayImage, Luma};

use crate::error::{Result, VolumeError};

const FOREGROUND: u8 = 255;

/// Binary occupancy of one material in one layer, row-major, row 0 on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyMask {
    /// Creates an all-empty mask.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a mask from rows of booleans; short rows are padded with `false`.
    #[must_use]
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut mask = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                mask.set(x, y, filled);
            }
        }
        mask
    }

    /// Mask width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether pixel `(x, y)` is occupied. Out-of-range pixels are empty.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Sets pixel `(x, y)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = filled;
        }
    }

    /// Whether no pixel is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Number of occupied pixels.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// The cells of row `y`.
    #[must_use]
    pub fn row(&self, y: usize) -> &[bool] {
        let start = (y * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Run-length encodes row `y` into half-open `[start, end)` spans of
    /// occupied pixels, left to right.
    #[must_use]
    pub fn row_spans(&self, y: usize) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut open: Option<usize> = None;
        for (x, &filled) in self.row(y).iter().enumerate() {
            match (filled, open) {
                (true, None) => open = Some(x),
                (false, Some(start)) => {
                    spans.push((start, x));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            spans.push((start, self.width));
        }
        spans
    }

    /// Renders the mask as an 8-bit image (occupied = 255).
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::TooLarge`] if a dimension does not fit in `u32`.
    pub fn to_gray_image(&self) -> Result<GrayImage> {
        let w = u32::try_from(self.width).map_err(|_| VolumeError::TooLarge(self.width))?;
        let h = u32::try_from(self.height).map_err(|_| VolumeError::TooLarge(self.height))?;
        Ok(GrayImage::from_fn(w, h, |x, y| {
            if self.get(x as usize, y as usize) {
                Luma([FOREGROUND])
            } else {
                Luma([0])
            }
        }))
    }

    /// Reads a mask back from an 8-bit image (any non-zero pixel is occupied).
    #[must_use]
    pub fn from_gray_image(image: &GrayImage) -> Self {
        let (w, h) = image.dimensions();
        let cells = image.pixels().map(|p| p.0[0] != 0).collect();
        Self::from_cells(w as usize, h as usize, cells)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn row_spans_split_on_gaps() {
        let mask = OccupancyMask::from_rows(&[vec![true, true, false, true, false, true]]);
        assert_eq!(mask.row_spans(0), vec![(0, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn row_spans_of_empty_row() {
        let mask = OccupancyMask::new(4, 1);
        assert!(mask.row_spans(0).is_empty());
        assert!(mask.is_empty());
    }

    #[test]
    fn gray_image_round_trip_preserves_cells() {
        let mask = OccupancyMask::from_rows(&[vec![true, false], vec![false, true]]);
        let image = mask.to_gray_image().unwrap();
        assert_eq!(image.get_pixel(0, 0).0[0], 255);
        assert_eq!(image.get_pixel(1, 0).0[0], 0);
        assert_eq!(OccupancyMask::from_gray_image(&image), mask);
    }
}
