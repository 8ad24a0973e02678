//! Tight bounding boxes of foreground pixels.

use crate::canvas::{Canvas, OutOfBoundsError, Point, Region, region_in_bounds};

/// The smallest axis-aligned rectangle containing every foreground pixel found during a scan.
///
/// All four edges are inclusive. A scan that finds no foreground pixel has no [`InkBounds`], which
/// is represented as [`None`] by [`InkBounds::scan()`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct InkBounds {
    /// The leftmost column containing ink.
    pub left: usize,
    /// The rightmost column containing ink.
    pub right: usize,
    /// The topmost row containing ink.
    pub top: usize,
    /// The bottommost row containing ink.
    pub bottom: usize,
}

impl InkBounds {
    /// Creates [`InkBounds`] covering only `point`.
    pub const fn point(point: Point) -> Self {
        Self {
            left: point.x,
            right: point.x,
            top: point.y,
            bottom: point.y,
        }
    }

    /// Grows these [`InkBounds`] so that they also cover `point`.
    pub fn include(&mut self, point: Point) {
        self.left = self.left.min(point.x);
        self.right = self.right.max(point.x);
        self.top = self.top.min(point.y);
        self.bottom = self.bottom.max(point.y);
    }

    /// Returns the number of columns covered by these [`InkBounds`].
    pub const fn width(&self) -> usize {
        self.right - self.left + 1
    }

    /// Returns the columns covered by these [`InkBounds`] as a full-height [`Region`] of a canvas
    /// with `height` rows.
    pub const fn column_window(&self, height: usize) -> Region {
        Region {
            point: Point {
                x: self.left,
                y: 0,
            },
            width: self.width(),
            height,
        }
    }

    /// Scans every pixel of `region` in row-major order and returns the [`InkBounds`] of the
    /// foreground pixels found, or [`None`] if the region holds no ink.
    ///
    /// # Errors
    ///
    /// [`OutOfBoundsError`]: Returned when `region` is not within the bounds of `canvas`.
    pub fn scan<C: Canvas + ?Sized>(
        canvas: &C,
        region: Region,
    ) -> Result<Option<Self>, OutOfBoundsError> {
        if !region_in_bounds(region, canvas.width(), canvas.height()) {
            return Err(OutOfBoundsError);
        }

        let mut bounds: Option<Self> = None;
        for y in region.point.y..region.point.y + region.height {
            for x in region.point.x..region.point.x + region.width {
                let point = Point { x, y };
                if !canvas.pixel(point) {
                    continue;
                }

                match bounds.as_mut() {
                    Some(bounds) => bounds.include(point),
                    None => bounds = Some(Self::point(point)),
                }
            }
        }

        Ok(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Bitmap;

    #[test]
    fn empty_canvas_has_no_bounds() {
        let bitmap = Bitmap::new(32, 8);

        assert_eq!(InkBounds::scan(&bitmap, Region::of(&bitmap)), Ok(None));
    }

    #[test]
    fn bounds_cover_all_ink() {
        let mut bitmap = Bitmap::new(32, 8);
        bitmap.set_pixel(Point { x: 4, y: 6 }, true);
        bitmap.set_pixel(Point { x: 20, y: 1 }, true);
        bitmap.set_pixel(Point { x: 9, y: 3 }, true);

        let bounds = InkBounds::scan(&bitmap, Region::of(&bitmap))
            .unwrap()
            .unwrap();
        assert_eq!(
            bounds,
            InkBounds {
                left: 4,
                right: 20,
                top: 1,
                bottom: 6,
            }
        );
        assert_eq!(bounds.width(), 17);
    }

    #[test]
    fn scan_ignores_ink_outside_region() {
        let mut bitmap = Bitmap::new(32, 8);
        bitmap.set_pixel(Point { x: 1, y: 1 }, true);
        bitmap.set_pixel(Point { x: 10, y: 5 }, true);

        let window = Region {
            point: Point { x: 5, y: 0 },
            width: 10,
            height: 8,
        };
        let bounds = InkBounds::scan(&bitmap, window).unwrap().unwrap();
        assert_eq!(bounds, InkBounds::point(Point { x: 10, y: 5 }));
    }

    #[test]
    fn scan_rejects_region_outside_canvas() {
        let bitmap = Bitmap::new(8, 8);
        let window = Region {
            point: Point { x: 4, y: 0 },
            width: 5,
            height: 8,
        };

        assert_eq!(InkBounds::scan(&bitmap, window), Err(OutOfBoundsError));
    }
}
