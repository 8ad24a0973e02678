//! Monochrome canvas interface used for rasterization and previews.
//!
//! The interface is defined in this module and implemented by [`Bitmap`], an owned one bit per
//! pixel surface.

use alloc::{vec, vec::Vec};
use core::{error, fmt};

/// [`Canvas`] defines the basic interface of a monochrome drawing surface.
///
/// A pixel is either foreground (ink) or background. There are no intermediate values, so
/// "foreground" is an exact predicate.
pub trait Canvas {
    /// The width of the [`Canvas`] in pixels.
    fn width(&self) -> usize;

    /// The height of the [`Canvas`] in pixels.
    fn height(&self) -> usize;

    /// Returns `true` if the pixel at `point` is foreground.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `point` is not in the bounds of this [`Canvas`].
    fn pixel(&self, point: Point) -> bool;

    /// Sets the pixel at `point` to foreground if `foreground` is `true`, background otherwise.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `point` is not in the bounds of this [`Canvas`].
    fn set_pixel(&mut self, point: Point, foreground: bool);

    /// Resets every pixel of the [`Canvas`] to background.
    fn clear(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(Point { x, y }, false);
            }
        }
    }

    /// Returns `true` if the pixel at `point` is foreground.
    ///
    /// # Errors
    ///
    /// [`OutOfBoundsError`]: Returned when the specified `point` is out of bounds.
    fn read_pixel(&self, point: Point) -> Result<bool, OutOfBoundsError> {
        if !point_in_bounds(point, self.width(), self.height()) {
            return Err(OutOfBoundsError);
        }

        Ok(self.pixel(point))
    }

    /// Sets the pixel at `point`.
    ///
    /// # Errors
    ///
    /// [`OutOfBoundsError`]: Returned when the specified `point` is out of bounds.
    fn write_pixel(&mut self, point: Point, foreground: bool) -> Result<(), OutOfBoundsError> {
        if !point_in_bounds(point, self.width(), self.height()) {
            return Err(OutOfBoundsError);
        }

        self.set_pixel(point, foreground);
        Ok(())
    }

    /// Fills the given `region` with the given pixel value.
    ///
    /// # Errors
    ///
    /// [`OutOfBoundsError`]: Returned when the specified `region` is out of bounds.
    fn fill(&mut self, region: Region, foreground: bool) -> Result<(), OutOfBoundsError> {
        if !region_in_bounds(region, self.width(), self.height()) {
            return Err(OutOfBoundsError);
        }

        for y_offset in 0..region.height {
            for x_offset in 0..region.width {
                let point = Point {
                    x: region.point.x + x_offset,
                    y: region.point.y + y_offset,
                };

                self.set_pixel(point, foreground);
            }
        }

        Ok(())
    }
}

/// A requested operation would have been out of bounds.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutOfBoundsError;

impl fmt::Display for OutOfBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "operation out of bounds".fmt(f)
    }
}

impl error::Error for OutOfBoundsError {}

/// Returns `true` if the given `point` is within the given bounds.
pub const fn point_in_bounds(point: Point, width: usize, height: usize) -> bool {
    point.x < width && point.y < height
}

/// Returns `true` if the given `region` is within the given bounds.
pub fn region_in_bounds(region: Region, width: usize, height: usize) -> bool {
    let end_x = region.point.x.checked_add(region.width);
    let end_y = region.point.y.checked_add(region.height);
    if let Some((end_x, end_y)) = end_x.zip(end_y) {
        end_x <= width && end_y <= height
    } else {
        false
    }
}

/// A point in a [`Canvas`].
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    /// The x-coordinate of the pixel.
    pub x: usize,
    /// The y-coordinate of the pixel.
    pub y: usize,
}

/// A region of pixels.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Region {
    /// The upper left corner of the region.
    pub point: Point,
    /// The width of the region in pixels.
    pub width: usize,
    /// The height of the region in pixels.
    pub height: usize,
}

impl Region {
    /// Returns the [`Region`] covering an entire [`Canvas`].
    pub fn of<C: Canvas + ?Sized>(canvas: &C) -> Self {
        Self {
            point: Point { x: 0, y: 0 },
            width: canvas.width(),
            height: canvas.height(),
        }
    }
}

/// An owned [`Canvas`] storing one bit per pixel.
///
/// Rows are padded to a whole number of bytes and the least significant bit of a byte holds the
/// leftmost pixel.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Bitmap {
    /// The width of the [`Bitmap`] in pixels.
    width: usize,
    /// The height of the [`Bitmap`] in pixels.
    height: usize,
    /// The packed pixel rows.
    buffer: Vec<u8>,
}

impl Bitmap {
    /// Creates a new [`Bitmap`] of the given dimensions with every pixel set to background.
    pub fn new(width: usize, height: usize) -> Self {
        let row_byte_count = width.div_ceil(8);

        Self {
            width,
            height,
            buffer: vec![0; row_byte_count * height],
        }
    }

    /// Returns the number of bytes used to store a single row.
    pub const fn row_byte_count(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Returns the number of foreground pixels in this [`Bitmap`].
    pub fn foreground_count(&self) -> usize {
        self.buffer
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Returns the byte index and bit index of the pixel at `point`.
    const fn locate(&self, point: Point) -> (usize, usize) {
        let byte_index = point.y * self.row_byte_count() + point.x / 8;
        let bit_index = point.x % 8;

        (byte_index, bit_index)
    }
}

impl Canvas for Bitmap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, point: Point) -> bool {
        assert!(
            point_in_bounds(point, self.width, self.height),
            "{point:?} is out of bounds"
        );

        let (byte_index, bit_index) = self.locate(point);
        (self.buffer[byte_index] >> bit_index) & 0b1 == 1
    }

    fn set_pixel(&mut self, point: Point, foreground: bool) {
        assert!(
            point_in_bounds(point, self.width, self.height),
            "{point:?} is out of bounds"
        );

        let (byte_index, bit_index) = self.locate(point);
        if foreground {
            self.buffer[byte_index] |= 1 << bit_index;
        } else {
            self.buffer[byte_index] &= !(1 << bit_index);
        }
    }

    fn clear(&mut self) {
        self.buffer.fill(0);
    }
}
