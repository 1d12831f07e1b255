//! Dense row-major scalar field.

// Grid coordinates are validated before every signed/unsigned conversion
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use std::ops::{Index, IndexMut};

use nalgebra::Point2;

use crate::error::{FieldError, FieldResult};

/// A dense 2D grid of `f64` values stored row by row.
///
/// Cell `(x, y)` lives at `data[y * width + x]`. Signed accessors such as
/// [`ScalarField::get`] accept coordinates outside the grid and return `None`,
/// which is what local searches rely on when they step past the border.
///
/// # Example
///
/// ```
/// use tf_field::ScalarField;
///
/// let mut field = ScalarField::new(4, 3);
/// field.set(1, 2, 7.5);
///
/// assert_eq!(field.get(1, 2), Some(7.5));
/// assert_eq!(field.get(-1, 0), None);
/// assert!(!field.in_bounds(4, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl ScalarField {
    /// Creates a zero-filled field.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates a field with every cell set to `value`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDimensions`] if a dimension is zero and
    /// [`FieldError::BufferLength`] if `data` does not hold `width * height`
    /// values.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> FieldResult<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(FieldError::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a field by evaluating `f(x, y)` for every cell.
    ///
    /// # Example
    ///
    /// ```
    /// use tf_field::ScalarField;
    ///
    /// let ramp = ScalarField::from_fn(3, 2, |x, y| (x + 10 * y) as f64);
    /// assert_eq!(ramp.get(2, 1), Some(12.0));
    /// ```
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Converts an 8-bit grayscale buffer (one byte per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Same conditions as [`ScalarField::from_vec`].
    pub fn from_luma8(width: usize, height: usize, pixels: &[u8]) -> FieldResult<Self> {
        Self::from_vec(width, height, pixels.iter().map(|&p| f64::from(p)).collect())
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Size as `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks whether signed coordinates address a cell.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some()
    }

    /// Checks whether a pixel position addresses a cell.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point2<i32>) -> bool {
        self.in_bounds(p.x, p.y)
    }

    /// Returns the value at signed coordinates, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<f64> {
        self.index_of(x, y).map(|i| self.data[i])
    }

    /// Returns the value at a pixel position, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn value_at(&self, p: Point2<i32>) -> Option<f64> {
        self.get(p.x, p.y)
    }

    /// Sets a cell, returning the previous value.
    ///
    /// Returns `None` and leaves the field untouched when `(x, y)` is outside.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cell = &mut self.data[y * self.width + x];
        Some(std::mem::replace(cell, value))
    }

    /// One row of the field.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[must_use]
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Row-major view of all cells.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of all cells.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Smallest and largest value, or `None` for an empty field.
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Linearly maps values onto `[lo, hi]` in place.
    ///
    /// A flat field has no range to stretch and is set to `lo`. The range is
    /// measured on halved values so that fields spanning more than `f64::MAX`
    /// stay finite, and results are clamped against rounding past the bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use tf_field::ScalarField;
    ///
    /// let mut field = ScalarField::from_fn(3, 1, |x, _| x as f64 * 5.0);
    /// field.rescale(0.0, 1.0);
    /// assert_eq!(field.as_slice(), &[0.0, 0.5, 1.0]);
    /// ```
    pub fn rescale(&mut self, lo: f64, hi: f64) -> &mut Self {
        let Some((min, max)) = self.min_max() else {
            return self;
        };
        let (min, max) = (min * 0.5, max * 0.5);
        let half_span = max - min;
        if half_span <= f64::EPSILON * max.abs().max(0.5) {
            self.data.fill(lo);
            return self;
        }
        let factor = (hi - lo) / half_span;
        let (floor, ceil) = (lo.min(hi), lo.max(hi));
        for v in &mut self.data {
            *v = (*v * 0.5 - min).mul_add(factor, lo).max(floor).min(ceil);
        }
        self
    }

    /// Applies `f` to every cell, producing a new field.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combines two same-size fields cell by cell.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::SizeMismatch`] if the sizes differ.
    ///
    /// # Example
    ///
    /// ```
    /// use tf_field::ScalarField;
    ///
    /// let u = ScalarField::filled(2, 2, 3.0);
    /// let v = ScalarField::filled(2, 2, 4.0);
    /// let len = u.zip_map(&v, f64::hypot).unwrap();
    /// assert_eq!(len.get(1, 1), Some(5.0));
    /// ```
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> FieldResult<Self> {
        if self.size() != other.size() {
            return Err(FieldError::SizeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl Index<(usize, usize)> for ScalarField {
    type Output = f64;

    fn index(&self, (x, y): (usize, usize)) -> &f64 {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        &self.data[y * self.width + x]
    }
}

impl IndexMut<(usize, usize)> for ScalarField {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f64 {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        &mut self.data[y * self.width + x]
    }
}

/// Folds an out-of-range index back into `0..n` by mirroring about the
/// border cells, so `-1` maps to `1` and `n` maps to `n - 2`.
pub(crate) fn reflect(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let mut m = i.rem_euclid(period);
    if m >= n {
        m = period - m;
    }
    m as usize
}
