//! Separable Gaussian smoothing.

#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{FieldError, FieldResult};
use crate::field::{ScalarField, reflect};

impl ScalarField {
    /// Smooths the field with a Gaussian kernel of standard deviation `sigma`.
    ///
    /// The kernel spans `round(3 * sigma)` cells on each side and is applied
    /// as a horizontal pass followed by a vertical pass. Borders are mirrored
    /// so that constant fields stay constant. A sigma of zero (or one small
    /// enough to round to a zero radius) returns an unchanged copy.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSigma`] if `sigma` is negative or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use tf_field::ScalarField;
    ///
    /// let mut spike = ScalarField::new(9, 9);
    /// spike.set(4, 4, 1.0);
    ///
    /// let smooth = spike.gaussian_blur(1.0).unwrap();
    /// assert!(smooth.get(4, 4).unwrap() < 1.0);
    /// assert!(smooth.get(5, 4).unwrap() > 0.0);
    /// ```
    pub fn gaussian_blur(&self, sigma: f64) -> FieldResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(FieldError::InvalidSigma(sigma));
        }
        let kernel = gaussian_kernel(sigma);
        if kernel.len() <= 1 || self.is_empty() {
            return Ok(self.clone());
        }
        let radius = (kernel.len() / 2) as isize;
        let (width, height) = self.size();

        let horizontal = Self::from_fn(width, height, |x, y| {
            let row = self.row(y);
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * row[reflect(x as isize + k as isize - radius, width)])
                .sum()
        });

        Ok(Self::from_fn(width, height, |x, y| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * horizontal[(x, reflect(y as isize + k as isize - radius, height))])
                .sum()
        }))
    }
}

/// Normalized 1D Gaussian weights covering `-r..=r` with `r = round(3 * sigma)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (3.0 * sigma).round() as usize;
    if radius == 0 {
        return vec![1.0];
    }
    let denom = 2.0 * sigma * sigma;
    let r = radius as f64;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|k| {
            let d = k as f64 - r;
            (-d * d / denom).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}
