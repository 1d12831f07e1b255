//! Gradient vector flow.
//!
//! GVF spreads the edge map of an image into homogeneous regions by iterated
//! diffusion, so that a point far from any outline still sees a gradient
//! that leads towards it. The result is stored as a pair of fields: the flow
//! magnitude rescaled to `0..=255` and the flow direction in radians.
//!
//! # Example
//!
//! ```
//! use tf_field::{GradientField, GvfConfig, ScalarField};
//!
//! let image = ScalarField::from_fn(16, 16, |x, y| ((x as f64 - 8.0).hypot(y as f64 - 8.0) < 4.0) as u8 as f64);
//! let config = GvfConfig::default().with_iterations(8).sequential();
//!
//! let gvf = GradientField::compute(&image, &config).unwrap();
//! assert_eq!(gvf.size(), (16, 16));
//! ```

#![allow(clippy::cast_possible_wrap)]

use std::f64::consts::PI;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{FieldError, FieldResult};
use crate::field::{ScalarField, reflect};

/// Grids with fewer cells than this are diffused on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Largest diffusivity for which the explicit update stays stable.
const MAX_DIFFUSIVITY: f64 = 0.25;

/// Parameters for [`GradientField::compute`].
///
/// # Example
///
/// ```
/// use tf_field::GvfConfig;
///
/// let config = GvfConfig::default()
///     .with_mu(0.1)
///     .with_iterations(32);
/// assert_eq!(config.iterations, 32);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GvfConfig {
    /// Diffusion weight. Larger values smooth the flow more per iteration.
    pub mu: f64,

    /// Number of diffusion iterations.
    pub iterations: usize,

    /// Standard deviation of the pre-smoothing blur.
    pub blur_sigma: f64,

    /// Whether to diffuse rows in parallel (via rayon) on large images.
    pub parallel: bool,
}

impl Default for GvfConfig {
    fn default() -> Self {
        Self {
            mu: 0.05,
            iterations: 64,
            blur_sigma: 0.66,
            parallel: true,
        }
    }
}

impl GvfConfig {
    /// Set the diffusion weight.
    #[must_use]
    pub fn with_mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    /// Set the number of diffusion iterations.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the pre-smoothing blur.
    #[must_use]
    pub fn with_blur_sigma(mut self, sigma: f64) -> Self {
        self.blur_sigma = sigma;
        self
    }

    /// Enable or disable parallel diffusion.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Shorthand for `with_parallel(false)`.
    #[must_use]
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }
}

/// Gradient vector flow of an image.
///
/// Both fields have the size of the source image. Magnitudes lie in
/// `[0, 255]` and directions in `(-π, π]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientField {
    magnitude: ScalarField,
    direction: ScalarField,
}

impl GradientField {
    /// Computes the GVF of a grayscale image.
    ///
    /// The image is normalized to `[0, 1]`, blurred with
    /// [`GvfConfig::blur_sigma`] and normalized again. Its central-difference
    /// gradient `(u, v)` then evolves for [`GvfConfig::iterations`] steps of
    ///
    /// ```text
    /// u <- (1 - b) u + mu * lap(u) + b * fx
    /// v <- (1 - b) v + mu * lap(v) + b * fy
    /// ```
    ///
    /// where `b = fx² + fy²` and `lap` is the 4-neighbour Laplacian with
    /// mirrored borders.
    ///
    /// # Errors
    ///
    /// - [`FieldError::TooSmall`] if either dimension is below 2
    /// - [`FieldError::NonFinite`] if any cell is NaN or infinite
    /// - [`FieldError::InvalidDiffusivity`] if `mu` is outside `(0, 0.25]`
    /// - [`FieldError::InvalidSigma`] if the blur sigma is unusable
    pub fn compute(image: &ScalarField, config: &GvfConfig) -> FieldResult<Self> {
        let (width, height) = image.size();
        if width < 2 || height < 2 {
            return Err(FieldError::TooSmall {
                min: 2,
                width,
                height,
            });
        }
        if let Some(i) = image.as_slice().iter().position(|v| !v.is_finite()) {
            return Err(FieldError::NonFinite {
                x: i % width,
                y: i / width,
            });
        }
        if !(config.mu > 0.0 && config.mu <= MAX_DIFFUSIVITY) {
            return Err(FieldError::InvalidDiffusivity(config.mu));
        }

        let mut normalized = image.clone();
        normalized.rescale(0.0, 1.0);
        let mut edges = normalized.gaussian_blur(config.blur_sigma)?;
        edges.rescale(0.0, 1.0);

        let fx = ScalarField::from_fn(width, height, |x, y| derivative(edges.row(y), x));
        let fy = ScalarField::from_fn(width, height, |x, y| {
            let column = |row: usize| edges[(x, row)];
            if y == 0 {
                0.5 * (column(1) - column(0))
            } else if y == height - 1 {
                0.5 * (column(y) - column(y - 1))
            } else {
                0.5 * (column(y + 1) - column(y - 1))
            }
        });

        let b = fx.zip_map(&fy, |gx, gy| gx.mul_add(gx, gy * gy))?;
        let c1 = b.zip_map(&fx, |bb, gx| bb * gx)?;
        let c2 = b.zip_map(&fy, |bb, gy| bb * gy)?;

        let parallel = config.parallel && width * height >= PARALLEL_THRESHOLD;
        info!(
            width,
            height,
            iterations = config.iterations,
            mu = config.mu,
            parallel,
            "Computing gradient vector flow"
        );

        let mut u = fx;
        let mut v = fy;
        let mut scratch = ScalarField::new(width, height);
        for _ in 0..config.iterations {
            diffuse(&u, &b, &c1, config.mu, &mut scratch, parallel);
            std::mem::swap(&mut u, &mut scratch);
            diffuse(&v, &b, &c2, config.mu, &mut scratch, parallel);
            std::mem::swap(&mut v, &mut scratch);
        }

        let mut magnitude = u.zip_map(&v, f64::hypot)?;
        magnitude.rescale(0.0, 255.0);
        let direction = u.zip_map(&v, |gx, gy| fold_angle(gy.atan2(gx)))?;

        if let Some((lo, hi)) = magnitude.min_max() {
            debug!(lo, hi, "GVF magnitude range");
        }

        Ok(Self {
            magnitude,
            direction,
        })
    }

    /// Flow magnitude, rescaled to `[0, 255]`.
    #[inline]
    #[must_use]
    pub const fn magnitude(&self) -> &ScalarField {
        &self.magnitude
    }

    /// Flow direction in radians, in `(-π, π]`.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> &ScalarField {
        &self.direction
    }

    /// Size as `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        self.magnitude.size()
    }

    /// Splits into `(magnitude, direction)`.
    #[must_use]
    pub fn into_parts(self) -> (ScalarField, ScalarField) {
        (self.magnitude, self.direction)
    }
}

/// Central difference along a row, one-sided at both ends.
fn derivative(row: &[f64], x: usize) -> f64 {
    let last = row.len() - 1;
    if x == 0 {
        0.5 * (row[1] - row[0])
    } else if x == last {
        0.5 * (row[last] - row[last - 1])
    } else {
        0.5 * (row[x + 1] - row[x - 1])
    }
}

/// One explicit diffusion step of a flow component into `out`.
fn diffuse(
    prev: &ScalarField,
    b: &ScalarField,
    c: &ScalarField,
    mu: f64,
    out: &mut ScalarField,
    parallel: bool,
) {
    let (width, height) = prev.size();
    let step_row = |(y, row): (usize, &mut [f64])| {
        let up = reflect(y as isize - 1, height);
        let down = reflect(y as isize + 1, height);
        let (b_row, c_row, here) = (b.row(y), c.row(y), prev.row(y));
        for (x, cell) in row.iter_mut().enumerate() {
            let left = reflect(x as isize - 1, width);
            let right = reflect(x as isize + 1, width);
            let center = here[x];
            let lap = here[left] + here[right] + prev[(x, up)] + prev[(x, down)] - 4.0 * center;
            *cell = (1.0 - b_row[x]).mul_add(center, mu.mul_add(lap, c_row[x]));
        }
    };

    if parallel {
        out.as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(&step_row);
    } else {
        out.as_mut_slice()
            .chunks_mut(width)
            .enumerate()
            .for_each(&step_row);
    }
}

/// Maps `atan2` output onto `(-π, π]`.
fn fold_angle(angle: f64) -> f64 {
    if angle <= -PI { angle + 2.0 * PI } else { angle }
}
