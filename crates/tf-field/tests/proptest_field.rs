//! Property-based tests for fields and gradient vector flow.
//!
//! These tests use proptest to generate random fields, including NaN,
//! infinite and extreme finite cells, and verify the GVF output ranges.
//!
//! Run with: cargo test -p tf-field -- proptest

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::f64::consts::PI;
use tf_field::{FieldError, GradientField, GvfConfig, ScalarField};

// =============================================================================
// Strategies for generating random fields
// =============================================================================

/// Any finite cell value, weighted towards ordinary intensities.
fn arb_finite_cell() -> impl Strategy<Value = f64> + Clone {
    prop_oneof![
        8 => 0.0..255.0f64,
        2 => -1e300..1e300f64,
        1 => Just(f64::MAX),
        1 => Just(-f64::MAX),
    ]
}

/// Any cell value, including NaN and infinities.
fn arb_cell() -> impl Strategy<Value = f64> + Clone {
    prop_oneof![
        20 => arb_finite_cell(),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

/// Generate a field of 2x2 to 12x12 cells drawn from `cell`.
fn arb_field<S>(cell: S) -> impl Strategy<Value = ScalarField>
where
    S: Strategy<Value = f64> + Clone,
{
    (2usize..=12, 2usize..=12).prop_flat_map(move |(w, h)| {
        prop::collection::vec(cell.clone(), w * h)
            .prop_map(move |data| ScalarField::from_vec(w, h, data).unwrap())
    })
}

fn small_config() -> GvfConfig {
    GvfConfig::default().with_iterations(6)
}

// =============================================================================
// Property Tests: Rescaling
// =============================================================================

proptest! {
    /// Rescaling any finite field lands every cell inside the target range.
    #[test]
    fn rescale_stays_in_range(mut field in arb_field(arb_finite_cell())) {
        field.rescale(0.0, 255.0);
        for &v in field.as_slice() {
            prop_assert!((0.0..=255.0).contains(&v), "value {}", v);
        }
    }
}

// =============================================================================
// Property Tests: Gradient vector flow
// =============================================================================

proptest! {
    /// Finite fields give magnitudes in [0, 255] and directions in (-pi, pi].
    #[test]
    fn gvf_ranges_hold_for_finite_fields(field in arb_field(arb_finite_cell())) {
        let gvf = GradientField::compute(&field, &small_config()).unwrap();
        prop_assert_eq!(gvf.size(), field.size());
        for &m in gvf.magnitude().as_slice() {
            prop_assert!((0.0..=255.0).contains(&m), "magnitude {}", m);
        }
        for &d in gvf.direction().as_slice() {
            prop_assert!(d > -PI && d <= PI, "direction {}", d);
        }
    }

    /// Any field either yields in-range output or is rejected for its first
    /// non-finite cell.
    #[test]
    fn gvf_never_emits_non_finite_values(field in arb_field(arb_cell())) {
        let first_bad = field.as_slice().iter().position(|v| !v.is_finite());
        match (GradientField::compute(&field, &small_config()), first_bad) {
            (Ok(gvf), None) => {
                for &m in gvf.magnitude().as_slice() {
                    prop_assert!((0.0..=255.0).contains(&m), "magnitude {}", m);
                }
            }
            (Err(FieldError::NonFinite { x, y }), Some(i)) => {
                prop_assert_eq!((x, y), (i % field.width(), i / field.width()));
            }
            (result, bad) => {
                prop_assert!(false, "unexpected {:?} for first bad cell {:?}", result.err(), bad);
            }
        }
    }

    /// Sequential and row-parallel diffusion agree exactly.
    #[test]
    fn gvf_parallel_matches_sequential(field in arb_field(0.0..255.0f64)) {
        let config = small_config();
        let parallel = GradientField::compute(&field, &config).unwrap();
        let sequential = GradientField::compute(&field, &config.sequential()).unwrap();
        prop_assert_eq!(parallel, sequential);
    }
}
