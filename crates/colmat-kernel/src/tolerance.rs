//! Approximate comparison.

use colmat_alloc::{Real, TensorResult};
use colmat_view::{Columns, TensorRead};
use serde::{Deserialize, Serialize};

/// Absolute and relative tolerances for comparing floating-point tensors.
///
/// Two components `a` and `b` match when
/// `|a - b| <= absolute` or `|a - b| <= relative * max(|a|, |b|)`.
///
/// Deserializable from caller configuration; missing fields take their
/// defaults:
///
/// ```toml
/// absolute = 1e-6
/// relative = 1e-4
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Largest accepted absolute difference.
    pub absolute: f64,
    /// Largest accepted difference relative to the larger magnitude.
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1e-5,
            relative: 1e-5,
        }
    }
}

impl Tolerance {
    /// Create a tolerance.
    #[must_use]
    pub const fn new(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    /// Exact comparison.
    #[must_use]
    pub const fn exact() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Whether `a` and `b` match.
    #[must_use]
    pub fn accepts<T: Real>(&self, a: T, b: T) -> bool {
        let (a, b) = (a.to_f64(), b.to_f64());
        if a == b {
            return true;
        }
        let diff = (a - b).abs();
        diff <= self.absolute || diff <= self.relative * a.abs().max(b.abs())
    }
}

/// Whether two column-major arrays match component-wise.
#[must_use]
pub fn approx_eq_columns<T: Real, const R: usize, const C: usize>(
    a: &Columns<T, R, C>,
    b: &Columns<T, R, C>,
    tolerance: &Tolerance,
) -> bool {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .all(|(&x, &y)| tolerance.accepts(x, y))
}

/// Whether two views match component-wise.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn approx_eq<T: Real, const R: usize, const C: usize>(
    a: &impl TensorRead<T, R, C>,
    b: &impl TensorRead<T, R, C>,
    tolerance: &Tolerance,
) -> TensorResult<bool> {
    Ok(approx_eq_columns(&a.to_columns()?, &b.to_columns()?, tolerance))
}
