//! Element-wise arithmetic.
//!
//! All operations work on any `R x C` shape. Inputs are snapshotted onto the
//! stack before the output is written. Integer kinds wrap on overflow.

use colmat_alloc::{Scalar, TensorResult};
use colmat_view::{Columns, TensorRead, TensorWrite};

fn zip_with<T: Scalar, const R: usize, const C: usize>(
    a: &Columns<T, R, C>,
    b: &Columns<T, R, C>,
    op: impl Fn(T, T) -> T,
) -> Columns<T, R, C> {
    let mut out = *a;
    for (out_col, b_col) in out.iter_mut().zip(b) {
        for (x, &y) in out_col.iter_mut().zip(b_col) {
            *x = op(*x, y);
        }
    }
    out
}

fn map<T: Scalar, const R: usize, const C: usize>(
    a: &Columns<T, R, C>,
    op: impl Fn(T) -> T,
) -> Columns<T, R, C> {
    let mut out = *a;
    for x in out.iter_mut().flatten() {
        *x = op(*x);
    }
    out
}

/// `out = a + b`.
///
/// # Errors
///
/// Propagates address errors from any of the views.
pub fn add<T: Scalar, const R: usize, const C: usize>(
    a: &impl TensorRead<T, R, C>,
    b: &impl TensorRead<T, R, C>,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    let sum = zip_with(&a.to_columns()?, &b.to_columns()?, T::wrapping_add);
    out.set_columns(&sum)
}

/// `out = a - b`.
///
/// # Errors
///
/// Propagates address errors from any of the views.
pub fn subtract<T: Scalar, const R: usize, const C: usize>(
    a: &impl TensorRead<T, R, C>,
    b: &impl TensorRead<T, R, C>,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    let diff = zip_with(&a.to_columns()?, &b.to_columns()?, T::wrapping_sub);
    out.set_columns(&diff)
}

/// Component-wise product, `out[r][c] = a[r][c] * b[r][c]`.
///
/// # Errors
///
/// Propagates address errors from any of the views.
pub fn hadamard<T: Scalar, const R: usize, const C: usize>(
    a: &impl TensorRead<T, R, C>,
    b: &impl TensorRead<T, R, C>,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    let product = zip_with(&a.to_columns()?, &b.to_columns()?, T::wrapping_mul);
    out.set_columns(&product)
}

/// `out = a * factor`.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn scale<T: Scalar, const R: usize, const C: usize>(
    a: &impl TensorRead<T, R, C>,
    factor: T,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    out.set_columns(&map(&a.to_columns()?, |x| x.wrapping_mul(factor)))
}

/// `out = -a`.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn negate<T: Scalar, const R: usize, const C: usize>(
    a: &impl TensorRead<T, R, C>,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    out.set_columns(&map(&a.to_columns()?, T::wrapping_neg))
}

/// `acc += b`.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn add_assign<T: Scalar, const R: usize, const C: usize>(
    acc: &mut impl TensorWrite<T, R, C>,
    b: &impl TensorRead<T, R, C>,
) -> TensorResult<()> {
    let rhs = b.to_columns()?;
    let sum = zip_with(&acc.to_columns()?, &rhs, T::wrapping_add);
    acc.set_columns(&sum)
}

/// `acc -= b`.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn sub_assign<T: Scalar, const R: usize, const C: usize>(
    acc: &mut impl TensorWrite<T, R, C>,
    b: &impl TensorRead<T, R, C>,
) -> TensorResult<()> {
    let rhs = b.to_columns()?;
    let diff = zip_with(&acc.to_columns()?, &rhs, T::wrapping_sub);
    acc.set_columns(&diff)
}

/// `m *= factor`.
///
/// # Errors
///
/// Propagates address errors from the view.
pub fn scale_in_place<T: Scalar, const R: usize, const C: usize>(
    m: &mut impl TensorWrite<T, R, C>,
    factor: T,
) -> TensorResult<()> {
    let scaled = map(&m.to_columns()?, |x| x.wrapping_mul(factor));
    m.set_columns(&scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colmat_view::{FixedView, MatrixView, VectorView};

    fn m2(rows: [[i32; 2]; 2]) -> MatrixView<i32, 2> {
        MatrixView::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_add_subtract() {
        let a = m2([[1, 2], [3, 4]]);
        let b = m2([[10, 20], [30, 40]]);
        let mut out = MatrixView::<i32, 2>::zeroed().unwrap();

        add(&a, &b, &mut out).unwrap();
        assert_eq!(out.get_row(0).unwrap(), [11, 22]);
        assert_eq!(out.get_row(1).unwrap(), [33, 44]);

        subtract(&a, &b, &mut out).unwrap();
        assert_eq!(out.get_row(1).unwrap(), [-27, -36]);
    }

    #[test]
    fn test_scale_negate_hadamard() {
        let a = m2([[1, -2], [3, 4]]);
        let mut out = MatrixView::<i32, 2>::zeroed().unwrap();

        scale(&a, 3, &mut out).unwrap();
        assert_eq!(out.get_row(0).unwrap(), [3, -6]);

        negate(&a, &mut out).unwrap();
        assert_eq!(out.get_row(1).unwrap(), [-3, -4]);

        hadamard(&a, &a, &mut out).unwrap();
        assert_eq!(out.to_columns().unwrap(), [[1, 9], [4, 16]]);
    }

    #[test]
    fn test_assigning_forms() {
        let mut acc = m2([[1, 1], [1, 1]]);
        let b = m2([[1, 2], [3, 4]]);

        add_assign(&mut acc, &b).unwrap();
        assert_eq!(acc.get_row(1).unwrap(), [4, 5]);

        sub_assign(&mut acc, &b).unwrap();
        assert_eq!(acc.to_columns().unwrap(), [[1, 1], [1, 1]]);

        scale_in_place(&mut acc, -2).unwrap();
        assert_eq!(acc.to_columns().unwrap(), [[-2, -2], [-2, -2]]);
    }

    #[test]
    fn test_add_assign_through_alias() {
        let mut acc = MatrixView::<f32, 3>::identity().unwrap();
        let alias = acc.share();
        add_assign(&mut acc, &alias).unwrap();
        assert_eq!(acc.get(1, 1).unwrap(), 2.0);
        assert_eq!(acc.get(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_rectangular_and_vector_shapes() {
        let a = FixedView::<f64, 2, 3>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let mut out = FixedView::<f64, 2, 3>::zeroed().unwrap();
        scale(&a, 0.5, &mut out).unwrap();
        assert_eq!(out.get_row(1).unwrap(), [2.0, 2.5, 3.0]);

        let v = VectorView::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut w = VectorView::<f32, 4>::zeroed().unwrap();
        add(&v, &v, &mut w).unwrap();
        assert_eq!(w.to_array().unwrap(), [2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_integer_overflow_wraps() {
        let big = m2([[i32::MAX, 0], [0, i32::MIN]]);
        let mut out = MatrixView::<i32, 2>::zeroed().unwrap();

        add(&big, &big, &mut out).unwrap();
        assert_eq!(out.get_row(0).unwrap(), [-2, 0]);
        assert_eq!(out.get_row(1).unwrap(), [0, 0]);

        negate(&big, &mut out).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), i32::MIN);

        scale(&big, 2, &mut out).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), i32::MAX.wrapping_mul(2));

        let mut acc = m2([[i32::MIN, 1], [1, 1]]);
        sub_assign(&mut acc, &m2([[1, 0], [0, 0]])).unwrap();
        assert_eq!(acc.get(0, 0).unwrap(), i32::MAX);
    }
}
