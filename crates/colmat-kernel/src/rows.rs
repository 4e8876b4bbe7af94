//! Gaussian-elimination row primitives.
//!
//! Each primitive comes in an in-place form and an `_into` form that leaves
//! its input alone and writes the result to a distinct output. Row indices
//! are validated before anything is written.

use colmat_alloc::{Scalar, TensorError, TensorResult};
use colmat_view::{Columns, TensorRead, TensorWrite};

fn check_row(row: usize, rows: usize) -> TensorResult<()> {
    if row < rows {
        Ok(())
    } else {
        Err(TensorError::IndexOutOfRange {
            index: row,
            bound: rows,
        })
    }
}

fn swap<T: Scalar, const R: usize, const C: usize>(m: &mut Columns<T, R, C>, a: usize, b: usize) {
    for column in m.iter_mut() {
        column.swap(a, b);
    }
}

fn scale_at<T: Scalar, const R: usize, const C: usize>(
    m: &mut Columns<T, R, C>,
    row: usize,
    factor: T,
) {
    for column in m.iter_mut() {
        column[row] = column[row].wrapping_mul(factor);
    }
}

fn add_scaled_at<T: Scalar, const R: usize, const C: usize>(
    m: &mut Columns<T, R, C>,
    src: usize,
    dst: usize,
    factor: T,
) {
    for column in m.iter_mut() {
        column[dst] = column[dst].wrapping_add(column[src].wrapping_mul(factor));
    }
}

/// Swap rows `a` and `b`.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if either row is `>= R`.
pub fn exchange_rows<T: Scalar, const R: usize, const C: usize>(
    m: &mut impl TensorWrite<T, R, C>,
    a: usize,
    b: usize,
) -> TensorResult<()> {
    check_row(a, R)?;
    check_row(b, R)?;
    if a == b {
        return Ok(());
    }
    let row_a = m.get_row(a)?;
    let row_b = m.get_row(b)?;
    m.set_row(a, row_b)?;
    m.set_row(b, row_a)
}

/// `out = input` with rows `a` and `b` swapped.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if either row is `>= R`.
pub fn exchange_rows_into<T: Scalar, const R: usize, const C: usize>(
    input: &impl TensorRead<T, R, C>,
    a: usize,
    b: usize,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    check_row(a, R)?;
    check_row(b, R)?;
    let mut m = input.to_columns()?;
    swap(&mut m, a, b);
    out.set_columns(&m)
}

/// Multiply row `row` by `factor`.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if `row >= R`.
pub fn scale_row<T: Scalar, const R: usize, const C: usize>(
    m: &mut impl TensorWrite<T, R, C>,
    row: usize,
    factor: T,
) -> TensorResult<()> {
    let mut values = m.get_row(row)?;
    for x in &mut values {
        *x = x.wrapping_mul(factor);
    }
    m.set_row(row, values)
}

/// `out = input` with row `row` multiplied by `factor`.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if `row >= R`.
pub fn scale_row_into<T: Scalar, const R: usize, const C: usize>(
    input: &impl TensorRead<T, R, C>,
    row: usize,
    factor: T,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    check_row(row, R)?;
    let mut m = input.to_columns()?;
    scale_at(&mut m, row, factor);
    out.set_columns(&m)
}

/// `row[dst] += row[src] * factor`.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if either row is `>= R`.
pub fn add_scaled_row<T: Scalar, const R: usize, const C: usize>(
    m: &mut impl TensorWrite<T, R, C>,
    src: usize,
    dst: usize,
    factor: T,
) -> TensorResult<()> {
    check_row(dst, R)?;
    let source = m.get_row(src)?;
    let mut target = m.get_row(dst)?;
    for (t, s) in target.iter_mut().zip(source) {
        *t = t.wrapping_add(s.wrapping_mul(factor));
    }
    m.set_row(dst, target)
}

/// `out = input` with `row[dst] += row[src] * factor`.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if either row is `>= R`.
pub fn add_scaled_row_into<T: Scalar, const R: usize, const C: usize>(
    input: &impl TensorRead<T, R, C>,
    src: usize,
    dst: usize,
    factor: T,
    out: &mut impl TensorWrite<T, R, C>,
) -> TensorResult<()> {
    check_row(src, R)?;
    check_row(dst, R)?;
    let mut m = input.to_columns()?;
    add_scaled_at(&mut m, src, dst, factor);
    out.set_columns(&m)
}
