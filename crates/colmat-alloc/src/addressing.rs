//! Column-major component addressing.
//!
//! Pure functions mapping a tensor component to its position in a
//! [`ScalarBuffer`](crate::ScalarBuffer):
//!
//! ```text
//! index(row, col, rows)                  = col * rows + row
//! byte_offset(base, offset, index, w)    = base + offset + index * w
//! ```
//!
//! A vector of length `N` is addressed as an `N x 1` tensor, so component
//! `i` sits at index `i`.

use crate::{TensorError, TensorResult};

/// Component index of `(row, col)` in a tensor with `rows` rows.
///
/// No bounds checking; see [`checked_index`].
#[inline]
#[must_use]
pub const fn index(row: usize, col: usize, rows: usize) -> usize {
    col * rows + row
}

/// Component index of `(row, col)` in an `rows x cols` tensor.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfRange`] if `row >= rows` or
/// `col >= cols`.
#[inline]
pub fn checked_index(row: usize, col: usize, rows: usize, cols: usize) -> TensorResult<usize> {
    if row >= rows {
        return Err(TensorError::IndexOutOfRange {
            index: row,
            bound: rows,
        });
    }
    if col >= cols {
        return Err(TensorError::IndexOutOfRange {
            index: col,
            bound: cols,
        });
    }
    Ok(index(row, col, rows))
}

/// Inverse of [`index`]: the `(row, col)` stored at component index `k`.
#[inline]
#[must_use]
pub const fn component_at(k: usize, rows: usize) -> (usize, usize) {
    (k % rows, k / rows)
}

/// Number of bytes occupied by one `rows x cols` tensor of scalar width
/// `width`.
#[inline]
#[must_use]
pub const fn footprint(rows: usize, cols: usize, width: usize) -> usize {
    rows * cols * width
}

/// Byte offset of component `index` for a view with the given shared
/// `base` and constant `offset`.
///
/// # Errors
///
/// Returns [`TensorError::AddressOverflow`] if the arithmetic overflows,
/// the result is negative, or the result exceeds `isize::MAX` (the largest
/// addressable byte range).
#[inline]
pub fn byte_offset(base: i64, offset: usize, index: usize, width: usize) -> TensorResult<usize> {
    let overflow = || TensorError::AddressOverflow {
        base,
        offset,
        index,
        width,
    };

    let offset_i = i64::try_from(offset).map_err(|_| overflow())?;
    let index_i = i64::try_from(index).map_err(|_| overflow())?;
    let width_i = i64::try_from(width).map_err(|_| overflow())?;

    let scaled = index_i.checked_mul(width_i).ok_or_else(overflow)?;
    let total = base
        .checked_add(offset_i)
        .and_then(|v| v.checked_add(scaled))
        .ok_or_else(overflow)?;

    if total < 0 || total > isize::MAX as i64 {
        return Err(overflow());
    }
    usize::try_from(total).map_err(|_| overflow())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_component_at_round_trips(n in 2_usize..=4, k in 0_usize..16) {
            prop_assume!(k < n * n);
            let (row, col) = component_at(k, n);
            prop_assert!(row < n && col < n);
            prop_assert_eq!(checked_index(row, col, n, n), Ok(k));
        }

        #[test]
        fn prop_byte_offset_is_linear(
            base in 0_i64..1 << 40,
            offset in 0_usize..1 << 20,
            index in 0_usize..16,
            wide in any::<bool>(),
        ) {
            let width = if wide { 8 } else { 4 };
            let start = byte_offset(base, offset, 0, width).unwrap();
            prop_assert_eq!(byte_offset(base, offset, index, width), Ok(start + index * width));
            prop_assert_eq!(start as i64, base + offset as i64);
        }

        #[test]
        fn prop_negative_address_rejected(base in i64::MIN..0, offset in 0_usize..1024) {
            prop_assume!(base + (offset as i64) < 0);
            let overflowed = matches!(
                byte_offset(base, offset, 0, 4),
                Err(TensorError::AddressOverflow { .. })
            );
            prop_assert!(overflowed);
        }
    }
}
