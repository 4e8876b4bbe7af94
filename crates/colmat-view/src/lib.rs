//! Tensor views over colmat scalar buffers.
//!
//! A view is a handle combining a [`ScalarBuffer`] with the position of one
//! `R x C` tensor inside it. Views never own tensor data directly: every
//! accessor reads or writes the buffer through the column-major
//! [addressing scheme](colmat_alloc::addressing).
//!
//! # Variants
//!
//! | View | Position | Use Case |
//! |------|----------|----------|
//! | [`FixedView`] | constant byte offset | Standalone tensors, tensors at a fixed spot in a shared buffer |
//! | [`SharedView`] | shared movable base + constant offset | "Current element" views over an array of tensors |
//!
//! Both implement the same accessor contract, [`TensorRead`] and
//! [`TensorWrite`], which is all the algebra kernel relies on.
//!
//! # Shared Bases
//!
//! ```text
//!            base (SharedBase, moved with advance/set)
//!             |
//!  buffer: [..|.. view A (offset 0) ..|.. view B (offset 16) ..|..........]
//!             |---- element 0 -------------------------------|-- element 1
//! ```
//!
//! Every [`SharedView`] borrows its [`SharedBase`] and re-reads it on each
//! access, so moving the base repositions every view of the family in O(1)
//! without touching the buffer. [`TensorArray`] packages the pattern.
//!
//! # Coordinate Spaces
//!
//! Views carry two zero-sized type parameters, the source space `S` and the
//! target space `D`, exposed through [`Tagged`]. They have no runtime
//! representation; the kernel uses them to reject compositions whose spaces
//! do not line up at compile time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
pub mod fixed;
pub mod shared;
pub mod space;

pub use array::TensorArray;
pub use fixed::FixedView;
pub use shared::{SharedBase, SharedView};
pub use space::{Space, Untagged};

use colmat_alloc::{addressing, Scalar, ScalarBuffer, TensorError, TensorResult};

/// A square `N x N` matrix view with a constant offset.
pub type MatrixView<T, const N: usize, S = Untagged, D = Untagged> = FixedView<T, N, N, S, D>;

/// An `N`-element column vector view with a constant offset. A vector lives
/// in a single space, so its source and target tags coincide.
pub type VectorView<T, const N: usize, S = Untagged> = FixedView<T, N, 1, S, S>;

/// Column-major component array: `columns[col][row]`.
pub type Columns<T, const R: usize, const C: usize> = [[T; R]; C];

/// Coordinate-space tags of a tensor.
pub trait Tagged {
    /// Space the tensor maps from.
    type Source;
    /// Space the tensor maps into.
    type Target;
}

/// Read access to an `R x C` tensor.
pub trait TensorRead<T: Scalar, const R: usize, const C: usize> {
    /// Read component `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `row >= R` or `col >= C`,
    /// or an address error if the component lies outside the buffer.
    fn get(&self, row: usize, col: usize) -> TensorResult<T>;

    /// The buffer backing this view.
    fn raw_buffer(&self) -> &ScalarBuffer;

    /// Byte offset of component `(0, 0)` in [`raw_buffer`](Self::raw_buffer).
    ///
    /// # Errors
    ///
    /// Returns an address error if the offset cannot be represented.
    fn start_offset(&self) -> TensorResult<usize>;

    /// Read a whole row.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `row >= R`.
    fn get_row(&self, row: usize) -> TensorResult<[T; C]> {
        check_bound(row, R)?;
        let mut out = [T::ZERO; C];
        for (col, slot) in out.iter_mut().enumerate() {
            *slot = self.get(row, col)?;
        }
        Ok(out)
    }

    /// Read a whole column.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `col >= C`.
    fn get_col(&self, col: usize) -> TensorResult<[T; R]> {
        check_bound(col, C)?;
        let mut out = [T::ZERO; R];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.get(row, col)?;
        }
        Ok(out)
    }

    /// Snapshot every component, column-major.
    ///
    /// # Errors
    ///
    /// Returns an address error if the tensor lies outside the buffer.
    fn to_columns(&self) -> TensorResult<Columns<T, R, C>> {
        let mut out = [[T::ZERO; R]; C];
        for (col, column) in out.iter_mut().enumerate() {
            for (row, slot) in column.iter_mut().enumerate() {
                *slot = self.get(row, col)?;
            }
        }
        Ok(out)
    }
}

/// Write access to an `R x C` tensor.
pub trait TensorWrite<T: Scalar, const R: usize, const C: usize>: TensorRead<T, R, C> {
    /// Write component `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `row >= R` or `col >= C`,
    /// or an address error if the component lies outside the buffer.
    fn set(&mut self, row: usize, col: usize, value: T) -> TensorResult<()>;

    /// Write a whole row. The index is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `row >= R`.
    fn set_row(&mut self, row: usize, values: [T; C]) -> TensorResult<()> {
        check_bound(row, R)?;
        for (col, value) in values.into_iter().enumerate() {
            self.set(row, col, value)?;
        }
        Ok(())
    }

    /// Write a whole column. The index is validated before anything is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `col >= C`.
    fn set_col(&mut self, col: usize, values: [T; R]) -> TensorResult<()> {
        check_bound(col, C)?;
        for (row, value) in values.into_iter().enumerate() {
            self.set(row, col, value)?;
        }
        Ok(())
    }

    /// Write every component from a column-major array.
    ///
    /// # Errors
    ///
    /// Returns an address error if the tensor lies outside the buffer.
    fn set_columns(&mut self, columns: &Columns<T, R, C>) -> TensorResult<()> {
        for (col, column) in columns.iter().enumerate() {
            for (row, &value) in column.iter().enumerate() {
                self.set(row, col, value)?;
            }
        }
        Ok(())
    }

    /// Copy every component of `other` into this view.
    ///
    /// `other` is read completely before the first write, so copying between
    /// overlapping views is safe.
    ///
    /// # Errors
    ///
    /// Returns an address error if either tensor lies outside its buffer.
    fn copy_from<O>(&mut self, other: &O) -> TensorResult<()>
    where
        O: TensorRead<T, R, C> + ?Sized,
    {
        let columns = other.to_columns()?;
        self.set_columns(&columns)
    }

    /// Set every component to `value`.
    ///
    /// # Errors
    ///
    /// Returns an address error if the tensor lies outside the buffer.
    fn fill(&mut self, value: T) -> TensorResult<()> {
        self.set_columns(&[[value; R]; C])
    }

    /// Ones on the main diagonal, zeros elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an address error if the tensor lies outside the buffer.
    fn set_identity(&mut self) -> TensorResult<()> {
        let mut columns = [[T::ZERO; R]; C];
        for (i, column) in columns.iter_mut().enumerate().take(R.min(C)) {
            column[i] = T::ONE;
        }
        self.set_columns(&columns)
    }
}

/// An `R x C` identity array (ones on the main diagonal).
#[must_use]
pub fn identity_columns<T: Scalar, const R: usize, const C: usize>() -> Columns<T, R, C> {
    let mut columns = [[T::ZERO; R]; C];
    for (i, column) in columns.iter_mut().enumerate().take(R.min(C)) {
        column[i] = T::ONE;
    }
    columns
}

#[inline]
fn check_bound(index: usize, bound: usize) -> TensorResult<()> {
    if index < bound {
        Ok(())
    } else {
        Err(TensorError::IndexOutOfRange { index, bound })
    }
}

/// Byte offset of component `(row, col)` of an `R x C` tensor of `T`.
#[inline]
pub(crate) fn locate<T: Scalar, const R: usize, const C: usize>(
    base: i64,
    offset: usize,
    row: usize,
    col: usize,
) -> TensorResult<usize> {
    let index = addressing::checked_index(row, col, R, C)?;
    addressing::byte_offset(base, offset, index, T::WIDTH)
}
