//! Fixed-offset views.
//!
//! A [`FixedView`] addresses one tensor at a constant byte offset in a
//! buffer. Views created with [`FixedView::zeroed`] and friends own a private
//! buffer; views created with [`FixedView::over`] reference a buffer that
//! other views (or a native API) may share.

use crate::{identity_columns, locate, Columns, Tagged, TensorRead, TensorWrite, Untagged};
use colmat_alloc::{
    addressing, AllocOptions, BufferKind, Scalar, ScalarBuffer, TensorError, TensorResult,
};
use std::fmt;
use std::marker::PhantomData;

/// An `R x C` tensor at a constant offset in a scalar buffer.
///
/// # Example
///
/// ```rust
/// use colmat_view::{MatrixView, TensorRead, TensorWrite};
///
/// let mut m = MatrixView::<f32, 3>::identity().unwrap();
/// m.set(0, 2, 5.0).unwrap();
/// assert_eq!(m.get(0, 2).unwrap(), 5.0);
/// assert_eq!(m.get_col(2).unwrap(), [5.0, 0.0, 1.0]);
/// ```
pub struct FixedView<T, const R: usize, const C: usize, S = Untagged, D = Untagged> {
    buffer: ScalarBuffer,
    offset: usize,
    _marker: PhantomData<(T, fn() -> (S, D))>,
}

impl<T: Scalar, const R: usize, const C: usize, S, D> FixedView<T, R, C, S, D> {
    /// Bytes occupied by one tensor of this shape.
    pub const FOOTPRINT: usize = addressing::footprint(R, C, T::WIDTH);

    /// View the tensor stored at byte `offset` of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfBounds`] if the tensor does not fit.
    pub fn over(buffer: ScalarBuffer, offset: usize) -> TensorResult<Self> {
        let fits = offset
            .checked_add(Self::FOOTPRINT)
            .is_some_and(|end| end <= buffer.capacity());
        if !fits {
            return Err(TensorError::OutOfBounds {
                offset,
                width: Self::FOOTPRINT,
                capacity: buffer.capacity(),
            });
        }
        Ok(Self {
            buffer,
            offset,
            _marker: PhantomData,
        })
    }

    /// A zeroed tensor in a private heap buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn zeroed() -> TensorResult<Self> {
        Self::zeroed_in(BufferKind::Heap)
    }

    /// A zeroed tensor in a private buffer of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn zeroed_in(kind: BufferKind) -> TensorResult<Self> {
        Self::over(ScalarBuffer::allocate(Self::FOOTPRINT, kind)?, 0)
    }

    /// A zeroed tensor in a private buffer allocated with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn with_options(options: &AllocOptions) -> TensorResult<Self> {
        Self::over(ScalarBuffer::allocate_with(Self::FOOTPRINT, options)?, 0)
    }

    /// A private tensor holding `columns` (column-major).
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn from_columns(columns: &Columns<T, R, C>) -> TensorResult<Self> {
        let mut view = Self::zeroed()?;
        view.set_columns(columns)?;
        Ok(view)
    }

    /// A private tensor holding `rows` (row-major input, stored
    /// column-major).
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn from_rows(rows: &[[T; C]; R]) -> TensorResult<Self> {
        let mut columns = [[T::ZERO; R]; C];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                columns[c][r] = value;
            }
        }
        Self::from_columns(&columns)
    }

    /// A private identity tensor.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn identity() -> TensorResult<Self> {
        Self::from_columns(&identity_columns())
    }

    /// Constant byte offset of this view.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Another handle to the same tensor bytes.
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            offset: self.offset,
            _marker: PhantomData,
        }
    }

    /// Copy the tensor into a new private heap buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the source or allocating fails.
    pub fn duplicate(&self) -> TensorResult<Self> {
        Self::from_columns(&self.to_columns()?)
    }

    /// Relabel the coordinate spaces of this view.
    #[must_use]
    pub fn retag<S2, D2>(self) -> FixedView<T, R, C, S2, D2> {
        FixedView {
            buffer: self.buffer,
            offset: self.offset,
            _marker: PhantomData,
        }
    }

    /// Give up the view and return its buffer handle.
    #[must_use]
    pub fn into_buffer(self) -> ScalarBuffer {
        self.buffer
    }
}

impl<T: Scalar, const N: usize, S> FixedView<T, N, 1, S, S> {
    /// A private vector holding `components`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn from_array(components: [T; N]) -> TensorResult<Self> {
        Self::from_columns(&[components])
    }

    /// Read vector component `i`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `i >= N`.
    pub fn component(&self, i: usize) -> TensorResult<T> {
        self.get(i, 0)
    }

    /// Write vector component `i`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `i >= N`.
    pub fn set_component(&mut self, i: usize, value: T) -> TensorResult<()> {
        self.set(i, 0, value)
    }

    /// Read all components.
    ///
    /// # Errors
    ///
    /// Returns an address error if the vector lies outside the buffer.
    pub fn to_array(&self) -> TensorResult<[T; N]> {
        self.get_col(0)
    }
}

impl<T: Scalar, const R: usize, const C: usize, S, D> TensorRead<T, R, C>
    for FixedView<T, R, C, S, D>
{
    #[inline]
    fn get(&self, row: usize, col: usize) -> TensorResult<T> {
        let at = locate::<T, R, C>(0, self.offset, row, col)?;
        self.buffer.read(at)
    }

    fn raw_buffer(&self) -> &ScalarBuffer {
        &self.buffer
    }

    fn start_offset(&self) -> TensorResult<usize> {
        Ok(self.offset)
    }
}

impl<T: Scalar, const R: usize, const C: usize, S, D> TensorWrite<T, R, C>
    for FixedView<T, R, C, S, D>
{
    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) -> TensorResult<()> {
        let at = locate::<T, R, C>(0, self.offset, row, col)?;
        self.buffer.write(at, value)
    }
}

impl<T, const R: usize, const C: usize, S, D> Tagged for FixedView<T, R, C, S, D> {
    type Source = S;
    type Target = D;
}

impl<T: Scalar, const R: usize, const C: usize, S, D> fmt::Debug for FixedView<T, R, C, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FixedView");
        s.field("shape", &(R, C)).field("offset", &self.offset);
        match self.to_columns() {
            Ok(columns) => s.field("columns", &columns),
            Err(err) => s.field("error", &err),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatrixView, VectorView};

    #[test]
    fn test_zeroed_is_private() {
        let m = MatrixView::<f64, 4>::zeroed().unwrap();
        assert_eq!(m.raw_buffer().capacity(), 128);
        assert!(!m.raw_buffer().is_shared());
        assert_eq!(m.to_columns().unwrap(), [[0.0; 4]; 4]);
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut m = MatrixView::<f32, 3>::zeroed().unwrap();
        for row in 0..3 {
            for col in 0..3 {
                m.set(row, col, (row * 10 + col) as f32).unwrap();
            }
        }
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(m.get(row, col).unwrap(), (row * 10 + col) as f32);
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let mut m = MatrixView::<i32, 2>::zeroed().unwrap();
        assert_eq!(
            m.get(2, 0),
            Err(TensorError::IndexOutOfRange { index: 2, bound: 2 })
        );
        assert_eq!(
            m.set(0, 7, 1),
            Err(TensorError::IndexOutOfRange { index: 7, bound: 2 })
        );
        assert!(m.get_row(2).is_err());
        assert!(m.set_row(5, [1, 2]).is_err());
        assert!(m.get_col(2).is_err());
        assert!(m.set_col(2, [1, 2]).is_err());
        // nothing was written by the failed bulk setters
        assert_eq!(m.to_columns().unwrap(), [[0, 0], [0, 0]]);
    }

    #[test]
    fn test_rows_and_columns() {
        let m = MatrixView::<i64, 3>::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
        assert_eq!(m.get_row(1).unwrap(), [4, 5, 6]);
        assert_eq!(m.get_col(2).unwrap(), [3, 6, 9]);
        assert_eq!(m.to_columns().unwrap(), [[1, 4, 7], [2, 5, 8], [3, 6, 9]]);
    }

    #[test]
    fn test_over_validates_fit() {
        let buffer = ScalarBuffer::allocate(64, BufferKind::Heap).unwrap();
        assert!(MatrixView::<f32, 4>::over(buffer.clone(), 0).is_ok());
        assert!(MatrixView::<f32, 3>::over(buffer.clone(), 28).is_ok());
        assert_eq!(
            MatrixView::<f32, 4>::over(buffer, 4).unwrap_err(),
            TensorError::OutOfBounds {
                offset: 4,
                width: 64,
                capacity: 64
            }
        );
    }

    #[test]
    fn test_views_share_buffer() {
        let buffer = ScalarBuffer::allocate(32, BufferKind::Heap).unwrap();
        let mut a = MatrixView::<f32, 2>::over(buffer.clone(), 0).unwrap();
        let b = MatrixView::<f32, 2>::over(buffer.clone(), 16).unwrap();
        let alias = a.share();

        a.set(1, 1, 3.0).unwrap();
        assert_eq!(alias.get(1, 1).unwrap(), 3.0);
        assert_eq!(b.get(1, 1).unwrap(), 0.0);
        assert_eq!(buffer.read::<f32>(12).unwrap(), 3.0);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut a = MatrixView::<f64, 2>::identity().unwrap();
        let b = a.duplicate().unwrap();
        a.set(0, 0, 9.0).unwrap();
        assert_eq!(b.get(0, 0).unwrap(), 1.0);
        assert!(!a.raw_buffer().ptr_eq(b.raw_buffer()));
    }

    #[test]
    fn test_copy_from_and_fill() {
        let src = MatrixView::<f32, 2>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let mut dst = MatrixView::<f32, 2>::zeroed_in(BufferKind::Native).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst.to_columns().unwrap(), src.to_columns().unwrap());

        dst.fill(7.0).unwrap();
        assert_eq!(dst.to_columns().unwrap(), [[7.0; 2]; 2]);

        dst.set_identity().unwrap();
        assert_eq!(dst.to_columns().unwrap(), [[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_vector_components() {
        let mut v = VectorView::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(v.component(2).unwrap(), 3.0);
        v.set_component(3, -1.0).unwrap();
        assert_eq!(v.to_array().unwrap(), [1.0, 2.0, 3.0, -1.0]);
        assert!(v.component(4).is_err());
        assert!(v.get(0, 1).is_err());
    }

    #[test]
    fn test_column_major_bytes() {
        let m = MatrixView::<i32, 2>::from_rows(&[[1, 2], [3, 4]]).unwrap();
        let bytes = m.raw_buffer().to_vec();
        let ints: Vec<i32> = bytes
            .chunks_exact(4)
            .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(ints, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_debug_output() {
        let m = MatrixView::<i32, 2>::identity().unwrap();
        let s = format!("{m:?}");
        assert!(s.contains("FixedView"));
        assert!(s.contains("shape: (2, 2)"));
    }
}
