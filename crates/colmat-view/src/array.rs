//! Arrays of equally-shaped tensors with a movable cursor.
//!
//! A [`TensorArray`] packs `len` tensors back to back in one buffer and owns
//! the [`SharedBase`] of the views that walk it. Seeking moves the base, so a
//! [`cursor`](TensorArray::cursor) view (and any
//! [`member`](TensorArray::member) views) follow without being rebuilt.

use crate::{FixedView, SharedBase, SharedView, Untagged};
use colmat_alloc::{
    addressing, AllocOptions, Scalar, ScalarBuffer, TensorError, TensorResult,
};
use std::marker::PhantomData;

/// `len` tensors of shape `R x C`, element `i` at byte `i * STRIDE`.
///
/// # Example
///
/// ```rust
/// use colmat_view::{TensorArray, TensorRead, TensorWrite};
///
/// let points = TensorArray::<f32, 3, 1>::zeroed(4).unwrap();
/// let mut cursor = points.cursor();
/// for i in 0..points.len() {
///     points.seek(i).unwrap();
///     cursor.set(0, 0, i as f32).unwrap();
/// }
/// assert_eq!(points.view_at(2).unwrap().get(0, 0).unwrap(), 2.0);
/// ```
pub struct TensorArray<T, const R: usize, const C: usize, S = Untagged, D = Untagged> {
    buffer: ScalarBuffer,
    base: SharedBase,
    len: usize,
    _marker: PhantomData<(T, fn() -> (S, D))>,
}

impl<T: Scalar, const R: usize, const C: usize, S, D> TensorArray<T, R, C, S, D> {
    /// Distance in bytes between consecutive elements.
    pub const STRIDE: usize = addressing::footprint(R, C, T::WIDTH);

    /// `len` zeroed tensors in a heap buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if allocation fails.
    pub fn zeroed(len: usize) -> TensorResult<Self> {
        Self::with_options(len, &AllocOptions::default())
    }

    /// `len` zeroed tensors in a buffer allocated with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if the total size overflows or
    /// allocation fails.
    pub fn with_options(len: usize, options: &AllocOptions) -> TensorResult<Self> {
        let bytes = len
            .checked_mul(Self::STRIDE)
            .ok_or(TensorError::OutOfMemory {
                requested: usize::MAX,
            })?;
        let buffer = ScalarBuffer::allocate_with(bytes, options)?;
        Ok(Self::from_parts(buffer, len))
    }

    /// Treat an existing buffer as an array. Trailing bytes that do not
    /// hold a whole element are ignored.
    #[must_use]
    pub fn over(buffer: ScalarBuffer) -> Self {
        let len = buffer.capacity().checked_div(Self::STRIDE).unwrap_or(0);
        Self::from_parts(buffer, len)
    }

    fn from_parts(buffer: ScalarBuffer, len: usize) -> Self {
        Self {
            buffer,
            base: SharedBase::new(0),
            len,
            _marker: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the array has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the element under the cursor, or `None` if the base was
    /// moved off an element boundary.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        let base = usize::try_from(self.base.get()).ok()?;
        let stride = Self::STRIDE;
        if stride == 0 || base % stride != 0 || base / stride >= self.len {
            return None;
        }
        Some(base / stride)
    }

    /// Move the cursor to element `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `index >= len`; the
    /// cursor does not move.
    pub fn seek(&self, index: usize) -> TensorResult<()> {
        let start = self.element_offset(index)?;
        let base = i64::try_from(start).map_err(|_| TensorError::AddressOverflow {
            base: 0,
            offset: start,
            index: 0,
            width: T::WIDTH,
        })?;
        tracing::trace!(index, base, "tensor array seek");
        self.base.set(base);
        Ok(())
    }

    /// Move the cursor to the next element. Returns `false`, leaving the
    /// cursor in place, when it is on the last element or off an element
    /// boundary (see [`position`](Self::position)); use
    /// [`seek`](Self::seek) to recover from the latter.
    pub fn advance(&self) -> bool {
        match self.position() {
            Some(i) => self.seek(i + 1).is_ok(),
            None => false,
        }
    }

    /// A view of the element under the cursor.
    #[must_use]
    pub fn cursor(&self) -> SharedView<'_, T, R, C, S, D> {
        SharedView::new(self.buffer.clone(), &self.base, 0)
    }

    /// A view of an `R2 x C2` part of the element under the cursor,
    /// starting `offset` bytes into the element.
    #[must_use]
    pub fn member<const R2: usize, const C2: usize>(
        &self,
        offset: usize,
    ) -> SharedView<'_, T, R2, C2> {
        SharedView::new(self.buffer.clone(), &self.base, offset)
    }

    /// A fixed view of element `index`, independent of the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if `index >= len`.
    pub fn view_at(&self, index: usize) -> TensorResult<FixedView<T, R, C, S, D>> {
        FixedView::over(self.buffer.clone(), self.element_offset(index)?)
    }

    /// Byte offset of every element, in order.
    pub fn iter_offsets(&self) -> impl Iterator<Item = usize> {
        (0..self.len).map(|i| i * Self::STRIDE)
    }

    /// The backing buffer.
    #[must_use]
    pub fn buffer(&self) -> &ScalarBuffer {
        &self.buffer
    }

    /// The base the cursor follows. Views built on it with
    /// [`SharedView::new`] move with the cursor too.
    #[must_use]
    pub fn base(&self) -> &SharedBase {
        &self.base
    }

    fn element_offset(&self, index: usize) -> TensorResult<usize> {
        if index >= self.len {
            return Err(TensorError::IndexOutOfRange {
                index,
                bound: self.len,
            });
        }
        Ok(index * Self::STRIDE)
    }
}

impl<T: Scalar, const R: usize, const C: usize, S, D> std::fmt::Debug
    for TensorArray<T, R, C, S, D>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorArray")
            .field("shape", &(R, C))
            .field("len", &self.len)
            .field("position", &self.position())
            .field("buffer", &self.buffer)
            .finish()
    }
}
