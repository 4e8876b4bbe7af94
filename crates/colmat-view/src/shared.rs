//! Shared-base views.
//!
//! A [`SharedBase`] is a movable byte offset that several [`SharedView`]s
//! borrow. A view adds its own constant offset to the base on every access,
//! so moving the base repositions the whole family at once:
//!
//! ```rust
//! use colmat_alloc::{BufferKind, ScalarBuffer};
//! use colmat_view::{SharedBase, SharedView, TensorRead, TensorWrite};
//!
//! let buffer = ScalarBuffer::allocate(64, BufferKind::Heap).unwrap();
//! let base = SharedBase::new(0);
//! let mut a = SharedView::<f32, 2, 2>::new(buffer.clone(), &base, 0);
//! let b = SharedView::<f32, 2, 2>::new(buffer, &base, 16);
//!
//! a.set(0, 0, 1.0).unwrap();
//! base.advance(32);
//! assert_eq!(a.get(0, 0).unwrap(), 0.0); // element 1 is still zeroed
//! assert_eq!(b.current_offset().unwrap(), 48);
//! ```

use crate::{locate, Tagged, TensorRead, TensorWrite, Untagged};
use colmat_alloc::{addressing, Scalar, ScalarBuffer, TensorResult};
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

/// A movable base offset shared by a family of views.
///
/// The base is signed; a negative base is legal as long as every view's
/// `base + offset` lands inside its buffer when it is accessed.
#[derive(Debug, Default)]
pub struct SharedBase {
    value: Cell<i64>,
}

impl SharedBase {
    /// Create a base at `value`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> i64 {
        self.value.get()
    }

    /// Move the base to `value`.
    #[inline]
    pub fn set(&self, value: i64) {
        self.value.set(value);
    }

    /// Move the base by `delta` bytes. Saturates instead of wrapping; a
    /// saturated base makes every subsequent access fail with an address
    /// error.
    #[inline]
    pub fn advance(&self, delta: i64) {
        self.value.set(self.value.get().saturating_add(delta));
    }
}

/// An `R x C` tensor at `base + offset` in a scalar buffer.
///
/// The base is read on every access. No bounds are checked at construction;
/// an access that leaves the buffer fails at access time.
pub struct SharedView<'b, T, const R: usize, const C: usize, S = Untagged, D = Untagged> {
    buffer: ScalarBuffer,
    base: &'b SharedBase,
    offset: usize,
    _marker: PhantomData<(T, fn() -> (S, D))>,
}

impl<'b, T: Scalar, const R: usize, const C: usize, S, D> SharedView<'b, T, R, C, S, D> {
    /// Bytes occupied by one tensor of this shape.
    pub const FOOTPRINT: usize = addressing::footprint(R, C, T::WIDTH);

    /// View the tensor at `base + offset` of `buffer`.
    #[must_use]
    pub fn new(buffer: ScalarBuffer, base: &'b SharedBase, offset: usize) -> Self {
        Self {
            buffer,
            base,
            offset,
            _marker: PhantomData,
        }
    }

    /// The shared base this view follows.
    #[must_use]
    pub fn base(&self) -> &'b SharedBase {
        self.base
    }

    /// Constant offset relative to the base.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute byte offset of component `(0, 0)` right now.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::AddressOverflow`](colmat_alloc::TensorError)
    /// if `base + offset` is negative or not representable.
    pub fn current_offset(&self) -> TensorResult<usize> {
        addressing::byte_offset(self.base.get(), self.offset, 0, T::WIDTH)
    }

    /// Another view on the same buffer and base.
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            base: self.base,
            offset: self.offset,
            _marker: PhantomData,
        }
    }

    /// Relabel the coordinate spaces of this view.
    #[must_use]
    pub fn retag<S2, D2>(self) -> SharedView<'b, T, R, C, S2, D2> {
        SharedView {
            buffer: self.buffer,
            base: self.base,
            offset: self.offset,
            _marker: PhantomData,
        }
    }
}

impl<T: Scalar, const N: usize, S> SharedView<'_, T, N, 1, S, S> {
    /// Read vector component `i`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`](colmat_alloc::TensorError)
    /// if `i >= N`, or an address error.
    pub fn component(&self, i: usize) -> TensorResult<T> {
        self.get(i, 0)
    }

    /// Write vector component `i`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`](colmat_alloc::TensorError)
    /// if `i >= N`, or an address error.
    pub fn set_component(&mut self, i: usize, value: T) -> TensorResult<()> {
        self.set(i, 0, value)
    }
}

impl<T: Scalar, const R: usize, const C: usize, S, D> TensorRead<T, R, C>
    for SharedView<'_, T, R, C, S, D>
{
    #[inline]
    fn get(&self, row: usize, col: usize) -> TensorResult<T> {
        let at = locate::<T, R, C>(self.base.get(), self.offset, row, col)?;
        self.buffer.read(at)
    }

    fn raw_buffer(&self) -> &ScalarBuffer {
        &self.buffer
    }

    fn start_offset(&self) -> TensorResult<usize> {
        self.current_offset()
    }
}

impl<T: Scalar, const R: usize, const C: usize, S, D> TensorWrite<T, R, C>
    for SharedView<'_, T, R, C, S, D>
{
    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) -> TensorResult<()> {
        let at = locate::<T, R, C>(self.base.get(), self.offset, row, col)?;
        self.buffer.write(at, value)
    }
}

impl<T, const R: usize, const C: usize, S, D> Tagged for SharedView<'_, T, R, C, S, D> {
    type Source = S;
    type Target = D;
}

impl<T: Scalar, const R: usize, const C: usize, S, D> fmt::Debug
    for SharedView<'_, T, R, C, S, D>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedView")
            .field("shape", &(R, C))
            .field("base", &self.base.get())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colmat_alloc::{BufferKind, TensorError};

    fn buffer(bytes: usize) -> ScalarBuffer {
        ScalarBuffer::allocate(bytes, BufferKind::Heap).unwrap()
    }

    #[test]
    fn test_base_moves() {
        let base = SharedBase::new(8);
        assert_eq!(base.get(), 8);
        base.advance(24);
        assert_eq!(base.get(), 32);
        base.advance(-40);
        assert_eq!(base.get(), -8);
        base.set(0);
        assert_eq!(base.get(), 0);
        base.set(i64::MAX);
        base.advance(1);
        assert_eq!(base.get(), i64::MAX);
    }

    #[test]
    fn test_family_follows_base() {
        let buf = buffer(64);
        let base = SharedBase::new(0);
        let mut a = SharedView::<f32, 2, 2>::new(buf.clone(), &base, 0);
        let mut b = SharedView::<f32, 2, 2>::new(buf.clone(), &base, 16);

        a.set_identity().unwrap();
        b.fill(2.0).unwrap();
        assert_eq!(a.current_offset(), Ok(0));
        assert_eq!(b.current_offset(), Ok(16));

        base.advance(32);
        assert_eq!(a.current_offset(), Ok(32));
        assert_eq!(b.current_offset(), Ok(48));
        assert_eq!(a.to_columns().unwrap(), [[0.0; 2]; 2]);

        a.set(1, 0, 5.0).unwrap();
        assert_eq!(buf.read::<f32>(36).unwrap(), 5.0);

        base.set(0);
        assert_eq!(a.to_columns().unwrap(), [[1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(b.to_columns().unwrap(), [[2.0; 2]; 2]);
    }

    #[test]
    fn test_negative_base() {
        let buf = buffer(16);
        let base = SharedBase::new(-16);
        let mut v = SharedView::<i32, 4, 1>::new(buf.clone(), &base, 16);
        v.set_component(3, 7).unwrap();
        assert_eq!(buf.read::<i32>(12).unwrap(), 7);

        base.set(-20);
        assert!(matches!(
            v.component(0),
            Err(TensorError::AddressOverflow { .. })
        ));
    }

    #[test]
    fn test_access_past_end_fails() {
        let buf = buffer(32);
        let base = SharedBase::new(16);
        let m = SharedView::<f32, 2, 2>::new(buf, &base, 0);
        assert!(m.get(0, 0).is_ok());
        assert!(m.get(1, 1).is_ok());
        base.advance(4);
        assert!(matches!(
            m.get(1, 1),
            Err(TensorError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_share_and_retag() {
        let buf = buffer(16);
        let base = SharedBase::default();
        let a = SharedView::<f32, 2, 2>::new(buf, &base, 0);
        let mut b = a.share().retag::<u8, u16>();
        b.set(0, 1, 4.0).unwrap();
        assert_eq!(a.get(0, 1).unwrap(), 4.0);
        assert!(std::ptr::eq(a.base(), b.base()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use colmat_alloc::BufferKind;
    use proptest::prelude::*;

    proptest! {
        /// Every view of a family lands at base + its own offset.
        #[test]
        fn prop_views_track_base(
            element in 0_usize..8,
            row in 0_usize..3,
            col in 0_usize..3,
            value in any::<i32>(),
        ) {
            let buffer = ScalarBuffer::allocate(8 * 72, BufferKind::Heap).unwrap();
            let base = SharedBase::new(0);
            let mut m = SharedView::<i32, 3, 3>::new(buffer.clone(), &base, 0);
            let v = SharedView::<i32, 3, 1>::new(buffer.clone(), &base, 36);

            base.set(i64::try_from(element * 72).unwrap());
            m.set(row, col, value).unwrap();

            let at = element * 72 + (col * 3 + row) * 4;
            prop_assert_eq!(buffer.read::<i32>(at).unwrap(), value);
            prop_assert_eq!(v.start_offset().unwrap(), element * 72 + 36);
        }
    }
}
