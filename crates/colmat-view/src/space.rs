//! Coordinate-space markers.
//!
//! Spaces are uninhabited types used only as type parameters. Declare one
//! per coordinate system your application distinguishes:
//!
//! ```rust
//! use colmat_view::space;
//!
//! space!(
//!     /// Object-local coordinates.
//!     Model
//! );
//! space!(World);
//! ```

/// Marker trait for coordinate spaces.
pub trait Space: 'static {}

/// The default space: no coordinate system is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Untagged {}

impl Space for Untagged {}

/// Declare a coordinate-space marker type.
#[macro_export]
macro_rules! space {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {}

        impl $crate::Space for $name {}
    };
}
