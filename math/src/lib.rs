//! Integer 2D geometry for working with map-space coordinates as they are
//! stored in a WAD: every coordinate is a whole map unit, so nothing in here
//! needs an epsilon.

mod extents;
mod intercept;

pub use extents::*;
pub use glam::IVec2;
pub use intercept::*;
