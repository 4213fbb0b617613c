//! A concrete, intentionally simple backing for the geometry kernel treated
//! as an opaque external collaborator: primitives, boolean ops, affine
//! transforms, extrusion/revolution, and binary STL export, grounded on the
//! classic BSP-tree CSG algorithm (Laidlaw/Thibault, popularized by the
//! public-domain `csg.js` reference implementation).
//! This module has no codebase precedent to imitate beyond the reference
//! algorithm itself.

pub mod bsp;
pub mod mesh;
pub mod slice;
pub mod solid;
pub mod stl;

pub use mesh::{Plane, Polygon, Vertex};
pub use slice::{BoundingRect, Slice};
pub use solid::{BoundingBox, Solid};
