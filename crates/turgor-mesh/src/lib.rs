//! # turgor-mesh
//!
//! Tetrahedral mesh representation for the Turgor solver.
//!
//! ## Key Types
//!
//! - [`TetraMesh`] — vertex arena (current + rest coordinates, constraint
//!   markers, rigid groups, holes) with `[u32; 4]` tetrahedra referencing
//!   it by index.
//! - [`Surface`] — boundary triangles of the tet mesh with hinge stencils
//!   and volume/area-normal queries.
//! - Procedural generators for test meshes (single tetra, tetra blocks).

pub mod generators;
pub mod mesh;
pub mod surface;

pub use mesh::TetraMesh;
pub use surface::{tet_face_adjacency, Hinge, Surface};
