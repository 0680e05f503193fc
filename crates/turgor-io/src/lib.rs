//! # turgor-io
//!
//! Reader and writer for the line-oriented tetra mesh format.
//!
//! The format is OBJ-flavored with 1-based indices:
//!
//! ```text
//! # optional comment / metadata
//! v x y z          vertex position
//! t i j k l        tetrahedron (four vertex indices)
//! x id id ...      fixed vertex ids
//! r id id ...      rigid-body vertex group
//! h id id ...      hole vertex group
//! ```
//!
//! `o`, `g`, `s`, `mtllib`, `usemtl`, and blank lines are ignored; any
//! other token is a format error and aborts the load.

pub mod format;

pub use format::{read_tetra_mesh, read_tetra_mesh_file, write_tetra_mesh, write_tetra_mesh_file};
