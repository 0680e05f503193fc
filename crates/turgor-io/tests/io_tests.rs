//! Integration tests for turgor-io.

use std::io::Cursor;

use turgor_io::{read_tetra_mesh, write_tetra_mesh};
use turgor_mesh::generators::{single_tetra, tetra_block};
use turgor_types::TurgorError;

// ─── Parser Tests ─────────────────────────────────────────────

#[test]
fn parse_minimal_mesh() {
    let src = "\
# a single tetra
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
t 1 2 3 4
x 1
";
    let mesh = read_tetra_mesh(Cursor::new(src)).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.tetra_count(), 1);
    assert_eq!(mesh.tets[0], [0, 1, 2, 3]);
    assert!(mesh.fixed[0]);
    assert!(!mesh.fixed[1]);
}

#[test]
fn ignored_tokens() {
    let src = "\
o membrane
g shell
s off
mtllib none.mtl
usemtl none

v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
t 1 2 3 4
";
    let mesh = read_tetra_mesh(Cursor::new(src)).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
}

#[test]
fn unknown_token_aborts() {
    let src = "v 0 0 0\nvn 1 0 0\n";
    let err = read_tetra_mesh(Cursor::new(src)).unwrap_err();
    match err {
        TurgorError::MeshFormat { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("vn"));
        }
        other => panic!("expected MeshFormat, got {other:?}"),
    }
}

#[test]
fn tetra_index_out_of_range() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nt 1 2 3 9\n";
    let err = read_tetra_mesh(Cursor::new(src)).unwrap_err();
    assert!(matches!(err, TurgorError::MeshFormat { line: 5, .. }));
}

#[test]
fn tetra_index_zero_rejected() {
    // Indices are 1-based; 0 is out of range, not "the last vertex".
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nt 0 1 2 3\n";
    assert!(read_tetra_mesh(Cursor::new(src)).is_err());
}

#[test]
fn malformed_vertex_rejected() {
    let src = "v 0 zero 0\n";
    assert!(read_tetra_mesh(Cursor::new(src)).is_err());
}

#[test]
fn rigid_and_hole_groups() {
    let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
t 1 2 3 4
r 1 2
h 3 4
";
    let mesh = read_tetra_mesh(Cursor::new(src)).unwrap();
    assert_eq!(mesh.rigid_groups, vec![vec![0, 1]]);
    assert_eq!(mesh.holes, vec![vec![2, 3]]);
}

// ─── Round-Trip Tests ─────────────────────────────────────────

#[test]
fn round_trip_single_tetra() {
    let mut mesh = single_tetra();
    mesh.fix_vertices(&[0, 2]);
    mesh.rigid_groups.push(vec![1, 3]);
    mesh.holes.push(vec![0, 1, 2]);

    let mut buf = Vec::new();
    write_tetra_mesh(&mut buf, &mesh, "round trip").unwrap();
    let recovered = read_tetra_mesh(Cursor::new(&buf)).unwrap();

    assert_eq!(recovered.positions, mesh.positions);
    assert_eq!(recovered.tets, mesh.tets);
    assert_eq!(recovered.fixed_ids(), mesh.fixed_ids());
    assert_eq!(recovered.rigid_groups, mesh.rigid_groups);
    assert_eq!(recovered.holes, mesh.holes);
}

#[test]
fn round_trip_block() {
    let mut mesh = tetra_block(2, 2, 1, 0.25);
    mesh.fix_vertices(&[0, 5, 7]);

    let mut buf = Vec::new();
    write_tetra_mesh(&mut buf, &mesh, "block").unwrap();
    let recovered = read_tetra_mesh(Cursor::new(&buf)).unwrap();

    assert_eq!(recovered.positions, mesh.positions);
    assert_eq!(recovered.tets, mesh.tets);
    assert_eq!(recovered.fixed_ids(), mesh.fixed_ids());
}

#[test]
fn comment_line_written_first() {
    let mesh = single_tetra();
    let mut buf = Vec::new();
    write_tetra_mesh(&mut buf, &mesh, "pressure = 0.25").unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("# pressure = 0.25\n"));
}
