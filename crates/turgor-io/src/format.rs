//! Tetra mesh parsing and serialization.
//!
//! The parser is two-phase: tokenize every line into raw vertex/tetra/
//! constraint records, then build (and validate) the mesh. Index bounds
//! are checked during the build so a bad `t` line aborts before any
//! solver sees the mesh.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use turgor_math::Vec3;
use turgor_mesh::TetraMesh;
use turgor_types::{Scalar, TurgorError, TurgorResult};

/// All indices in the file format are 1-based.
const INDEX_BIAS: u32 = 1;

/// Raw records collected from a mesh file before the build step.
#[derive(Debug, Default)]
struct MeshData {
    vertices: Vec<Vec3>,
    tets: Vec<(usize, [i64; 4])>,
    fixed: Vec<(usize, Vec<i64>)>,
    rigid: Vec<(usize, Vec<i64>)>,
    holes: Vec<(usize, Vec<i64>)>,
}

fn format_error(line: usize, message: impl Into<String>) -> TurgorError {
    TurgorError::MeshFormat {
        line,
        message: message.into(),
    }
}

fn parse_scalars(line: usize, tokens: &[&str], count: usize) -> TurgorResult<Vec<Scalar>> {
    if tokens.len() < count {
        return Err(format_error(
            line,
            format!("expected {count} numbers, found {}", tokens.len()),
        ));
    }
    tokens[..count]
        .iter()
        .map(|t| {
            t.parse::<Scalar>()
                .map_err(|_| format_error(line, format!("invalid number '{t}'")))
        })
        .collect()
}

fn parse_ids(line: usize, tokens: &[&str]) -> TurgorResult<Vec<i64>> {
    tokens
        .iter()
        .map(|t| {
            t.parse::<i64>()
                .map_err(|_| format_error(line, format!("invalid index '{t}'")))
        })
        .collect()
}

/// Reads a tetra mesh from a buffered reader.
pub fn read_tetra_mesh(reader: impl BufRead) -> TurgorResult<TetraMesh> {
    let mut data = MeshData::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(token) = tokens.next() else {
            continue; // blank line
        };
        let rest: Vec<&str> = tokens.collect();

        match token {
            "v" => {
                let xyz = parse_scalars(line_no, &rest, 3)?;
                data.vertices.push(Vec3::new(xyz[0], xyz[1], xyz[2]));
            }
            "t" => {
                let ids = parse_ids(line_no, &rest)?;
                if ids.len() != 4 {
                    return Err(format_error(
                        line_no,
                        format!("tetra needs 4 indices, found {}", ids.len()),
                    ));
                }
                data.tets.push((line_no, [ids[0], ids[1], ids[2], ids[3]]));
            }
            "x" => data.fixed.push((line_no, parse_ids(line_no, &rest)?)),
            "r" => data.rigid.push((line_no, parse_ids(line_no, &rest)?)),
            "h" => data.holes.push((line_no, parse_ids(line_no, &rest)?)),
            "o" | "g" | "s" | "mtllib" | "usemtl" => {}
            _ if token.starts_with('#') => {}
            other => {
                return Err(format_error(
                    line_no,
                    format!("unknown token '{other}'"),
                ));
            }
        }
    }

    build_mesh(data)
}

/// Rebias a 1-based file index, bounds-checked against the vertex count.
fn rebias(line: usize, id: i64, vertex_count: usize) -> TurgorResult<u32> {
    if id < INDEX_BIAS as i64 || (id - INDEX_BIAS as i64) as usize >= vertex_count {
        return Err(format_error(
            line,
            format!("index {id} out of range (vertex count: {vertex_count})"),
        ));
    }
    Ok(id as u32 - INDEX_BIAS)
}

fn build_mesh(data: MeshData) -> TurgorResult<TetraMesh> {
    let vertex_count = data.vertices.len();

    let mut tets = Vec::with_capacity(data.tets.len());
    for (line, ids) in &data.tets {
        let mut tet = [0u32; 4];
        for (slot, &id) in tet.iter_mut().zip(ids) {
            *slot = rebias(*line, id, vertex_count)?;
        }
        tets.push(tet);
    }

    let mut mesh = TetraMesh::from_parts(data.vertices, tets)?;

    for (line, ids) in &data.fixed {
        for &id in ids {
            let id = rebias(*line, id, vertex_count)?;
            mesh.fixed[id as usize] = true;
        }
    }
    for (line, ids) in &data.rigid {
        let group: TurgorResult<Vec<u32>> =
            ids.iter().map(|&id| rebias(*line, id, vertex_count)).collect();
        mesh.rigid_groups.push(group?);
    }
    for (line, ids) in &data.holes {
        let group: TurgorResult<Vec<u32>> =
            ids.iter().map(|&id| rebias(*line, id, vertex_count)).collect();
        mesh.holes.push(group?);
    }

    Ok(mesh)
}

/// Writes a tetra mesh.
///
/// Emits a leading `#` comment (arbitrary metadata), then vertices,
/// tetrahedra, fixed ids, rigid groups, and holes, all re-biased to
/// 1-based indices. Round-trips exactly through [`read_tetra_mesh`].
pub fn write_tetra_mesh(
    writer: &mut impl Write,
    mesh: &TetraMesh,
    comment: &str,
) -> TurgorResult<()> {
    writeln!(writer, "# {comment}")?;

    for pos in &mesh.positions {
        writeln!(writer, "v {} {} {}", pos.x, pos.y, pos.z)?;
    }

    for tet in &mesh.tets {
        writeln!(
            writer,
            "t {} {} {} {}",
            tet[0] + INDEX_BIAS,
            tet[1] + INDEX_BIAS,
            tet[2] + INDEX_BIAS,
            tet[3] + INDEX_BIAS
        )?;
    }

    let fixed = mesh.fixed_ids();
    if !fixed.is_empty() {
        write!(writer, "x")?;
        for id in fixed {
            write!(writer, " {}", id + INDEX_BIAS)?;
        }
        writeln!(writer)?;
    }

    for group in &mesh.rigid_groups {
        write!(writer, "r")?;
        for &id in group {
            write!(writer, " {}", id + INDEX_BIAS)?;
        }
        writeln!(writer)?;
    }

    for group in &mesh.holes {
        write!(writer, "h")?;
        for &id in group {
            write!(writer, " {}", id + INDEX_BIAS)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Reads a tetra mesh from a file path.
pub fn read_tetra_mesh_file(path: impl AsRef<Path>) -> TurgorResult<TetraMesh> {
    let file = File::open(path)?;
    read_tetra_mesh(BufReader::new(file))
}

/// Writes a tetra mesh to a file path.
pub fn write_tetra_mesh_file(
    path: impl AsRef<Path>,
    mesh: &TetraMesh,
    comment: &str,
) -> TurgorResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_tetra_mesh(&mut writer, mesh, comment)
}
