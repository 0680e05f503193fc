//! Integration tests for turgor-types.

use turgor_types::TurgorError;

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn mesh_format_display_carries_line() {
    let err = TurgorError::MeshFormat {
        line: 17,
        message: "unknown token 'vt'".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("line 17"));
    assert!(msg.contains("vt"));
}

#[test]
fn degenerate_tetra_display() {
    let err = TurgorError::DegenerateTetra {
        index: 3,
        volume: -1.0e-4,
    };
    let msg = err.to_string();
    assert!(msg.contains('3'));
}

#[test]
fn non_convergence_display() {
    let err = TurgorError::NonConvergence {
        iterations: 100,
        residual: 1.5e-2,
    };
    let msg = err.to_string();
    assert!(msg.contains("100"));
    assert!(msg.contains("1.5"));
}
