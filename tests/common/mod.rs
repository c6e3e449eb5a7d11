//! Mesh fixtures shared by the integration tests

#![allow(dead_code)]

use meshfiles::{MeshModel, Point3, SoupTriangle, SoupVertex, Vector3};

/// The single-facet ASCII STL document used across tests
pub const SINGLE_FACET_STL: &str = "solid X\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid X\n";

/// A unit tetrahedron as an STL-style model (no shared vertices, one normal per face)
pub fn tetrahedron() -> MeshModel {
    let o = SoupVertex::new(0.0, 0.0, 0.0);
    let x = SoupVertex::new(1.0, 0.0, 0.0);
    let y = SoupVertex::new(0.0, 1.0, 0.0);
    let z = SoupVertex::new(0.0, 0.0, 1.0);
    let k = 1.0 / 3f64.sqrt();

    let mut model = MeshModel::new();
    for triangle in [
        SoupTriangle::with_normal(Vector3::new(0.0, 0.0, -1.0), o, y, x),
        SoupTriangle::with_normal(Vector3::new(0.0, -1.0, 0.0), o, x, z),
        SoupTriangle::with_normal(Vector3::new(-1.0, 0.0, 0.0), o, z, y),
        SoupTriangle::with_normal(Vector3::new(k, k, k), x, y, z),
    ] {
        model.append_triangle(&triangle);
    }
    model
}

/// An indexed unit cube: 8 shared vertices, 12 triangles, no normals
pub fn indexed_cube(id: i32) -> MeshModel {
    let mut model = MeshModel::with_id(id);
    model.positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    model.triangle_indices = vec![
        0, 2, 1, 0, 3, 2, // bottom
        4, 5, 6, 4, 6, 7, // top
        0, 1, 5, 0, 5, 4, // front
        1, 2, 6, 1, 6, 5, // right
        2, 3, 7, 2, 7, 6, // back
        3, 0, 4, 3, 4, 7, // left
    ];
    model
}

/// Assert two points agree to within `tolerance` on every axis
pub fn assert_close(a: Point3, b: Point3, tolerance: f64) {
    assert!(
        (a.x - b.x).abs() <= tolerance
            && (a.y - b.y).abs() <= tolerance
            && (a.z - b.z).abs() <= tolerance,
        "{:?} != {:?} (tolerance {})",
        a,
        b,
        tolerance
    );
}
