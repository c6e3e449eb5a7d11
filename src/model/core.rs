//! Core mesh types shared by every format

use crate::error::{Error, Result};

use super::material::Color;
use super::transform::Matrix4;

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A direction in 3D space, used for face normals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// The zero vector
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Whether all three components are zero
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// A 2D point, used for texture coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// U / X coordinate
    pub x: f64,
    /// V / Y coordinate
    pub y: f64,
}

impl Point2 {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One mesh object, the common representation every codec converts to and from
///
/// Triangles are stored indexed: `triangle_indices` is a flat list in which
/// every consecutive group of three entries indexes into `positions`.
/// `normals` holds one normal per face (not per vertex) when present.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshModel {
    /// Object ID, unique within a saved collection
    pub id: i32,
    /// Vertex coordinates; their order is the index space of `triangle_indices`
    pub positions: Vec<Point3>,
    /// Face normals, either empty or one per triangle
    pub normals: Vec<Vector3>,
    /// Flat triangle vertex indices, length a multiple of 3
    pub triangle_indices: Vec<usize>,
    /// Texture coordinates, parallel to `positions` when present
    pub texture_coordinates: Vec<Point2>,
    /// Object transform
    pub transform: Matrix4,
    /// Display color
    pub material_color: Color,
    /// Path of an associated material file; not read or written by any codec
    pub material_file_path: String,
}

impl MeshModel {
    /// ID carried by a model before one is assigned
    pub const UNASSIGNED_ID: i32 = -1;

    /// Create an empty model with default ID, identity transform and default color
    pub fn new() -> Self {
        Self {
            id: Self::UNASSIGNED_ID,
            positions: Vec::new(),
            normals: Vec::new(),
            triangle_indices: Vec::new(),
            texture_coordinates: Vec::new(),
            transform: Matrix4::IDENTITY,
            material_color: Color::DARK_SLATE_GRAY,
            material_file_path: String::new(),
        }
    }

    /// Create an empty model with the given ID
    pub fn with_id(id: i32) -> Self {
        Self {
            id,
            ..Self::new()
        }
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Check the structural invariants of the model
    ///
    /// - `triangle_indices.len()` is a multiple of 3
    /// - every index is a valid index into `positions`
    /// - `normals` is empty or holds exactly one normal per triangle
    pub fn validate(&self) -> Result<()> {
        if self.triangle_indices.len() % 3 != 0 {
            return Err(Error::InvalidModel(format!(
                "Object {}: triangle index count {} is not a multiple of 3",
                self.id,
                self.triangle_indices.len()
            )));
        }

        if let Some((slot, &index)) = self
            .triangle_indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index >= self.positions.len())
        {
            return Err(Error::InvalidModel(format!(
                "Object {}: triangle index {} at position {} is out of bounds \
                 (vertex count: {})",
                self.id,
                index,
                slot,
                self.positions.len()
            )));
        }

        if !self.normals.is_empty() && self.normals.len() != self.triangle_count() {
            return Err(Error::InvalidModel(format!(
                "Object {}: {} normals for {} triangles",
                self.id,
                self.normals.len(),
                self.triangle_count()
            )));
        }

        Ok(())
    }
}

impl Default for MeshModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn single_triangle() -> MeshModel {
        let mut model = MeshModel::new();
        model.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        model.triangle_indices = vec![0, 1, 2];
        model
    }

    #[test]
    fn test_new_model_defaults() {
        let model = MeshModel::new();
        assert_eq!(model.id, -1);
        assert!(model.positions.is_empty());
        assert!(model.normals.is_empty());
        assert!(model.triangle_indices.is_empty());
        assert!(model.texture_coordinates.is_empty());
        assert!(model.transform.is_identity());
        assert_eq!(model.material_color, Color::DARK_SLATE_GRAY);
        assert!(model.material_file_path.is_empty());
    }

    #[test]
    fn test_validate_accepts_valid_model() {
        let mut model = single_triangle();
        assert!(model.validate().is_ok());
        model.normals.push(Vector3::new(0.0, 0.0, 1.0));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut model = single_triangle();
        model.triangle_indices.push(0);
        let err = model.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralFormat);
        assert!(err.to_string().contains("multiple of 3"));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_index() {
        let mut model = single_triangle();
        model.triangle_indices[2] = 3;
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_validate_rejects_normal_count_mismatch() {
        let mut model = single_triangle();
        model.normals = vec![Vector3::new(0.0, 0.0, 1.0); 2];
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_vector_zero() {
        assert!(Vector3::ZERO.is_zero());
        assert!(!Vector3::new(0.0, 0.0, 1.0).is_zero());
        assert!(Vector3::default().is_zero());
    }
}
