//! Triangle soup: a flat per-triangle view of a [`MeshModel`]
//!
//! STL stores every triangle as three independent vertices plus a face
//! normal. The soup types bridge that layout and the indexed storage of
//! [`MeshModel`]. A soup is rebuilt on every STL save and dropped afterwards.

use crate::error::{Error, Result};

use super::core::{MeshModel, Point3, Vector3};

/// A triangle soup vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoupVertex {
    /// Index into the owning model's `positions`, `None` until assigned
    pub index: Option<usize>,
    /// Vertex coordinates
    pub location: Point3,
}

impl SoupVertex {
    /// Create an unassigned vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::at(Point3::new(x, y, z))
    }

    /// Create an unassigned vertex at a point
    pub fn at(location: Point3) -> Self {
        Self {
            index: None,
            location,
        }
    }
}

/// A triangle soup entry: three vertices and an optional face normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoupTriangle {
    /// Face normal
    pub normal: Option<Vector3>,
    /// First vertex
    pub a: SoupVertex,
    /// Second vertex
    pub b: SoupVertex,
    /// Third vertex
    pub c: SoupVertex,
}

impl SoupTriangle {
    /// Create a triangle without a normal
    pub fn new(a: SoupVertex, b: SoupVertex, c: SoupVertex) -> Self {
        Self {
            normal: None,
            a,
            b,
            c,
        }
    }

    /// Create a triangle with a face normal
    pub fn with_normal(normal: Vector3, a: SoupVertex, b: SoupVertex, c: SoupVertex) -> Self {
        Self {
            normal: Some(normal),
            a,
            b,
            c,
        }
    }

    /// The normal to write out; missing normals are written as zero
    pub fn normal_or_zero(&self) -> Vector3 {
        self.normal.unwrap_or(Vector3::ZERO)
    }
}

/// A whole mesh as independent triangles
pub type TriangleSoup = Vec<SoupTriangle>;

impl MeshModel {
    /// Append a soup triangle as three new vertices
    ///
    /// Vertices are never merged with existing positions, even when they are
    /// geometrically identical. The triangle's normal is appended to `normals`
    /// unless it is missing or zero, so a model must not mix triangles with
    /// and without normals.
    ///
    /// Returns the indices the three vertices were stored at.
    pub fn append_triangle(&mut self, triangle: &SoupTriangle) -> [usize; 3] {
        let mut indices = [0; 3];
        for (slot, vertex) in [&triangle.a, &triangle.b, &triangle.c].into_iter().enumerate() {
            self.positions.push(vertex.location);
            indices[slot] = self.positions.len() - 1;
        }
        self.triangle_indices.extend_from_slice(&indices);

        if let Some(normal) = triangle.normal
            && !normal.is_zero()
        {
            self.normals.push(normal);
        }

        indices
    }

    /// Rebuild the model as a triangle soup
    ///
    /// Normals are attached by ordinal position, and only when there is
    /// exactly one per triangle.
    pub fn to_triangle_soup(&self) -> Result<TriangleSoup> {
        if self.triangle_indices.len() % 3 != 0 {
            return Err(Error::InvalidModel(format!(
                "Triangle index count {} is not a multiple of 3",
                self.triangle_indices.len()
            )));
        }

        let vertex_at = |index: usize| -> Result<SoupVertex> {
            let location = self.positions.get(index).copied().ok_or_else(|| {
                Error::InvalidModel(format!(
                    "Triangle references vertex {} but the model has {} vertices",
                    index,
                    self.positions.len()
                ))
            })?;
            Ok(SoupVertex {
                index: Some(index),
                location,
            })
        };

        let mut soup: TriangleSoup = self
            .triangle_indices
            .chunks_exact(3)
            .map(|chunk| {
                Ok(SoupTriangle::new(
                    vertex_at(chunk[0])?,
                    vertex_at(chunk[1])?,
                    vertex_at(chunk[2])?,
                ))
            })
            .collect::<Result<_>>()?;

        if self.normals.len() == soup.len() {
            for (triangle, normal) in soup.iter_mut().zip(&self.normals) {
                triangle.normal = Some(*normal);
            }
        }

        Ok(soup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn unit_triangle(normal: Option<Vector3>) -> SoupTriangle {
        SoupTriangle {
            normal,
            a: SoupVertex::new(0.0, 0.0, 0.0),
            b: SoupVertex::new(1.0, 0.0, 0.0),
            c: SoupVertex::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn test_append_triangle_never_welds() {
        let mut model = MeshModel::new();
        let triangle = unit_triangle(Some(Vector3::new(0.0, 0.0, 1.0)));

        assert_eq!(model.append_triangle(&triangle), [0, 1, 2]);
        assert_eq!(model.append_triangle(&triangle), [3, 4, 5]);

        assert_eq!(model.positions.len(), 6);
        assert_eq!(model.triangle_indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(model.normals.len(), 2);
        assert_eq!(model.positions[0], model.positions[3]);
    }

    #[test]
    fn test_append_triangle_skips_missing_and_zero_normals() {
        let mut model = MeshModel::new();
        model.append_triangle(&unit_triangle(None));
        model.append_triangle(&unit_triangle(Some(Vector3::ZERO)));

        assert_eq!(model.triangle_count(), 2);
        assert!(model.normals.is_empty());
    }

    #[test]
    fn test_to_triangle_soup_attaches_normals_by_position() {
        let mut model = MeshModel::new();
        model.append_triangle(&unit_triangle(Some(Vector3::new(0.0, 0.0, 1.0))));
        model.append_triangle(&unit_triangle(Some(Vector3::new(0.0, 0.0, -1.0))));

        let soup = model.to_triangle_soup().unwrap();
        assert_eq!(soup.len(), 2);
        assert_eq!(soup[0].normal, Some(Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(soup[1].normal, Some(Vector3::new(0.0, 0.0, -1.0)));
        assert_eq!(soup[1].a.index, Some(3));
        assert_eq!(soup[1].c.location, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_to_triangle_soup_drops_mismatched_normals() {
        let mut model = MeshModel::new();
        model.append_triangle(&unit_triangle(None));
        model.append_triangle(&unit_triangle(None));
        model.normals.push(Vector3::new(1.0, 0.0, 0.0));

        let soup = model.to_triangle_soup().unwrap();
        assert!(soup.iter().all(|t| t.normal.is_none()));
        assert_eq!(soup[0].normal_or_zero(), Vector3::ZERO);
    }

    #[test]
    fn test_to_triangle_soup_shares_indexed_vertices() {
        let mut model = MeshModel::new();
        model.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        model.triangle_indices = vec![0, 1, 2, 0, 2, 3];

        let soup = model.to_triangle_soup().unwrap();
        assert_eq!(soup.len(), 2);
        assert_eq!(soup[0].a.location, soup[1].a.location);
        assert_eq!(soup[1].b.index, Some(2));
    }

    #[test]
    fn test_to_triangle_soup_index_out_of_bounds() {
        let mut model = MeshModel::new();
        model.positions = vec![Point3::default(); 2];
        model.triangle_indices = vec![0, 1, 2];

        let err = model.to_triangle_soup().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralFormat);
        assert!(err.to_string().contains("vertex 2"));
    }
}
