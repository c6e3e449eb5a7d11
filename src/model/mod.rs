//! Data structures representing triangle meshes

mod core;
mod ids;
mod material;
mod soup;
mod transform;

pub use core::{MeshModel, Point2, Point3, Vector3};
pub use ids::{AutoCounter, assign_unique_ids, has_duplicate_ids, normalize_ids};
pub use material::Color;
pub use soup::{SoupTriangle, SoupVertex, TriangleSoup};
pub use transform::{AFFINE_VALUE_COUNT, Matrix4};
