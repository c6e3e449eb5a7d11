//! # meshfiles
//!
//! Reading and writing triangle meshes in STL (ASCII and binary) and 3MF.
//!
//! Every format maps to the same in-memory [`MeshModel`]: a flat list of
//! positions, triangles as index triples, optional per-triangle normals, a
//! placement transform and a display color.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - ASCII and binary STL, with encoding detection on load
//! - 3MF archives (ZIP/OPC container with a core-namespace model part)
//! - Writer settings passed per call through [`WriterConfig`]
//!
//! ## Example
//!
//! ```no_run
//! use meshfiles::{stl, threemf};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = stl::load("part.stl")?;
//! println!("{} triangles", model.triangle_count());
//!
//! let mut models = vec![model];
//! threemf::save(&mut models, "part.3mf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Loads, saves and tolerated input problems are reported through
//! [`tracing`]. No subscriber is installed by the library.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
mod file;
pub mod model;
mod numeric;
pub mod opc;
pub mod parser;
pub mod stl;
mod text;
pub mod threemf;
mod writer;

pub use config::{LineEnding, WriterConfig};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    AutoCounter, Color, Matrix4, MeshModel, Point2, Point3, SoupTriangle, SoupVertex,
    TriangleSoup, Vector3,
};
pub use stl::StlEncoding;
pub use writer::write_model_xml;
