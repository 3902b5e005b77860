#![warn(missing_docs)]

//! solidkit: parametric solids for OpenSCAD
//!
//! A fluent builder that composes primitive shapes into a CSG tree, keeps
//! track of each composite's origin and bounding-box center through every
//! translation, and serializes the finished tree to OpenSCAD.
//!
//! # Example
//!
//! ```rust,no_run
//! use solidkit::{parts, RenderConfig};
//!
//! let plate = parts::cube(50.0, 30.0, 5.0)?;
//! let hole = parts::cylinder(10.0, 5.0, None)?.right(25.0).forward(15.0);
//! let part = plate.hole(hole).part().align_center_above();
//! part.write_scad("plate.scad", &RenderConfig::default())?;
//! # Ok::<(), solidkit::BuildError>(())
//! ```

use thiserror::Error;

mod builder;
pub mod config;
pub mod export;
pub mod layout;
pub mod parts;

pub use builder::SolidBuilder;
pub use config::RenderConfig;
pub use solidkit_ir::{BoolOp, Document, ModifierKind, Node, Primitive, Transform};

/// Errors returned while constructing or writing a design.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A shape dimension is non-positive, non-finite or inconsistent.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A non-geometric argument is out of range or non-finite.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// An operation was applied in an order the tree cannot express.
    #[error("unsupported combination: {0}")]
    UnsupportedCombination(String),
    /// An I/O error occurred during export or config loading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The render configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    /// The JSON document could not be produced or read.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
