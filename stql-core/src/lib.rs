#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `stql-core`.

mod builder;
pub mod error;
pub mod ewkb;
pub mod function_catalog;
pub mod geometry;
pub mod wkt;

pub use error::{Result, StqlError};
pub use function_catalog::{ArgKind, FunctionFamily, FunctionSpec, ReturnKind};
pub use geometry::{Coord, Dimensions, Geometry, Ordinate, Shape};
