#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `stql-diesel`.

pub mod expression_methods;
pub mod functions;
pub mod prelude;
pub mod types;

pub use expression_methods::GeometryExpressionMethods;
pub use types::{Geography, Geometry, GeometryValue};
