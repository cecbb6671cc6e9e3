//! Convenience re-exports for stql-diesel.
//!
//! ```rust,ignore
//! use stql_diesel::prelude::*;
//! ```

pub use crate::expression_methods::GeometryExpressionMethods;
pub use crate::functions::*;
pub use crate::types::{Geography, Geometry, GeometryValue};
