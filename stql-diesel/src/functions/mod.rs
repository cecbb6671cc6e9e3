//! Diesel SQL function definitions for PostGIS editors, affine transforms,
//! validation and accessors.
//!
//! Every binding is a Diesel expression node. Nothing here evaluates on the
//! client: the call is rendered into SQL and PostGIS computes the value, so
//! null geometries propagate to null results exactly as the server decides.
//!
//! Overloads are separate functions (`st_scale`, `st_scale_xyz`,
//! `st_scale_factor`, `st_scale_origin`). The `_text` variants take WKT or
//! EWKT and render it as `ST_GeomFromEWKT(text)`, so a transform can be
//! selected without touching a table.
//!
//! # Example
//!
//! ```rust,ignore
//! use diesel::prelude::*;
//! use stql_diesel::functions::*;
//!
//! let rotated: Vec<Option<stql_core::Geometry>> = shapes::table
//!     .select(st_rotate_xy(shapes::geom, std::f64::consts::FRAC_PI_6, 50.0, 160.0))
//!     .load(&mut conn)?;
//!
//! let rowless: Option<stql_core::Geometry> = diesel::dsl::select(st_rotatex_text(
//!     "LINESTRING(1 2 3, 1 1 1)",
//!     std::f64::consts::FRAC_PI_2,
//! ))
//! .get_result(&mut conn)?;
//! ```

mod accessors;
mod affine;
mod constructors;
mod editors;
mod io;
mod processing;
mod validation;

pub use accessors::*;
pub use affine::*;
pub use constructors::*;
pub use editors::*;
pub use io::*;
pub use processing::*;
pub use validation::*;
