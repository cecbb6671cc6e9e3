use crate::types::Geometry;
use diesel::sql_types::Nullable;

diesel::define_sql_function! {
    /// Geometric center of mass.
    fn st_centroid(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Smallest convex geometry enclosing the input.
    fn st_convexhull(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Part of `a` that does not intersect `b`.
    fn st_difference(a: Nullable<Geometry>, b: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Point-set union of two geometries.
    fn st_union(a: Nullable<Geometry>, b: Nullable<Geometry>) -> Nullable<Geometry>;
}
