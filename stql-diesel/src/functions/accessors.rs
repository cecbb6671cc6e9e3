use crate::types::Geometry;
use diesel::sql_types::Nullable;

diesel::define_sql_function! {
    /// Geometry type name in upper case (`LINESTRING`, `POINTM`).
    #[sql_name = "GeometryType"]
    fn geometry_type(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Text>;
}

diesel::define_sql_function! {
    /// Combinatorial boundary of the geometry.
    fn st_boundary(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Topological dimension (0 = point, 1 = line, 2 = area).
    fn st_dimension(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Integer>;
}

diesel::define_sql_function! {
    /// Last point of a LineString.
    fn st_endpoint(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Bounding box as a Polygon (or Point/LineString when degenerate).
    fn st_envelope(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    fn st_isempty(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Bool>;
}

diesel::define_sql_function! {
    /// Number of sub-geometries; 1 for a non-empty single geometry.
    fn st_numgeometries(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Integer>;
}

diesel::define_sql_function! {
    /// Number of points in a LineString.
    fn st_numpoints(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Integer>;
}

diesel::define_sql_function! {
    fn st_x(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Double>;
}

diesel::define_sql_function! {
    fn st_y(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Double>;
}

diesel::define_sql_function! {
    /// Z ordinate of a point; null when the point has no Z.
    fn st_z(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Double>;
}

diesel::define_sql_function! {
    /// M ordinate of a point; null when the point has no M.
    fn st_m(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Double>;
}
