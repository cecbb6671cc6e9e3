use crate::types::Geometry;
use diesel::sql_types::Double;

diesel::define_sql_function! {
    /// Construct a 2D point.
    #[sql_name = "ST_MakePoint"]
    fn st_makepoint(x: Double, y: Double) -> Geometry;
}

diesel::define_sql_function! {
    /// Construct a 3D (XYZ) point.
    #[sql_name = "ST_MakePoint"]
    fn st_makepoint_xyz(x: Double, y: Double, z: Double) -> Geometry;
}

diesel::define_sql_function! {
    /// Construct a 4D (XYZM) point. Useful as the factor of
    /// [`st_scale_factor`](super::st_scale_factor).
    #[sql_name = "ST_MakePoint"]
    fn st_makepoint_xyzm(x: Double, y: Double, z: Double, m: Double) -> Geometry;
}
