use crate::types::Geometry;
use diesel::sql_types::{Integer, Nullable};

diesel::define_sql_function! {
    /// Whether the geometry is well-formed in 2D per OGC rules.
    fn st_isvalid(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Bool>;
}

diesel::define_sql_function! {
    /// [`st_isvalid`] with validity flags; flag 1 accepts self-touching
    /// rings that form holes (ESRI flavour).
    #[sql_name = "ST_IsValid"]
    fn st_isvalid_flags(geom: Nullable<Geometry>, flags: Integer) -> Nullable<diesel::sql_types::Bool>;
}

diesel::define_sql_function! {
    /// `Valid Geometry`, or the reason the geometry is invalid and where.
    fn st_isvalidreason(geom: Nullable<Geometry>) -> Nullable<diesel::sql_types::Text>;
}

diesel::define_sql_function! {
    #[sql_name = "ST_IsValidReason"]
    fn st_isvalidreason_flags(geom: Nullable<Geometry>, flags: Integer) -> Nullable<diesel::sql_types::Text>;
}
