use crate::types::Geometry;
use diesel::sql_types::{Integer, Nullable, Text};

diesel::define_sql_function! {
    /// Parse WKT text into a geometry.
    fn st_geomfromtext(wkt: Text) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Parse WKT text with explicit SRID into a geometry.
    #[sql_name = "ST_GeomFromText"]
    fn st_geomfromtext_srid(wkt: Text, srid: Integer) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Parse EWKT text (`SRID=n;WKT`, Z/M accepted) into a geometry.
    ///
    /// The `_text` overloads in this module wrap their input with this call.
    fn st_geomfromewkt(ewkt: Text) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Serialize a geometry to WKT text (no SRID).
    fn st_astext(geom: Nullable<Geometry>) -> Nullable<Text>;
}

diesel::define_sql_function! {
    /// Serialize a geometry to EWKT text (`SRID=n;WKT`).
    fn st_asewkt(geom: Nullable<Geometry>) -> Nullable<Text>;
}
