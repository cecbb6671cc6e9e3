//! Diesel SQL type definitions and `FromSql` / `ToSql` implementations.
//!
//! `Geometry` and `Geography` map to PostGIS's native `geometry` /
//! `geography` types. Values travel as EWKB in binary mode, decoded into
//! [`stql_core::Geometry`] (Z, M and SRID kept), `geo::Geometry<f64>` (XY
//! projection) or raw bytes.

// ── SQL types ─────────────────────────────────────────────────────────────────

/// Diesel SQL type for a PostGIS `geometry` column.
///
/// ```rust,ignore
/// table! {
///     shapes (id) {
///         id   -> Integer,
///         geom -> Nullable<stql_diesel::Geometry>,
///     }
/// }
/// ```
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(postgres_type(name = "geometry"))]
pub struct Geometry;

/// Diesel SQL type for a PostGIS `geography` column (SRID 4326).
///
/// Same wire format as [`Geometry`], but decoding enforces SRID 4326.
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(postgres_type(name = "geography"))]
pub struct Geography;

/// Client-side geometry usable as a bind parameter.
///
/// Wraps [`stql_core::Geometry`] so it can be passed wherever a binding
/// expects a `Nullable<Geometry>` argument:
///
/// ```rust,ignore
/// let factor: stql_core::Geometry = "POINT(0.5 0.75 2 -1)".parse()?;
/// shapes::table.select(shapes::geom.st_scale_factor(GeometryValue(factor)))
/// ```
#[derive(Debug, Clone, PartialEq, diesel::expression::AsExpression)]
#[diesel(sql_type = Geometry)]
#[diesel(sql_type = Geography)]
pub struct GeometryValue(pub stql_core::Geometry);

impl From<stql_core::Geometry> for GeometryValue {
    fn from(geom: stql_core::Geometry) -> Self {
        Self(geom)
    }
}

#[cfg(feature = "postgres")]
type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(feature = "postgres")]
fn parse_geometry_blob(blob: &[u8]) -> std::result::Result<stql_core::Geometry, BoxedError> {
    let geom = stql_core::ewkb::parse_ewkb(blob).map_err(|e| Box::new(e) as BoxedError)?;
    tracing::trace!(
        bytes = blob.len(),
        kind = geom.st_geometry_type(),
        srid = ?geom.srid(),
        "decoded EWKB"
    );
    Ok(geom)
}

#[cfg(feature = "postgres")]
fn parse_geography_blob(blob: &[u8]) -> std::result::Result<stql_core::Geometry, BoxedError> {
    let geom = parse_geometry_blob(blob)?;
    match geom.srid() {
        Some(4326) => Ok(geom),
        Some(other) => Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("geography EWKB must use SRID 4326 (got {other})"),
        ))),
        None => Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "geography EWKB must include SRID 4326",
        ))),
    }
}

#[cfg(feature = "postgres")]
fn encode_geometry(geom: &stql_core::Geometry) -> std::result::Result<Vec<u8>, BoxedError> {
    let blob = stql_core::ewkb::write_ewkb(geom).map_err(|e| Box::new(e) as BoxedError)?;
    tracing::trace!(
        bytes = blob.len(),
        kind = geom.st_geometry_type(),
        "encoded EWKB"
    );
    Ok(blob)
}

/// Geography values default to SRID 4326; any other SRID is rejected.
#[cfg(feature = "postgres")]
fn encode_geography(geom: &stql_core::Geometry) -> std::result::Result<Vec<u8>, BoxedError> {
    match geom.srid() {
        Some(4326) => encode_geometry(geom),
        None => encode_geometry(&geom.clone().with_srid(Some(4326))),
        Some(other) => {
            tracing::debug!(srid = other, "refusing to bind geography with foreign SRID");
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("geography values must use SRID 4326 (got {other})"),
            )))
        }
    }
}

// ── PostgreSQL FromSql / ToSql ────────────────────────────────────────────────

#[cfg(feature = "postgres")]
mod postgres_impls {
    use super::*;
    use diesel::deserialize::{self, FromSql};
    use diesel::pg::Pg;
    use diesel::serialize::{self, IsNull, Output, ToSql};
    use std::io::Write as IoWrite;

    // --- Vec<u8> (raw EWKB bytes) ---

    macro_rules! impl_raw_bytes_pg {
        ($sql_type:ty) => {
            impl FromSql<$sql_type, Pg> for Vec<u8> {
                fn from_sql(
                    bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
                ) -> deserialize::Result<Self> {
                    Ok(bytes.as_bytes().to_vec())
                }
            }

            impl ToSql<$sql_type, Pg> for Vec<u8> {
                fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                    IoWrite::write_all(out, self)?;
                    Ok(IsNull::No)
                }
            }
        };
    }

    impl_raw_bytes_pg!(Geometry);
    impl_raw_bytes_pg!(Geography);

    impl ToSql<Geometry, Pg> for [u8] {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            IoWrite::write_all(out, self)?;
            Ok(IsNull::No)
        }
    }

    // --- stql_core::Geometry ---

    impl FromSql<Geometry, Pg> for stql_core::Geometry {
        fn from_sql(
            bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
        ) -> deserialize::Result<Self> {
            parse_geometry_blob(bytes.as_bytes())
        }
    }

    impl ToSql<Geometry, Pg> for stql_core::Geometry {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            IoWrite::write_all(out, &encode_geometry(self)?)?;
            Ok(IsNull::No)
        }
    }

    impl FromSql<Geography, Pg> for stql_core::Geometry {
        fn from_sql(
            bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
        ) -> deserialize::Result<Self> {
            parse_geography_blob(bytes.as_bytes())
        }
    }

    impl ToSql<Geography, Pg> for stql_core::Geometry {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            IoWrite::write_all(out, &encode_geography(self)?)?;
            Ok(IsNull::No)
        }
    }

    // --- GeometryValue ---

    impl ToSql<Geometry, Pg> for GeometryValue {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            <stql_core::Geometry as ToSql<Geometry, Pg>>::to_sql(&self.0, out)
        }
    }

    impl ToSql<Geography, Pg> for GeometryValue {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            <stql_core::Geometry as ToSql<Geography, Pg>>::to_sql(&self.0, out)
        }
    }

    // --- geo::Geometry<f64> (XY projection) ---

    impl FromSql<Geometry, Pg> for geo::Geometry<f64> {
        fn from_sql(
            bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
        ) -> deserialize::Result<Self> {
            let geom = parse_geometry_blob(bytes.as_bytes())?;
            Ok((&geom).into())
        }
    }

    impl ToSql<Geometry, Pg> for geo::Geometry<f64> {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            let geom = stql_core::Geometry::from(self);
            IoWrite::write_all(out, &encode_geometry(&geom)?)?;
            Ok(IsNull::No)
        }
    }

    impl FromSql<Geography, Pg> for geo::Geometry<f64> {
        fn from_sql(
            bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
        ) -> deserialize::Result<Self> {
            let geom = parse_geography_blob(bytes.as_bytes())?;
            Ok((&geom).into())
        }
    }

    impl ToSql<Geography, Pg> for geo::Geometry<f64> {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            let geom = stql_core::Geometry::from(self);
            IoWrite::write_all(out, &encode_geography(&geom)?)?;
            Ok(IsNull::No)
        }
    }
}
