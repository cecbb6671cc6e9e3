#![cfg(feature = "postgres")]
#![allow(dead_code)]

//! `FromSql` / `ToSql` round trips through PostGIS for every supported
//! Rust representation.


use diesel::prelude::*;
use postgis_fixture::{insert_ewkt, pg_conn, t};
use stql_core::{Dimensions, Geometry};
use stql_diesel::prelude::*;

const SAMPLES: &[&str] = &[
    "POINT(1 2)",
    "POINT EMPTY",
    "SRID=3857;POINT Z (1 2 3)",
    "POINTM(1 2 3)",
    "SRID=4326;POINT ZM (1 2 3 4)",
    "LINESTRING(0 0,1 1,2 0)",
    "LINESTRING ZM (0 0 0 0,1 1 1 1)",
    "POLYGON((0 0,4 0,4 4,0 4,0 0),(1 1,2 1,2 2,1 2,1 1))",
    "MULTIPOINT((0 0),(1 1))",
    "MULTILINESTRING((0 0,1 1),(2 2,3 3))",
    "MULTIPOLYGON(((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))",
    "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1))",
    "GEOMETRYCOLLECTION EMPTY",
];

fn geog_of(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Geometry>> {
    t::table.find(id).select(t::geog).first(conn)
}

macro_rules! pg_type_tests {
    ($mod_name:ident, $tag:expr) => {
        mod $mod_name {
            use super::*;

            #[tokio::test]
            async fn core_geometry_roundtrips() {
                let mut db = pg_conn($tag).await;
                let c = &mut db.conn;

                for ewkt in SAMPLES {
                    let local: Geometry = ewkt.parse().unwrap();

                    // Server-parsed value decodes to the client-parsed one.
                    let id = insert_ewkt(c, ewkt);
                    let decoded = row_value!(c, id, t::geom, Option<Geometry>);
                    assert_eq!(decoded.as_ref(), Some(&local), "decode of {ewkt}");

                    // Client-encoded value is read back identically by the server.
                    let id: i32 = diesel::insert_into(t::table)
                        .values(t::geom.eq(Some(local.clone())))
                        .returning(t::id)
                        .get_result(c)
                        .unwrap();
                    let server_text = row_value!(c, id, st_asewkt(t::geom), Option<String>);
                    let reparsed: Geometry = server_text.unwrap().parse().unwrap();
                    assert_eq!(reparsed, local, "encode of {ewkt}");
                }
            }

            #[tokio::test]
            async fn dimensions_and_srid_survive() {
                let mut db = pg_conn($tag).await;
                let c = &mut db.conn;

                let id = insert_ewkt(c, "SRID=4326;POINT ZM (1 2 3 4)");
                let geom = row_geom!(c, id, t::geom);
                assert_eq!(geom.dims(), Dimensions::XYZM);
                assert_eq!(geom.srid(), Some(4326));
                assert_eq!(geom.coord_dim(), 4);

                let id = insert_ewkt(c, "POINTM(1 2 3)");
                let geom = row_geom!(c, id, t::geom);
                assert_eq!(geom.dims(), Dimensions::XYM);
                assert_eq!(geom.to_wkt().unwrap(), "POINT M (1 2 3)");
            }

            #[tokio::test]
            async fn geo_types_roundtrip() {
                let mut db = pg_conn($tag).await;
                let c = &mut db.conn;

                let line: geo::Geometry<f64> =
                    geo::LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.5)]).into();
                let id: i32 = diesel::insert_into(t::table)
                    .values(t::geom.eq(Some(line.clone())))
                    .returning(t::id)
                    .get_result(c)
                    .unwrap();
                let back = row_value!(c, id, t::geom, Option<geo::Geometry<f64>>);
                assert_eq!(back, Some(line));

                // Z is dropped when decoding into geo types.
                let id = insert_ewkt(c, "POINT(1 2 3)");
                let flat = row_value!(c, id, t::geom, Option<geo::Geometry<f64>>);
                assert_eq!(flat, Some(geo::Point::new(1.0, 2.0).into()));
            }

            #[tokio::test]
            async fn raw_ewkb_bytes() {
                let mut db = pg_conn($tag).await;
                let c = &mut db.conn;

                let geom: Geometry = "SRID=4326;POINT(1 2)".parse().unwrap();
                let blob = stql_core::ewkb::write_ewkb(&geom).unwrap();

                let id: i32 = diesel::insert_into(t::table)
                    .values(t::geom.eq(Some(blob.clone())))
                    .returning(t::id)
                    .get_result(c)
                    .unwrap();
                let text = row_value!(c, id, st_asewkt(t::geom), Option<String>);
                assert_eq!(text.as_deref(), Some("SRID=4326;POINT(1 2)"));

                let raw = row_value!(c, id, t::geom, Option<Vec<u8>>).unwrap();
                assert_eq!(stql_core::ewkb::parse_ewkb(&raw).unwrap(), geom);

                let id: i32 = diesel::insert_into(t::table)
                    .values(t::geom.eq(Some(&blob[..])))
                    .returning(t::id)
                    .get_result(c)
                    .unwrap();
                let echoed = row_value!(c, id, t::geom, Option<Vec<u8>>);
                assert_eq!(echoed, Some(blob));
            }

            #[tokio::test]
            async fn geography_enforces_srid_4326() {
                let mut db = pg_conn($tag).await;
                let c = &mut db.conn;

                // Unset SRID is bound as 4326.
                let plain: Geometry = "POINT(-71.06 42.36)".parse().unwrap();
                let id: i32 = diesel::insert_into(t::table)
                    .values(t::geog.eq(Some(plain.clone())))
                    .returning(t::id)
                    .get_result(c)
                    .unwrap();
                let back = geog_of(c, id).unwrap().unwrap();
                assert_eq!(back.srid(), Some(4326));
                assert_eq!(back, plain.with_srid(Some(4326)));

                // A foreign SRID is refused before reaching the server.
                let foreign: Geometry = "SRID=3857;POINT(1 2)".parse().unwrap();
                let refused = diesel::insert_into(t::table)
                    .values(t::geog.eq(Some(GeometryValue(foreign))))
                    .execute(c);
                assert!(refused.is_err());
            }

            #[tokio::test]
            async fn null_roundtrip() {
                let mut db = pg_conn($tag).await;
                let c = &mut db.conn;

                let id = postgis_fixture::insert_null(c);
                assert_eq!(row_value!(c, id, t::geom, Option<Geometry>), None);
                assert_eq!(row_value!(c, id, t::geom, Option<Vec<u8>>), None);
                assert_eq!(geog_of(c, id).unwrap(), None);
            }
        }
    };
}

pg_type_tests!(pg16, "16-3.5");
pg_type_tests!(pg17, "17-3.5");
