// Accessor, constructor, I/O and processing cases.

use diesel::prelude::*;
use stql_diesel::prelude::*;

use crate::postgis_fixture::{assert_coords, insert_ewkt, insert_null, t};

/// Sort vertices by (x, y) so set-like results compare regardless of order.
fn sorted_xy(geom: &stql_core::Geometry) -> Vec<(f64, f64)> {
    let mut xy: Vec<(f64, f64)> = geom.vertices().iter().map(|c| (c.x, c.y)).collect();
    xy.sort_by(|a, b| a.partial_cmp(b).unwrap());
    xy
}

pub fn assert_text_io(conn: &mut PgConnection) {
    let id = insert_ewkt(conn, "SRID=4326;POINT(1 2)");
    let text = row_value!(conn, id, st_astext(t::geom), Option<String>);
    assert_eq!(text.as_deref(), Some("POINT(1 2)"));
    let ewkt = row_value!(conn, id, t::geom.st_asewkt(), Option<String>);
    assert_eq!(ewkt.as_deref(), Some("SRID=4326;POINT(1 2)"));

    let parsed = rowless_geom!(conn, st_geomfromtext("LINESTRING(0 0, 1 1)"));
    assert_eq!(parsed.srid(), None);
    let with_srid = rowless_geom!(conn, st_geomfromtext_srid("POINT(1 2)", 3857));
    assert_eq!(with_srid.srid(), Some(3857));

    // Client-side text I/O agrees with the server.
    let local: stql_core::Geometry = "SRID=4326;POINT(1 2)".parse().unwrap();
    assert_eq!(row_geom!(conn, id, t::geom), local);
    assert_eq!(local.to_ewkt().unwrap(), ewkt.unwrap());

    let spec = stql_core::function_catalog::lookup("st_asewkt").unwrap();
    let evaluated = spec.evaluate_text(&["SRID=4326;POINT(1 2)"]).unwrap();
    assert_eq!(Some(evaluated), row_value!(conn, id, st_asewkt(t::geom), Option<String>));
}

pub fn assert_constructors(conn: &mut PgConnection) {
    let point = rowless_geom!(conn, st_makepoint(1.0, 2.0).nullable());
    assert_coords(&[&[1.0, 2.0]], &point);

    let point = rowless_geom!(conn, st_makepoint_xyz(1.0, 2.0, 3.0).nullable());
    assert_coords(&[&[1.0, 2.0, 3.0]], &point);

    let point = rowless_geom!(conn, st_makepoint_xyzm(1.0, 2.0, 3.0, 4.0).nullable());
    assert_eq!(point.geometry_type(), "POINT");
    assert_coords(&[&[1.0, 2.0, 3.0, 4.0]], &point);
}

pub fn assert_geometry_type(conn: &mut PgConnection) {
    let line = insert_ewkt(conn, "LINESTRING(77.29 29.07,77.42 29.26,77.27 29.31,77.29 29.07)");
    let kind = row_value!(conn, line, geometry_type(t::geom), Option<String>);
    assert_eq!(kind.as_deref(), Some("LINESTRING"));

    let measured = insert_ewkt(conn, "POINTM(1 2 3)");
    let kind = row_value!(conn, measured, t::geom.geometry_type(), Option<String>);
    assert_eq!(kind.as_deref(), Some("POINTM"));
    assert_eq!(row_geom!(conn, measured, t::geom).geometry_type(), "POINTM");
}

pub fn assert_boundary(conn: &mut PgConnection) {
    let id = insert_ewkt(conn, "LINESTRING(100 150,50 60, 70 80, 160 170)");
    let boundary = row_geom!(conn, id, st_boundary(t::geom));
    assert_eq!(boundary.geometry_type(), "MULTIPOINT");
    assert_eq!(sorted_xy(&boundary), vec![(100.0, 150.0), (160.0, 170.0)]);

    let id = insert_ewkt(
        conn,
        "POLYGON((10 130,50 190,110 190,140 150,150 80,100 10,20 40,10 130),
            (70 40,100 50,120 80,80 110,50 90,70 40))",
    );
    let boundary = row_geom!(conn, id, t::geom.st_boundary());
    assert_eq!(boundary.geometry_type(), "MULTILINESTRING");
    let stql_core::Shape::MultiLineString(rings) = boundary.shape() else {
        panic!("expected a MultiLineString, got {boundary}");
    };
    assert_eq!(rings.len(), 2);
    let ring = |i: usize| {
        stql_core::Geometry::new(stql_core::Shape::LineString(rings[i].clone()))
    };
    // Exterior first, both closed and in input order.
    assert_coords(
        &[
            &[10.0, 130.0],
            &[50.0, 190.0],
            &[110.0, 190.0],
            &[140.0, 150.0],
            &[150.0, 80.0],
            &[100.0, 10.0],
            &[20.0, 40.0],
            &[10.0, 130.0],
        ],
        &ring(0),
    );
    assert_coords(
        &[
            &[70.0, 40.0],
            &[100.0, 50.0],
            &[120.0, 80.0],
            &[80.0, 110.0],
            &[50.0, 90.0],
            &[70.0, 40.0],
        ],
        &ring(1),
    );
}

pub fn assert_dimension_and_counts(conn: &mut PgConnection) {
    let id = insert_ewkt(conn, "GEOMETRYCOLLECTION(LINESTRING(1 1,0 0),POINT(0 0))");
    let dim = row_value!(conn, id, st_dimension(t::geom), Option<i32>);
    assert_eq!(dim, Some(1));
    let count = row_value!(conn, id, st_numgeometries(t::geom), Option<i32>);
    assert_eq!(count, Some(2));

    let id = insert_ewkt(conn, "LINESTRING(77.29 29.07,77.42 29.26,77.27 29.31,77.29 29.07)");
    let points = row_value!(conn, id, t::geom.st_numpoints(), Option<i32>);
    assert_eq!(points, Some(4));
    let count = row_value!(conn, id, t::geom.st_numgeometries(), Option<i32>);
    assert_eq!(count, Some(1));
    let local = row_geom!(conn, id, t::geom);
    assert_eq!(local.num_points(), 4);
    assert_eq!(local.num_geometries(), 1);

    let id = insert_ewkt(
        conn,
        "GEOMETRYCOLLECTION(MULTIPOINT((-2 3),(-2 2)),LINESTRING(5 5,10 10),POLYGON((-7 4.2,-7.1 5,-7.1 4.3,-7 4.2)))",
    );
    let count = row_value!(conn, id, st_numgeometries(t::geom), Option<i32>);
    assert_eq!(count, Some(3));
    assert_eq!(row_geom!(conn, id, t::geom).num_geometries(), 3);
}

pub fn assert_endpoint_and_envelope(conn: &mut PgConnection) {
    let id = insert_ewkt(conn, "LINESTRING(1 1, 2 2, 3 3)");
    let end = row_value!(conn, id, st_astext(st_endpoint(t::geom)), Option<String>);
    assert_eq!(end.as_deref(), Some("POINT(3 3)"));

    let id = insert_ewkt(conn, "LINESTRING(0 0, 1 3)");
    let envelope = row_value!(conn, id, t::geom.st_envelope().st_astext(), Option<String>);
    assert_eq!(envelope.as_deref(), Some("POLYGON((0 0,0 3,1 3,1 0,0 0))"));
}

pub fn assert_is_empty(conn: &mut PgConnection) {
    let empty = insert_ewkt(conn, "GEOMETRYCOLLECTION EMPTY");
    let filled = insert_ewkt(conn, "POINT(1 2)");
    let null = insert_null(conn);

    assert_eq!(row_value!(conn, empty, st_isempty(t::geom), Option<bool>), Some(true));
    assert_eq!(row_value!(conn, filled, t::geom.st_isempty(), Option<bool>), Some(false));
    assert_eq!(row_value!(conn, null, st_isempty(t::geom), Option<bool>), None);

    let empties: Vec<i32> = t::table
        .filter(st_isempty(t::geom).eq(true))
        .select(t::id)
        .load(conn)
        .unwrap();
    assert_eq!(empties, vec![empty]);

    assert!(row_geom!(conn, empty, t::geom).is_empty());
}

pub fn assert_ordinate_accessors(conn: &mut PgConnection) {
    let id = insert_ewkt(conn, "POINT(1 2 3 4)");
    assert_eq!(row_value!(conn, id, st_x(t::geom), Option<f64>), Some(1.0));
    assert_eq!(row_value!(conn, id, st_y(t::geom), Option<f64>), Some(2.0));
    assert_eq!(row_value!(conn, id, t::geom.st_z(), Option<f64>), Some(3.0));
    assert_eq!(row_value!(conn, id, t::geom.st_m(), Option<f64>), Some(4.0));

    let local = row_geom!(conn, id, t::geom);
    assert_eq!(local.ordinate(0, stql_core::Ordinate::M).unwrap(), Some(4.0));

    let flat = insert_ewkt(conn, "POINT(1 2)");
    assert_eq!(row_value!(conn, flat, st_z(t::geom), Option<f64>), None);
    assert_eq!(row_value!(conn, flat, st_m(t::geom), Option<f64>), None);
}

pub fn assert_processing(conn: &mut PgConnection) {
    let id = insert_ewkt(
        conn,
        "MULTIPOINT ( -1 0, -1 2, -1 3, -1 4, -1 7, 0 1, 0 3, 1 1, 2 0, 6 0, 7 8, 9 8, 10 6 )",
    );
    let centroid = row_geom!(conn, id, st_centroid(t::geom));
    let c = centroid.as_point().unwrap().unwrap();
    assert!((c.x - 2.30769230769231).abs() < 1e-12, "{centroid}");
    assert!((c.y - 3.30769230769231).abs() < 1e-12, "{centroid}");

    let id = insert_ewkt(
        conn,
        "GEOMETRYCOLLECTION(MULTILINESTRING((100 190,10 8),(150 10, 20 30)),
            MULTIPOINT(50 5, 150 30, 50 10, 10 10))",
    );
    let hull = row_value!(conn, id, t::geom.st_convexhull().st_astext(), Option<String>);
    assert_eq!(
        hull.as_deref(),
        Some("POLYGON((50 5,10 8,10 10,100 190,150 30,150 10,50 5))")
    );

    let id = insert_ewkt(conn, "LINESTRING(50 100, 50 200)");
    let diff = row_value!(
        conn,
        id,
        st_astext(st_difference(t::geom, st_geomfromewkt("LINESTRING(50 50, 50 150)"))),
        Option<String>
    );
    assert_eq!(diff.as_deref(), Some("LINESTRING(50 150,50 200)"));

    let id = insert_ewkt(conn, "POINT(1 2)");
    let union = row_geom!(conn, id, t::geom.st_union(st_geomfromewkt("POINT(-2 3)")));
    assert_eq!(union.geometry_type(), "MULTIPOINT");
    assert_eq!(sorted_xy(&union), vec![(-2.0, 3.0), (1.0, 2.0)]);
}

pub fn assert_accessor_nulls(conn: &mut PgConnection) {
    let id = insert_null(conn);
    assert_eq!(row_value!(conn, id, geometry_type(t::geom), Option<String>), None);
    assert_eq!(row_value!(conn, id, st_numpoints(t::geom), Option<i32>), None);
    assert_eq!(row_value!(conn, id, st_x(t::geom), Option<f64>), None);
    assert_eq!(
        row_value!(conn, id, st_envelope(t::geom), Option<stql_core::Geometry>),
        None
    );
}
