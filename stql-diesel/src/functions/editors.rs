//! Geometry editors: force functions, vertex editing, grid snapping and
//! ordinate swapping.

use super::io::st_geomfromewkt;
use crate::types::Geometry;
use diesel::expression::AsExpression;
use diesel::sql_types::{Double, Integer, Nullable, Text};

diesel::define_sql_function! {
    /// Append a point to the end of a LineString.
    fn st_addpoint(line: Nullable<Geometry>, point: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Insert a point before the zero-based `position` (`-1` appends).
    #[sql_name = "ST_AddPoint"]
    fn st_addpoint_at(
        line: Nullable<Geometry>,
        point: Nullable<Geometry>,
        position: Integer,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Keep only members of the given type (1 = Point, 2 = LineString,
    /// 3 = Polygon) as a Multi* geometry.
    fn st_collectionextract(collection: Nullable<Geometry>, kind: Integer) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Simplest representation of a collection (single member unwrapped,
    /// homogeneous members turned into a Multi*).
    fn st_collectionhomogenize(collection: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Drop Z and M.
    fn st_force2d(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Force XYZ; missing Z becomes 0. Alias of [`st_force3dz`].
    fn st_force3d(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    fn st_force3dz(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Force XYM; Z is dropped and missing M becomes 0.
    fn st_force3dm(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Force XYZM; missing ordinates become 0.
    fn st_force4d(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Exterior rings counter-clockwise, interior rings clockwise.
    fn st_forcepolygonccw(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Wrap the geometry in a GeometryCollection.
    fn st_forcecollection(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Exterior rings clockwise, interior rings counter-clockwise.
    fn st_forcepolygoncw(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Restrict to OGC Simple Features types (curves are stroked).
    fn st_forcesfs(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// [`st_forcesfs`] targeting a Simple Features version (`"1.1"`, `"1.2"`).
    #[sql_name = "ST_ForceSFS"]
    fn st_forcesfs_version(geom: Nullable<Geometry>, version: Text) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Right-hand rule orientation; same as [`st_forcepolygoncw`].
    fn st_forcerhr(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Upcast to the curved counterpart (`POLYGON` to `CURVEPOLYGON`).
    fn st_forcecurve(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Sew the parts of a MultiLineString together.
    fn st_linemerge(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Return the geometry as its Multi* type.
    fn st_multi(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Canonical form: vertex order, ring order and member order normalized.
    fn st_normalize(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Zero out low mantissa bits beyond `prec` decimal digits.
    fn st_quantizecoordinates(geom: Nullable<Geometry>, prec: Integer) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// [`st_quantizecoordinates`] with a precision per ordinate.
    #[sql_name = "ST_QuantizeCoordinates"]
    fn st_quantizecoordinates_xyzm(
        geom: Nullable<Geometry>,
        prec_x: Integer,
        prec_y: Integer,
        prec_z: Integer,
        prec_m: Integer,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Remove the point at zero-based `offset` from a LineString.
    fn st_removepoint(line: Nullable<Geometry>, offset: Integer) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    fn st_reverse(geom: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Densify so that no segment is longer than `max_segment_length`.
    fn st_segmentize(geom: Nullable<Geometry>, max_segment_length: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Replace the point at zero-based `index` (negative counts from the end).
    fn st_setpoint(
        line: Nullable<Geometry>,
        index: Integer,
        point: Nullable<Geometry>,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Snap every vertex to a grid of the given cell size.
    fn st_snaptogrid(geom: Nullable<Geometry>, size: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    #[sql_name = "ST_SnapToGrid"]
    fn st_snaptogrid_xy(geom: Nullable<Geometry>, size_x: Double, size_y: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Grid anchored at (`origin_x`, `origin_y`).
    #[sql_name = "ST_SnapToGrid"]
    fn st_snaptogrid_origin(
        geom: Nullable<Geometry>,
        origin_x: Double,
        origin_y: Double,
        size_x: Double,
        size_y: Double,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Grid anchored at `origin`, with a cell size per ordinate; a size of 0
    /// leaves that ordinate untouched.
    #[sql_name = "ST_SnapToGrid"]
    fn st_snaptogrid_point(
        geom: Nullable<Geometry>,
        origin: Nullable<Geometry>,
        size_x: Double,
        size_y: Double,
        size_z: Double,
        size_m: Double,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Snap vertices and segments of `input` to `reference` within `tolerance`.
    fn st_snap(
        input: Nullable<Geometry>,
        reference: Nullable<Geometry>,
        tolerance: Double,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Swap two ordinates named by a two-letter string such as `"xy"` or `"zm"`.
    fn st_swapordinates(geom: Nullable<Geometry>, ords: Text) -> Nullable<Geometry>;
}

// ── Text overloads ──────────────────────────────────────────────────────────

/// [`st_forcesfs`] over WKT/EWKT text.
pub fn st_forcesfs_text<W>(wkt: W) -> st_forcesfs<st_geomfromewkt<W>>
where
    W: AsExpression<Text>,
{
    st_forcesfs(st_geomfromewkt(wkt))
}

/// [`st_segmentize`] over WKT/EWKT text.
pub fn st_segmentize_text<W, L>(wkt: W, max_segment_length: L) -> st_segmentize<st_geomfromewkt<W>, L>
where
    W: AsExpression<Text>,
    L: AsExpression<Double>,
{
    st_segmentize(st_geomfromewkt(wkt), max_segment_length)
}

/// [`st_swapordinates`] over WKT/EWKT text.
pub fn st_swapordinates_text<W, O>(wkt: W, ords: O) -> st_swapordinates<st_geomfromewkt<W>, O>
where
    W: AsExpression<Text>,
    O: AsExpression<Text>,
{
    st_swapordinates(st_geomfromewkt(wkt), ords)
}
