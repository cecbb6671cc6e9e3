//! Affine transforms. Each binding has a `_text` twin that takes WKT/EWKT.
//!
//! Coefficients follow the PostGIS matrix layout: for [`st_affine`]
//!
//! ```text
//! / a  b  c  x_off \
//! | d  e  f  y_off |
//! | g  h  i  z_off |
//! \ 0  0  0  1     /
//! ```
//!
//! Angles are radians, counter-clockwise.

use super::io::st_geomfromewkt;
use crate::types::Geometry;
use diesel::expression::AsExpression;
use diesel::sql_types::{Double, Nullable, Text};

diesel::define_sql_function! {
    /// Full 3D affine transform.
    fn st_affine(
        geom: Nullable<Geometry>,
        a: Double,
        b: Double,
        c: Double,
        d: Double,
        e: Double,
        f: Double,
        g: Double,
        h: Double,
        i: Double,
        x_off: Double,
        y_off: Double,
        z_off: Double,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// 2D affine transform; Z is left unchanged.
    #[sql_name = "ST_Affine"]
    fn st_affine_2d(
        geom: Nullable<Geometry>,
        a: Double,
        b: Double,
        d: Double,
        e: Double,
        x_off: Double,
        y_off: Double,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Rotate about the origin.
    fn st_rotate(geom: Nullable<Geometry>, angle: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Rotate about the pivot (`x0`, `y0`).
    #[sql_name = "ST_Rotate"]
    fn st_rotate_xy(geom: Nullable<Geometry>, angle: Double, x0: Double, y0: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Rotate about a pivot point, for example the centroid.
    #[sql_name = "ST_Rotate"]
    fn st_rotate_origin(
        geom: Nullable<Geometry>,
        angle: Double,
        origin: Nullable<Geometry>,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Rotate about the X axis.
    fn st_rotatex(geom: Nullable<Geometry>, angle: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Rotate about the Y axis.
    fn st_rotatey(geom: Nullable<Geometry>, angle: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Rotate about the Z axis; same as [`st_rotate`].
    fn st_rotatez(geom: Nullable<Geometry>, angle: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Scale X and Y; Z is left unchanged.
    fn st_scale(geom: Nullable<Geometry>, x_factor: Double, y_factor: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    #[sql_name = "ST_Scale"]
    fn st_scale_xyz(
        geom: Nullable<Geometry>,
        x_factor: Double,
        y_factor: Double,
        z_factor: Double,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Scale every ordinate by the matching ordinate of `factor` (M included
    /// when `factor` has one).
    #[sql_name = "ST_Scale"]
    fn st_scale_factor(geom: Nullable<Geometry>, factor: Nullable<Geometry>) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// [`st_scale_factor`] about a false origin.
    #[sql_name = "ST_Scale"]
    fn st_scale_origin(
        geom: Nullable<Geometry>,
        factor: Nullable<Geometry>,
        origin: Nullable<Geometry>,
    ) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    fn st_translate(geom: Nullable<Geometry>, dx: Double, dy: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    #[sql_name = "ST_Translate"]
    fn st_translate_xyz(geom: Nullable<Geometry>, dx: Double, dy: Double, dz: Double) -> Nullable<Geometry>;
}

diesel::define_sql_function! {
    /// Translate by (`dx`, `dy`) then scale X/Y by (`x_factor`, `y_factor`).
    fn st_transscale(
        geom: Nullable<Geometry>,
        dx: Double,
        dy: Double,
        x_factor: Double,
        y_factor: Double,
    ) -> Nullable<Geometry>;
}

// ── Text overloads ──────────────────────────────────────────────────────────

type FromEwkt<W> = st_geomfromewkt<W>;

#[allow(clippy::too_many_arguments)]
pub fn st_affine_text<W, A, B, C, D, E, F, G, H, I, XO, YO, ZO>(
    wkt: W,
    a: A,
    b: B,
    c: C,
    d: D,
    e: E,
    f: F,
    g: G,
    h: H,
    i: I,
    x_off: XO,
    y_off: YO,
    z_off: ZO,
) -> st_affine<FromEwkt<W>, A, B, C, D, E, F, G, H, I, XO, YO, ZO>
where
    W: AsExpression<Text>,
    A: AsExpression<Double>,
    B: AsExpression<Double>,
    C: AsExpression<Double>,
    D: AsExpression<Double>,
    E: AsExpression<Double>,
    F: AsExpression<Double>,
    G: AsExpression<Double>,
    H: AsExpression<Double>,
    I: AsExpression<Double>,
    XO: AsExpression<Double>,
    YO: AsExpression<Double>,
    ZO: AsExpression<Double>,
{
    st_affine(
        st_geomfromewkt(wkt),
        a,
        b,
        c,
        d,
        e,
        f,
        g,
        h,
        i,
        x_off,
        y_off,
        z_off,
    )
}

pub fn st_affine_2d_text<W, A, B, D, E, XO, YO>(
    wkt: W,
    a: A,
    b: B,
    d: D,
    e: E,
    x_off: XO,
    y_off: YO,
) -> st_affine_2d<FromEwkt<W>, A, B, D, E, XO, YO>
where
    W: AsExpression<Text>,
    A: AsExpression<Double>,
    B: AsExpression<Double>,
    D: AsExpression<Double>,
    E: AsExpression<Double>,
    XO: AsExpression<Double>,
    YO: AsExpression<Double>,
{
    st_affine_2d(st_geomfromewkt(wkt), a, b, d, e, x_off, y_off)
}

pub fn st_rotate_text<W, R>(wkt: W, angle: R) -> st_rotate<FromEwkt<W>, R>
where
    W: AsExpression<Text>,
    R: AsExpression<Double>,
{
    st_rotate(st_geomfromewkt(wkt), angle)
}

pub fn st_rotate_xy_text<W, R, X, Y>(wkt: W, angle: R, x0: X, y0: Y) -> st_rotate_xy<FromEwkt<W>, R, X, Y>
where
    W: AsExpression<Text>,
    R: AsExpression<Double>,
    X: AsExpression<Double>,
    Y: AsExpression<Double>,
{
    st_rotate_xy(st_geomfromewkt(wkt), angle, x0, y0)
}

pub fn st_rotate_origin_text<W, R, O>(wkt: W, angle: R, origin: O) -> st_rotate_origin<FromEwkt<W>, R, O>
where
    W: AsExpression<Text>,
    R: AsExpression<Double>,
    O: AsExpression<Nullable<Geometry>>,
{
    st_rotate_origin(st_geomfromewkt(wkt), angle, origin)
}

pub fn st_rotatex_text<W, R>(wkt: W, angle: R) -> st_rotatex<FromEwkt<W>, R>
where
    W: AsExpression<Text>,
    R: AsExpression<Double>,
{
    st_rotatex(st_geomfromewkt(wkt), angle)
}

pub fn st_rotatey_text<W, R>(wkt: W, angle: R) -> st_rotatey<FromEwkt<W>, R>
where
    W: AsExpression<Text>,
    R: AsExpression<Double>,
{
    st_rotatey(st_geomfromewkt(wkt), angle)
}

pub fn st_rotatez_text<W, R>(wkt: W, angle: R) -> st_rotatez<FromEwkt<W>, R>
where
    W: AsExpression<Text>,
    R: AsExpression<Double>,
{
    st_rotatez(st_geomfromewkt(wkt), angle)
}

pub fn st_scale_text<W, X, Y>(wkt: W, x_factor: X, y_factor: Y) -> st_scale<FromEwkt<W>, X, Y>
where
    W: AsExpression<Text>,
    X: AsExpression<Double>,
    Y: AsExpression<Double>,
{
    st_scale(st_geomfromewkt(wkt), x_factor, y_factor)
}

pub fn st_scale_xyz_text<W, X, Y, Z>(
    wkt: W,
    x_factor: X,
    y_factor: Y,
    z_factor: Z,
) -> st_scale_xyz<FromEwkt<W>, X, Y, Z>
where
    W: AsExpression<Text>,
    X: AsExpression<Double>,
    Y: AsExpression<Double>,
    Z: AsExpression<Double>,
{
    st_scale_xyz(st_geomfromewkt(wkt), x_factor, y_factor, z_factor)
}

pub fn st_scale_factor_text<W, P>(wkt: W, factor: P) -> st_scale_factor<FromEwkt<W>, P>
where
    W: AsExpression<Text>,
    P: AsExpression<Nullable<Geometry>>,
{
    st_scale_factor(st_geomfromewkt(wkt), factor)
}

pub fn st_scale_origin_text<W, P, O>(wkt: W, factor: P, origin: O) -> st_scale_origin<FromEwkt<W>, P, O>
where
    W: AsExpression<Text>,
    P: AsExpression<Nullable<Geometry>>,
    O: AsExpression<Nullable<Geometry>>,
{
    st_scale_origin(st_geomfromewkt(wkt), factor, origin)
}

pub fn st_translate_text<W, X, Y>(wkt: W, dx: X, dy: Y) -> st_translate<FromEwkt<W>, X, Y>
where
    W: AsExpression<Text>,
    X: AsExpression<Double>,
    Y: AsExpression<Double>,
{
    st_translate(st_geomfromewkt(wkt), dx, dy)
}

pub fn st_translate_xyz_text<W, X, Y, Z>(wkt: W, dx: X, dy: Y, dz: Z) -> st_translate_xyz<FromEwkt<W>, X, Y, Z>
where
    W: AsExpression<Text>,
    X: AsExpression<Double>,
    Y: AsExpression<Double>,
    Z: AsExpression<Double>,
{
    st_translate_xyz(st_geomfromewkt(wkt), dx, dy, dz)
}

pub fn st_transscale_text<W, X, Y, XF, YF>(
    wkt: W,
    dx: X,
    dy: Y,
    x_factor: XF,
    y_factor: YF,
) -> st_transscale<FromEwkt<W>, X, Y, XF, YF>
where
    W: AsExpression<Text>,
    X: AsExpression<Double>,
    Y: AsExpression<Double>,
    XF: AsExpression<Double>,
    YF: AsExpression<Double>,
{
    st_transscale(st_geomfromewkt(wkt), dx, dy, x_factor, y_factor)
}
