//! Extension trait for method-style PostGIS calls on geometry expressions.
//!
//! Import [`GeometryExpressionMethods`] (or `use stql_diesel::prelude::*`)
//! to chain editors and transforms on any `Nullable<Geometry>` expression:
//!
//! ```rust,ignore
//! use diesel::prelude::*;
//! use stql_diesel::prelude::*;
//!
//! let flattened: Vec<Option<String>> = shapes::table
//!     .select(shapes::geom.st_force2d().st_rotate(std::f64::consts::PI).st_astext())
//!     .load(&mut conn)?;
//! ```
//!
//! Text overloads (`st_rotate_text`, ...) take WKT rather than a geometry
//! expression and therefore only exist as free functions.

use diesel::expression::{AsExpression, Expression};
use diesel::sql_types::{Double, Integer, Nullable, Text};

use crate::functions;
use crate::types::Geometry;

/// Method-style access to PostGIS functions for `Nullable<Geometry>` expressions.
///
/// Implemented for every Diesel expression with `SqlType = Nullable<Geometry>`.
/// Each method delegates to the free function of the same name in
/// [`crate::functions`].
///
/// For non-nullable `Geometry` columns, call `.nullable()` first.
pub trait GeometryExpressionMethods: Expression<SqlType = Nullable<Geometry>> + Sized {
    // ── I/O ───────────────────────────────────────────────────────────────

    /// Serialize this geometry to WKT text.
    fn st_astext(self) -> functions::st_astext<Self> {
        functions::st_astext(self)
    }

    /// Serialize this geometry to EWKT text (`SRID=n;WKT`).
    fn st_asewkt(self) -> functions::st_asewkt<Self> {
        functions::st_asewkt(self)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Upper-case type name, as `GeometryType`.
    fn geometry_type(self) -> functions::geometry_type<Self> {
        functions::geometry_type(self)
    }

    fn st_boundary(self) -> functions::st_boundary<Self> {
        functions::st_boundary(self)
    }

    /// Topological dimension.
    fn st_dimension(self) -> functions::st_dimension<Self> {
        functions::st_dimension(self)
    }

    fn st_endpoint(self) -> functions::st_endpoint<Self> {
        functions::st_endpoint(self)
    }

    /// Bounding box of this geometry.
    fn st_envelope(self) -> functions::st_envelope<Self> {
        functions::st_envelope(self)
    }

    fn st_isempty(self) -> functions::st_isempty<Self> {
        functions::st_isempty(self)
    }

    fn st_numgeometries(self) -> functions::st_numgeometries<Self> {
        functions::st_numgeometries(self)
    }

    fn st_numpoints(self) -> functions::st_numpoints<Self> {
        functions::st_numpoints(self)
    }

    fn st_x(self) -> functions::st_x<Self> {
        functions::st_x(self)
    }

    fn st_y(self) -> functions::st_y<Self> {
        functions::st_y(self)
    }

    fn st_z(self) -> functions::st_z<Self> {
        functions::st_z(self)
    }

    fn st_m(self) -> functions::st_m<Self> {
        functions::st_m(self)
    }

    // ── Processing ────────────────────────────────────────────────────────

    fn st_centroid(self) -> functions::st_centroid<Self> {
        functions::st_centroid(self)
    }

    fn st_convexhull(self) -> functions::st_convexhull<Self> {
        functions::st_convexhull(self)
    }

    /// Part of this geometry not shared with `other`.
    fn st_difference<T>(self, other: T) -> functions::st_difference<Self, T>
    where
        T: AsExpression<Nullable<Geometry>>,
    {
        functions::st_difference(self, other)
    }

    fn st_union<T>(self, other: T) -> functions::st_union<Self, T>
    where
        T: AsExpression<Nullable<Geometry>>,
    {
        functions::st_union(self, other)
    }

    // ── Editors ───────────────────────────────────────────────────────────

    /// Append `point` to this LineString.
    fn st_addpoint<P>(self, point: P) -> functions::st_addpoint<Self, P>
    where
        P: AsExpression<Nullable<Geometry>>,
    {
        functions::st_addpoint(self, point)
    }

    /// Insert `point` before the zero-based `position`.
    fn st_addpoint_at<P, N>(self, point: P, position: N) -> functions::st_addpoint_at<Self, P, N>
    where
        P: AsExpression<Nullable<Geometry>>,
        N: AsExpression<Integer>,
    {
        functions::st_addpoint_at(self, point, position)
    }

    fn st_collectionextract<K>(self, kind: K) -> functions::st_collectionextract<Self, K>
    where
        K: AsExpression<Integer>,
    {
        functions::st_collectionextract(self, kind)
    }

    fn st_collectionhomogenize(self) -> functions::st_collectionhomogenize<Self> {
        functions::st_collectionhomogenize(self)
    }

    fn st_force2d(self) -> functions::st_force2d<Self> {
        functions::st_force2d(self)
    }

    fn st_force3d(self) -> functions::st_force3d<Self> {
        functions::st_force3d(self)
    }

    fn st_force3dz(self) -> functions::st_force3dz<Self> {
        functions::st_force3dz(self)
    }

    fn st_force3dm(self) -> functions::st_force3dm<Self> {
        functions::st_force3dm(self)
    }

    fn st_force4d(self) -> functions::st_force4d<Self> {
        functions::st_force4d(self)
    }

    fn st_forcepolygonccw(self) -> functions::st_forcepolygonccw<Self> {
        functions::st_forcepolygonccw(self)
    }

    fn st_forcecollection(self) -> functions::st_forcecollection<Self> {
        functions::st_forcecollection(self)
    }

    fn st_forcepolygoncw(self) -> functions::st_forcepolygoncw<Self> {
        functions::st_forcepolygoncw(self)
    }

    fn st_forcesfs(self) -> functions::st_forcesfs<Self> {
        functions::st_forcesfs(self)
    }

    fn st_forcesfs_version<V>(self, version: V) -> functions::st_forcesfs_version<Self, V>
    where
        V: AsExpression<Text>,
    {
        functions::st_forcesfs_version(self, version)
    }

    fn st_forcerhr(self) -> functions::st_forcerhr<Self> {
        functions::st_forcerhr(self)
    }

    fn st_forcecurve(self) -> functions::st_forcecurve<Self> {
        functions::st_forcecurve(self)
    }

    fn st_linemerge(self) -> functions::st_linemerge<Self> {
        functions::st_linemerge(self)
    }

    fn st_multi(self) -> functions::st_multi<Self> {
        functions::st_multi(self)
    }

    fn st_normalize(self) -> functions::st_normalize<Self> {
        functions::st_normalize(self)
    }

    fn st_quantizecoordinates<P>(self, prec: P) -> functions::st_quantizecoordinates<Self, P>
    where
        P: AsExpression<Integer>,
    {
        functions::st_quantizecoordinates(self, prec)
    }

    fn st_quantizecoordinates_xyzm<PX, PY, PZ, PM>(
        self,
        prec_x: PX,
        prec_y: PY,
        prec_z: PZ,
        prec_m: PM,
    ) -> functions::st_quantizecoordinates_xyzm<Self, PX, PY, PZ, PM>
    where
        PX: AsExpression<Integer>,
        PY: AsExpression<Integer>,
        PZ: AsExpression<Integer>,
        PM: AsExpression<Integer>,
    {
        functions::st_quantizecoordinates_xyzm(self, prec_x, prec_y, prec_z, prec_m)
    }

    /// Remove the vertex at zero-based `offset`.
    fn st_removepoint<N>(self, offset: N) -> functions::st_removepoint<Self, N>
    where
        N: AsExpression<Integer>,
    {
        functions::st_removepoint(self, offset)
    }

    fn st_reverse(self) -> functions::st_reverse<Self> {
        functions::st_reverse(self)
    }

    fn st_segmentize<L>(self, max_segment_length: L) -> functions::st_segmentize<Self, L>
    where
        L: AsExpression<Double>,
    {
        functions::st_segmentize(self, max_segment_length)
    }

    /// Replace the vertex at zero-based `index` with `point`.
    fn st_setpoint<N, P>(self, index: N, point: P) -> functions::st_setpoint<Self, N, P>
    where
        N: AsExpression<Integer>,
        P: AsExpression<Nullable<Geometry>>,
    {
        functions::st_setpoint(self, index, point)
    }

    fn st_snaptogrid<S>(self, size: S) -> functions::st_snaptogrid<Self, S>
    where
        S: AsExpression<Double>,
    {
        functions::st_snaptogrid(self, size)
    }

    fn st_snaptogrid_xy<SX, SY>(
        self,
        size_x: SX,
        size_y: SY,
    ) -> functions::st_snaptogrid_xy<Self, SX, SY>
    where
        SX: AsExpression<Double>,
        SY: AsExpression<Double>,
    {
        functions::st_snaptogrid_xy(self, size_x, size_y)
    }

    fn st_snaptogrid_origin<OX, OY, SX, SY>(
        self,
        origin_x: OX,
        origin_y: OY,
        size_x: SX,
        size_y: SY,
    ) -> functions::st_snaptogrid_origin<Self, OX, OY, SX, SY>
    where
        OX: AsExpression<Double>,
        OY: AsExpression<Double>,
        SX: AsExpression<Double>,
        SY: AsExpression<Double>,
    {
        functions::st_snaptogrid_origin(self, origin_x, origin_y, size_x, size_y)
    }

    /// Snap to a grid anchored at `origin`, one cell size per ordinate.
    fn st_snaptogrid_point<O, SX, SY, SZ, SM>(
        self,
        origin: O,
        size_x: SX,
        size_y: SY,
        size_z: SZ,
        size_m: SM,
    ) -> functions::st_snaptogrid_point<Self, O, SX, SY, SZ, SM>
    where
        O: AsExpression<Nullable<Geometry>>,
        SX: AsExpression<Double>,
        SY: AsExpression<Double>,
        SZ: AsExpression<Double>,
        SM: AsExpression<Double>,
    {
        functions::st_snaptogrid_point(self, origin, size_x, size_y, size_z, size_m)
    }

    fn st_snap<R, L>(self, reference: R, tolerance: L) -> functions::st_snap<Self, R, L>
    where
        R: AsExpression<Nullable<Geometry>>,
        L: AsExpression<Double>,
    {
        functions::st_snap(self, reference, tolerance)
    }

    /// Swap two ordinates, e.g. `"xy"`.
    fn st_swapordinates<O>(self, ords: O) -> functions::st_swapordinates<Self, O>
    where
        O: AsExpression<Text>,
    {
        functions::st_swapordinates(self, ords)
    }

    // ── Affine transforms ─────────────────────────────────────────────────

    /// Full 3D affine transform.
    #[allow(clippy::too_many_arguments)]
    fn st_affine<A, B, C, D, E, F, G, H, I, XO, YO, ZO>(
        self,
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
    ) -> functions::st_affine<Self, A, B, C, D, E, F, G, H, I, XO, YO, ZO>
    where
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
        functions::st_affine(self, a, b, c, d, e, f, g, h, i, x_off, y_off, z_off)
    }

    /// 2D affine transform; Z unchanged.
    fn st_affine_2d<A, B, D, E, XO, YO>(
        self,
        a: A,
        b: B,
        d: D,
        e: E,
        x_off: XO,
        y_off: YO,
    ) -> functions::st_affine_2d<Self, A, B, D, E, XO, YO>
    where
        A: AsExpression<Double>,
        B: AsExpression<Double>,
        D: AsExpression<Double>,
        E: AsExpression<Double>,
        XO: AsExpression<Double>,
        YO: AsExpression<Double>,
    {
        functions::st_affine_2d(self, a, b, d, e, x_off, y_off)
    }

    /// Rotate counter-clockwise about the origin by `angle` radians.
    fn st_rotate<R>(self, angle: R) -> functions::st_rotate<Self, R>
    where
        R: AsExpression<Double>,
    {
        functions::st_rotate(self, angle)
    }

    fn st_rotate_xy<R, X, Y>(self, angle: R, x0: X, y0: Y) -> functions::st_rotate_xy<Self, R, X, Y>
    where
        R: AsExpression<Double>,
        X: AsExpression<Double>,
        Y: AsExpression<Double>,
    {
        functions::st_rotate_xy(self, angle, x0, y0)
    }

    fn st_rotate_origin<R, O>(self, angle: R, origin: O) -> functions::st_rotate_origin<Self, R, O>
    where
        R: AsExpression<Double>,
        O: AsExpression<Nullable<Geometry>>,
    {
        functions::st_rotate_origin(self, angle, origin)
    }

    fn st_rotatex<R>(self, angle: R) -> functions::st_rotatex<Self, R>
    where
        R: AsExpression<Double>,
    {
        functions::st_rotatex(self, angle)
    }

    fn st_rotatey<R>(self, angle: R) -> functions::st_rotatey<Self, R>
    where
        R: AsExpression<Double>,
    {
        functions::st_rotatey(self, angle)
    }

    fn st_rotatez<R>(self, angle: R) -> functions::st_rotatez<Self, R>
    where
        R: AsExpression<Double>,
    {
        functions::st_rotatez(self, angle)
    }

    fn st_scale<X, Y>(self, x_factor: X, y_factor: Y) -> functions::st_scale<Self, X, Y>
    where
        X: AsExpression<Double>,
        Y: AsExpression<Double>,
    {
        functions::st_scale(self, x_factor, y_factor)
    }

    fn st_scale_xyz<X, Y, Z>(
        self,
        x_factor: X,
        y_factor: Y,
        z_factor: Z,
    ) -> functions::st_scale_xyz<Self, X, Y, Z>
    where
        X: AsExpression<Double>,
        Y: AsExpression<Double>,
        Z: AsExpression<Double>,
    {
        functions::st_scale_xyz(self, x_factor, y_factor, z_factor)
    }

    /// Scale by the ordinates of the point `factor`.
    fn st_scale_factor<P>(self, factor: P) -> functions::st_scale_factor<Self, P>
    where
        P: AsExpression<Nullable<Geometry>>,
    {
        functions::st_scale_factor(self, factor)
    }

    fn st_scale_origin<P, O>(self, factor: P, origin: O) -> functions::st_scale_origin<Self, P, O>
    where
        P: AsExpression<Nullable<Geometry>>,
        O: AsExpression<Nullable<Geometry>>,
    {
        functions::st_scale_origin(self, factor, origin)
    }

    fn st_translate<X, Y>(self, dx: X, dy: Y) -> functions::st_translate<Self, X, Y>
    where
        X: AsExpression<Double>,
        Y: AsExpression<Double>,
    {
        functions::st_translate(self, dx, dy)
    }

    fn st_translate_xyz<X, Y, Z>(
        self,
        dx: X,
        dy: Y,
        dz: Z,
    ) -> functions::st_translate_xyz<Self, X, Y, Z>
    where
        X: AsExpression<Double>,
        Y: AsExpression<Double>,
        Z: AsExpression<Double>,
    {
        functions::st_translate_xyz(self, dx, dy, dz)
    }

    fn st_transscale<X, Y, XF, YF>(
        self,
        dx: X,
        dy: Y,
        x_factor: XF,
        y_factor: YF,
    ) -> functions::st_transscale<Self, X, Y, XF, YF>
    where
        X: AsExpression<Double>,
        Y: AsExpression<Double>,
        XF: AsExpression<Double>,
        YF: AsExpression<Double>,
    {
        functions::st_transscale(self, dx, dy, x_factor, y_factor)
    }

    // ── Validation ────────────────────────────────────────────────────────

    fn st_isvalid(self) -> functions::st_isvalid<Self> {
        functions::st_isvalid(self)
    }

    fn st_isvalid_flags<F>(self, flags: F) -> functions::st_isvalid_flags<Self, F>
    where
        F: AsExpression<Integer>,
    {
        functions::st_isvalid_flags(self, flags)
    }

    /// Why this geometry is invalid, or `Valid Geometry`.
    fn st_isvalidreason(self) -> functions::st_isvalidreason<Self> {
        functions::st_isvalidreason(self)
    }

    fn st_isvalidreason_flags<F>(self, flags: F) -> functions::st_isvalidreason_flags<Self, F>
    where
        F: AsExpression<Integer>,
    {
        functions::st_isvalidreason_flags(self, flags)
    }
}

impl<E> GeometryExpressionMethods for E where E: Expression<SqlType = Nullable<Geometry>> + Sized {}
