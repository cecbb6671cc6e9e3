//! Geometry value model for PostGIS query results.
//!
//! `geo::Geometry<f64>` is XY only, so values produced by the force, affine
//! and snap-to-grid families (which carry Z and M ordinates) decode into
//! [`Geometry`] instead. An XY projection into `geo` is available through
//! `From` for client-side assertions.

use std::fmt;
use std::str::FromStr;

use geozero::{CoordDimensions, GeomProcessor, GeozeroGeometry};

use crate::error::{Result, StqlError};

/// One coordinate axis of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordinate {
    X,
    Y,
    Z,
    M,
}

impl Ordinate {
    /// Lower-case name as accepted by `ST_SwapOrdinates`.
    pub const fn as_char(self) -> char {
        match self {
            Ordinate::X => 'x',
            Ordinate::Y => 'y',
            Ordinate::Z => 'z',
            Ordinate::M => 'm',
        }
    }
}

impl FromStr for Ordinate {
    type Err = StqlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" | "X" => Ok(Ordinate::X),
            "y" | "Y" => Ok(Ordinate::Y),
            "z" | "Z" => Ok(Ordinate::Z),
            "m" | "M" => Ok(Ordinate::M),
            other => Err(StqlError::UnknownOrdinate(other.to_string())),
        }
    }
}

impl fmt::Display for Ordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single vertex with optional elevation (Z) and measure (M).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl Coord {
    pub const fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// Read one ordinate; `None` when the vertex has no such axis.
    ///
    /// ```
    /// use stql_core::{Coord, Ordinate};
    ///
    /// let c = Coord::xyz(1.0, 2.0, 3.0);
    /// assert_eq!(c.get(Ordinate::Z), Some(3.0));
    /// assert_eq!(c.get(Ordinate::M), None);
    /// ```
    pub fn get(&self, ordinate: Ordinate) -> Option<f64> {
        match ordinate {
            Ordinate::X => Some(self.x),
            Ordinate::Y => Some(self.y),
            Ordinate::Z => self.z,
            Ordinate::M => self.m,
        }
    }

    /// Compare two vertices ordinate by ordinate with an absolute tolerance.
    /// Both vertices must carry the same set of axes.
    pub fn approx_eq(&self, other: &Coord, tolerance: f64) -> bool {
        fn close(a: f64, b: f64, tolerance: f64) -> bool {
            (a - b).abs() <= tolerance
        }
        fn close_opt(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => close(a, b, tolerance),
                (None, None) => true,
                _ => false,
            }
        }
        close(self.x, other.x, tolerance)
            && close(self.y, other.y, tolerance)
            && close_opt(self.z, other.z, tolerance)
            && close_opt(self.m, other.m, tolerance)
    }
}

/// Which optional ordinates every vertex of a geometry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub has_z: bool,
    pub has_m: bool,
}

impl Dimensions {
    pub const XY: Self = Self {
        has_z: false,
        has_m: false,
    };
    pub const XYZ: Self = Self {
        has_z: true,
        has_m: false,
    };
    pub const XYM: Self = Self {
        has_z: false,
        has_m: true,
    };
    pub const XYZM: Self = Self {
        has_z: true,
        has_m: true,
    };

    pub const fn of(coord: &Coord) -> Self {
        Self {
            has_z: coord.z.is_some(),
            has_m: coord.m.is_some(),
        }
    }

    /// Number of ordinates per vertex (2, 3, or 4), as `ST_CoordDim`.
    pub const fn coord_dim(self) -> u8 {
        2 + self.has_z as u8 + self.has_m as u8
    }
}

/// Structural part of a geometry value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// `None` encodes `POINT EMPTY`.
    Point(Option<Coord>),
    LineString(Vec<Coord>),
    /// Exterior ring first, then interior rings.
    Polygon(Vec<Vec<Coord>>),
    /// `None` members encode `EMPTY` points, which still count as members.
    MultiPoint(Vec<Option<Coord>>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
    GeometryCollection(Vec<Shape>),
}

impl Shape {
    /// OGC type keyword (`POINT`, `LINESTRING`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Point(_) => "POINT",
            Shape::LineString(_) => "LINESTRING",
            Shape::Polygon(_) => "POLYGON",
            Shape::MultiPoint(_) => "MULTIPOINT",
            Shape::MultiLineString(_) => "MULTILINESTRING",
            Shape::MultiPolygon(_) => "MULTIPOLYGON",
            Shape::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    pub fn is_empty(&self) -> bool {
        let mut seen = false;
        self.for_each_coord(&mut |_| seen = true);
        !seen
    }

    /// Number of component geometries, as `ST_NumGeometries`.
    pub fn num_geometries(&self) -> usize {
        match self {
            Shape::Point(_) | Shape::LineString(_) | Shape::Polygon(_) => {
                usize::from(!self.is_empty())
            }
            Shape::MultiPoint(points) => points.len(),
            Shape::MultiLineString(lines) => lines.len(),
            Shape::MultiPolygon(polygons) => polygons.len(),
            Shape::GeometryCollection(items) => items.len(),
        }
    }

    /// Visit every vertex in storage order (rings and members in sequence).
    pub fn for_each_coord(&self, f: &mut impl FnMut(&Coord)) {
        match self {
            Shape::Point(point) => point.iter().for_each(|c| f(c)),
            Shape::LineString(coords) => coords.iter().for_each(f),
            Shape::MultiPoint(points) => points.iter().flatten().for_each(f),
            Shape::Polygon(rings) | Shape::MultiLineString(rings) => {
                rings.iter().flatten().for_each(f)
            }
            Shape::MultiPolygon(polygons) => polygons.iter().flatten().flatten().for_each(f),
            Shape::GeometryCollection(items) => {
                for item in items {
                    item.for_each_coord(f);
                }
            }
        }
    }

    fn approx_eq(&self, other: &Shape, tolerance: f64) -> bool {
        fn seq(a: &[Coord], b: &[Coord], tolerance: f64) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.approx_eq(b, tolerance))
        }
        fn rings(a: &[Vec<Coord>], b: &[Vec<Coord>], tolerance: f64) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| seq(a, b, tolerance))
        }
        fn point(a: &Option<Coord>, b: &Option<Coord>, tolerance: f64) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a.approx_eq(b, tolerance),
                (None, None) => true,
                _ => false,
            }
        }

        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => point(a, b, tolerance),
            (Shape::LineString(a), Shape::LineString(b)) => seq(a, b, tolerance),
            (Shape::MultiPoint(a), Shape::MultiPoint(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| point(a, b, tolerance))
            }
            (Shape::Polygon(a), Shape::Polygon(b))
            | (Shape::MultiLineString(a), Shape::MultiLineString(b)) => rings(a, b, tolerance),
            (Shape::MultiPolygon(a), Shape::MultiPolygon(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| rings(a, b, tolerance))
            }
            (Shape::GeometryCollection(a), Shape::GeometryCollection(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.approx_eq(b, tolerance))
            }
            _ => false,
        }
    }
}

/// A decoded geometry: shape, ordinate layout and optional SRID.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: Shape,
    dims: Dimensions,
    srid: Option<i32>,
}

impl Geometry {
    /// Build a geometry without SRID; dimensions follow the first vertex.
    ///
    /// ```
    /// use stql_core::{Coord, Dimensions, Geometry, Shape};
    ///
    /// let line = Geometry::new(Shape::LineString(vec![
    ///     Coord::xyz(1.0, 2.0, 3.0),
    ///     Coord::xyz(1.0, 4.0, 3.0),
    /// ]));
    /// assert_eq!(line.dims(), Dimensions::XYZ);
    /// assert_eq!(line.to_ewkt().unwrap(), "LINESTRING(1 2 3,1 4 3)");
    /// ```
    pub fn new(shape: Shape) -> Self {
        let mut dims = None;
        shape.for_each_coord(&mut |c| {
            dims.get_or_insert(Dimensions::of(c));
        });
        Self {
            shape,
            dims: dims.unwrap_or_default(),
            srid: None,
        }
    }

    pub fn from_parts(shape: Shape, dims: Dimensions, srid: Option<i32>) -> Self {
        Self { shape, dims, srid }
    }

    pub fn with_srid(mut self, srid: Option<i32>) -> Self {
        self.srid = srid;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    /// Type name as PostGIS `GeometryType` reports it (`POINTM` for XYM).
    pub fn geometry_type(&self) -> String {
        let name = self.shape.type_name();
        if self.dims == Dimensions::XYM {
            format!("{name}M")
        } else {
            name.to_string()
        }
    }

    /// Type name as PostGIS `ST_GeometryType` reports it (`ST_LineString`).
    pub fn st_geometry_type(&self) -> &'static str {
        match self.shape {
            Shape::Point(_) => "ST_Point",
            Shape::LineString(_) => "ST_LineString",
            Shape::Polygon(_) => "ST_Polygon",
            Shape::MultiPoint(_) => "ST_MultiPoint",
            Shape::MultiLineString(_) => "ST_MultiLineString",
            Shape::MultiPolygon(_) => "ST_MultiPolygon",
            Shape::GeometryCollection(_) => "ST_GeometryCollection",
        }
    }

    pub fn coord_dim(&self) -> u8 {
        self.dims.coord_dim()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn num_geometries(&self) -> usize {
        self.shape.num_geometries()
    }

    /// Total vertex count across all parts, as `ST_NPoints`.
    pub fn num_points(&self) -> usize {
        let mut n = 0;
        self.shape.for_each_coord(&mut |_| n += 1);
        n
    }

    /// All vertices in storage order.
    pub fn vertices(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        self.shape.for_each_coord(&mut |c| out.push(*c));
        out
    }

    /// Zero-based vertex access across all parts.
    pub fn vertex(&self, index: usize) -> Result<Coord> {
        let vertices = self.vertices();
        vertices.get(index).copied().ok_or(StqlError::OutOfBounds {
            index,
            len: vertices.len(),
        })
    }

    /// Zero-based ordinate access; `Ok(None)` when the axis is absent.
    ///
    /// ```
    /// use stql_core::{Geometry, Ordinate};
    ///
    /// let g: Geometry = "LINESTRING(1 2 3 4, 1 1 1 1)".parse().unwrap();
    /// assert_eq!(g.ordinate(0, Ordinate::M).unwrap(), Some(4.0));
    /// assert!(g.ordinate(5, Ordinate::X).is_err());
    /// ```
    pub fn ordinate(&self, index: usize, ordinate: Ordinate) -> Result<Option<f64>> {
        Ok(self.vertex(index)?.get(ordinate))
    }

    /// The point vertex, `None` for `POINT EMPTY`.
    pub fn as_point(&self) -> Result<Option<Coord>> {
        match self.shape {
            Shape::Point(point) => Ok(point),
            _ => Err(StqlError::WrongType("Point")),
        }
    }

    pub fn as_line_string(&self) -> Result<&[Coord]> {
        match &self.shape {
            Shape::LineString(coords) => Ok(coords),
            _ => Err(StqlError::WrongType("LineString")),
        }
    }

    /// Structural equality with an absolute per-ordinate tolerance.
    /// SRID and dimensions must match exactly.
    pub fn approx_eq(&self, other: &Geometry, tolerance: f64) -> bool {
        self.srid == other.srid
            && self.dims == other.dims
            && self.shape.approx_eq(&other.shape, tolerance)
    }
}

// ── geo interop ───────────────────────────────────────────────────────────────

fn geo_line(coords: &[Coord]) -> geo::LineString<f64> {
    geo::LineString(
        coords
            .iter()
            .map(|c| geo::Coord { x: c.x, y: c.y })
            .collect(),
    )
}

fn geo_polygon(rings: &[Vec<Coord>]) -> geo::Polygon<f64> {
    match rings.split_first() {
        Some((exterior, interiors)) => geo::Polygon::new(
            geo_line(exterior),
            interiors.iter().map(|r| geo_line(r)).collect(),
        ),
        None => geo::Polygon::new(geo::LineString(Vec::new()), Vec::new()),
    }
}

// Same empty-point convention as EWKB: NaN ordinates.
fn geo_point(point: &Option<Coord>) -> geo::Point<f64> {
    match point {
        Some(c) => geo::Point::new(c.x, c.y),
        None => geo::Point::new(f64::NAN, f64::NAN),
    }
}

fn point_from_geo(p: &geo::Point<f64>) -> Option<Coord> {
    (!(p.x().is_nan() && p.y().is_nan())).then(|| Coord::xy(p.x(), p.y()))
}

fn shape_to_geo(shape: &Shape) -> geo::Geometry<f64> {
    match shape {
        Shape::Point(point) => geo::Geometry::Point(geo_point(point)),
        Shape::LineString(coords) => geo::Geometry::LineString(geo_line(coords)),
        Shape::Polygon(rings) => geo::Geometry::Polygon(geo_polygon(rings)),
        Shape::MultiPoint(points) => {
            geo::Geometry::MultiPoint(geo::MultiPoint(points.iter().map(geo_point).collect()))
        }
        Shape::MultiLineString(lines) => geo::Geometry::MultiLineString(geo::MultiLineString(
            lines.iter().map(|l| geo_line(l)).collect(),
        )),
        Shape::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(geo::MultiPolygon(
            polygons.iter().map(|p| geo_polygon(p)).collect(),
        )),
        Shape::GeometryCollection(items) => geo::Geometry::GeometryCollection(
            geo::GeometryCollection(items.iter().map(shape_to_geo).collect()),
        ),
    }
}

fn coords_from_geo(line: &geo::LineString<f64>) -> Vec<Coord> {
    line.0.iter().map(|c| Coord::xy(c.x, c.y)).collect()
}

fn rings_from_geo(polygon: &geo::Polygon<f64>) -> Vec<Vec<Coord>> {
    if polygon.exterior().0.is_empty() {
        return Vec::new();
    }
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(coords_from_geo)
        .collect()
}

fn shape_from_geo(geom: &geo::Geometry<f64>) -> Shape {
    match geom {
        geo::Geometry::Point(p) => Shape::Point(point_from_geo(p)),
        geo::Geometry::Line(l) => Shape::LineString(vec![
            Coord::xy(l.start.x, l.start.y),
            Coord::xy(l.end.x, l.end.y),
        ]),
        geo::Geometry::LineString(l) => Shape::LineString(coords_from_geo(l)),
        geo::Geometry::Polygon(p) => Shape::Polygon(rings_from_geo(p)),
        geo::Geometry::MultiPoint(mp) => Shape::MultiPoint(mp.0.iter().map(point_from_geo).collect()),
        geo::Geometry::MultiLineString(ml) => {
            Shape::MultiLineString(ml.0.iter().map(coords_from_geo).collect())
        }
        geo::Geometry::MultiPolygon(mp) => {
            Shape::MultiPolygon(mp.0.iter().map(rings_from_geo).collect())
        }
        geo::Geometry::GeometryCollection(gc) => {
            Shape::GeometryCollection(gc.0.iter().map(shape_from_geo).collect())
        }
        geo::Geometry::Rect(r) => Shape::Polygon(rings_from_geo(&r.to_polygon())),
        geo::Geometry::Triangle(t) => Shape::Polygon(rings_from_geo(&t.to_polygon())),
    }
}

/// XY projection; Z, M and SRID are dropped.
impl From<&Geometry> for geo::Geometry<f64> {
    fn from(geom: &Geometry) -> Self {
        shape_to_geo(&geom.shape)
    }
}

impl From<&geo::Geometry<f64>> for Geometry {
    fn from(geom: &geo::Geometry<f64>) -> Self {
        Geometry::from_parts(shape_from_geo(geom), Dimensions::XY, None)
    }
}

impl From<geo::Geometry<f64>> for Geometry {
    fn from(geom: geo::Geometry<f64>) -> Self {
        Geometry::from(&geom)
    }
}

// ── geozero events ────────────────────────────────────────────────────────────

impl From<Dimensions> for CoordDimensions {
    fn from(dims: Dimensions) -> Self {
        CoordDimensions {
            z: dims.has_z,
            m: dims.has_m,
            t: false,
            tm: false,
        }
    }
}

/// Stand-in vertex for an empty point. PostGIS writes one NaN per declared
/// ordinate, and geozero's writers print it as `EMPTY`.
fn empty_coord(dims: Dimensions) -> Coord {
    Coord {
        x: f64::NAN,
        y: f64::NAN,
        z: dims.has_z.then_some(f64::NAN),
        m: dims.has_m.then_some(f64::NAN),
    }
}

fn process_coord<P: GeomProcessor>(
    c: &Coord,
    idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    if processor.multi_dim() {
        processor.coordinate(c.x, c.y, c.z, c.m, None, None, idx)
    } else {
        processor.xy(c.x, c.y, idx)
    }
}

fn process_line<P: GeomProcessor>(
    coords: &[Coord],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    processor.linestring_begin(tagged, coords.len(), idx)?;
    for (i, c) in coords.iter().enumerate() {
        process_coord(c, i, processor)?;
    }
    processor.linestring_end(tagged, idx)
}

fn process_polygon<P: GeomProcessor>(
    rings: &[Vec<Coord>],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    processor.polygon_begin(tagged, rings.len(), idx)?;
    for (i, ring) in rings.iter().enumerate() {
        process_line(ring, false, i, processor)?;
    }
    processor.polygon_end(tagged, idx)
}

fn process_shape<P: GeomProcessor>(
    shape: &Shape,
    dims: Dimensions,
    idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    match shape {
        // No `empty_point` event here: geozero's WKB writer rejects it.
        Shape::Point(point) => {
            processor.point_begin(idx)?;
            process_coord(&point.unwrap_or_else(|| empty_coord(dims)), 0, processor)?;
            processor.point_end(idx)
        }
        Shape::LineString(coords) => process_line(coords, true, idx, processor),
        Shape::Polygon(rings) => process_polygon(rings, true, idx, processor),
        Shape::MultiPoint(points) => {
            processor.multipoint_begin(points.len(), idx)?;
            for (i, point) in points.iter().enumerate() {
                process_coord(&point.unwrap_or_else(|| empty_coord(dims)), i, processor)?;
            }
            processor.multipoint_end(idx)
        }
        Shape::MultiLineString(lines) => {
            processor.multilinestring_begin(lines.len(), idx)?;
            for (i, line) in lines.iter().enumerate() {
                process_line(line, false, i, processor)?;
            }
            processor.multilinestring_end(idx)
        }
        Shape::MultiPolygon(polygons) => {
            processor.multipolygon_begin(polygons.len(), idx)?;
            for (i, rings) in polygons.iter().enumerate() {
                process_polygon(rings, false, i, processor)?;
            }
            processor.multipolygon_end(idx)
        }
        Shape::GeometryCollection(items) => {
            processor.geometrycollection_begin(items.len(), idx)?;
            for (i, item) in items.iter().enumerate() {
                process_shape(item, dims, i, processor)?;
            }
            processor.geometrycollection_end(idx)
        }
    }
}

/// Feeds geozero's EWKB and WKT writers with every ordinate the value carries.
impl GeozeroGeometry for Geometry {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> geozero::error::Result<()> {
        process_shape(&self.shape, self.dims, 0, processor)
    }

    fn dims(&self) -> CoordDimensions {
        self.dims.into()
    }

    fn srid(&self) -> Option<i32> {
        self.srid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_xyz() -> Geometry {
        Geometry::new(Shape::LineString(vec![
            Coord::xyz(1.0, 2.0, 3.0),
            Coord::xyz(1.0, 1.0, 1.0),
        ]))
    }

    #[test]
    fn ordinate_parse_accepts_both_cases() {
        assert_eq!("x".parse::<Ordinate>().unwrap(), Ordinate::X);
        assert_eq!("M".parse::<Ordinate>().unwrap(), Ordinate::M);
        let err = "q".parse::<Ordinate>().unwrap_err();
        assert!(format!("{err}").contains("unknown ordinate"));
    }

    #[test]
    fn new_infers_dimensions_from_first_vertex() {
        assert_eq!(line_xyz().dims(), Dimensions::XYZ);
        assert_eq!(
            Geometry::new(Shape::Point(Some(Coord::xym(1.0, 2.0, 4.0)))).dims(),
            Dimensions::XYM
        );
        assert_eq!(Geometry::new(Shape::Point(None)).dims(), Dimensions::XY);
    }

    #[test]
    fn geometry_type_names() {
        assert_eq!(line_xyz().geometry_type(), "LINESTRING");
        assert_eq!(line_xyz().st_geometry_type(), "ST_LineString");
        let pm = Geometry::new(Shape::Point(Some(Coord::xym(1.0, 2.0, 4.0))));
        assert_eq!(pm.geometry_type(), "POINTM");
    }

    #[test]
    fn vertex_access_and_bounds() {
        let g = line_xyz();
        assert_eq!(g.num_points(), 2);
        assert_eq!(g.vertex(1).unwrap(), Coord::xyz(1.0, 1.0, 1.0));
        assert_eq!(g.ordinate(0, Ordinate::Z).unwrap(), Some(3.0));
        assert_eq!(g.ordinate(0, Ordinate::M).unwrap(), None);
        match g.vertex(2) {
            Err(StqlError::OutOfBounds { index: 2, len: 2 }) => {}
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn num_geometries_matches_postgis_counting() {
        assert_eq!(line_xyz().num_geometries(), 1);
        assert_eq!(Geometry::new(Shape::Point(None)).num_geometries(), 0);
        let gc = Geometry::new(Shape::GeometryCollection(vec![
            Shape::MultiPoint(vec![Some(Coord::xy(-2.0, 3.0)), Some(Coord::xy(-2.0, 2.0))]),
            Shape::LineString(vec![Coord::xy(5.0, 5.0), Coord::xy(10.0, 10.0)]),
        ]));
        assert_eq!(gc.num_geometries(), 2);
        assert_eq!(gc.num_points(), 4);
    }

    #[test]
    fn approx_eq_respects_tolerance_and_axes() {
        let a = line_xyz();
        let b = Geometry::new(Shape::LineString(vec![
            Coord::xyz(1.0 + 1e-10, 2.0, 3.0),
            Coord::xyz(1.0, 1.0, 1.0 - 1e-10),
        ]));
        assert!(a.approx_eq(&b, 1e-8));
        assert!(!a.approx_eq(&b, 1e-12));

        let flat = Geometry::new(Shape::LineString(vec![
            Coord::xy(1.0, 2.0),
            Coord::xy(1.0, 1.0),
        ]));
        assert!(!a.approx_eq(&flat, 1.0));
        assert!(!a.approx_eq(&a.clone().with_srid(Some(4326)), 1e-8));
    }

    #[test]
    fn as_point_and_wrong_type() {
        let p = Geometry::new(Shape::Point(Some(Coord::xy(3.0, 3.0))));
        assert_eq!(p.as_point().unwrap(), Some(Coord::xy(3.0, 3.0)));
        assert!(matches!(
            line_xyz().as_point(),
            Err(StqlError::WrongType("Point"))
        ));
        assert!(p.as_line_string().is_err());
    }

    #[test]
    fn geo_projection_drops_z_and_m() {
        let projected: geo::Geometry<f64> = (&line_xyz()).into();
        assert_eq!(
            projected,
            geo::Geometry::LineString(geo::LineString::from(vec![(1.0, 2.0), (1.0, 1.0)]))
        );
    }

    #[test]
    fn geo_polygon_roundtrip_keeps_ring_order() {
        let polygon = geo::Geometry::Polygon(geo::Polygon::new(
            geo::LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]),
            vec![geo::LineString::from(vec![
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 2.0),
                (1.0, 1.0),
            ])],
        ));
        let model = Geometry::from(&polygon);
        match model.shape() {
            Shape::Polygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert_eq!(rings[1][0], Coord::xy(1.0, 1.0));
            }
            other => panic!("expected polygon, got {other:?}"),
        }
        let back: geo::Geometry<f64> = (&model).into();
        assert_eq!(back, polygon);
    }

    #[test]
    fn empty_multipoint_members_still_count() {
        let mp = Geometry::new(Shape::MultiPoint(vec![None, Some(Coord::xy(1.0, 2.0))]));
        assert_eq!(mp.num_geometries(), 2);
        assert_eq!(mp.num_points(), 1);
        assert!(!mp.is_empty());
        assert!(Geometry::new(Shape::MultiPoint(vec![None])).is_empty());

        let projected: geo::Geometry<f64> = (&mp).into();
        let back = Geometry::from(&projected);
        assert!(back.approx_eq(&mp, 0.0));
    }

    #[test]
    fn geo_empty_point_uses_nan_convention() {
        let empty = geo::Geometry::Point(geo::Point::new(f64::NAN, f64::NAN));
        let model = Geometry::from(&empty);
        assert!(model.is_empty());
        assert_eq!(model.as_point().unwrap(), None);
    }
}
