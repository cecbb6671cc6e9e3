//! geozero processor that assembles a [`Shape`] keeping Z and M ordinates.
//!
//! `geozero`'s own geo-types writer drops everything beyond XY, so both the
//! EWKB and WKT readers feed this builder instead.

use geozero::error::{GeozeroError, Result};
use geozero::{CoordDimensions, GeomProcessor};

use crate::geometry::{Coord, Dimensions, Shape};

enum Frame {
    Point(Option<Coord>),
    Line(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    /// `None` members are `EMPTY` points.
    MultiPoint(Vec<Option<Coord>>),
    MultiLine(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
    Collection(Vec<Shape>),
}

fn mismatch(what: &str) -> GeozeroError {
    GeozeroError::Geometry(format!("unbalanced {what} events"))
}

#[derive(Default)]
pub(crate) struct ShapeBuilder {
    stack: Vec<Frame>,
    shape: Option<Shape>,
    srid: Option<i32>,
    dims: Option<Dimensions>,
}

/// Output of a completed [`ShapeBuilder`] run.
pub(crate) struct Built {
    pub shape: Shape,
    /// Layout of the first non-empty vertex, `None` if there was none.
    pub dims: Option<Dimensions>,
    pub srid: Option<i32>,
}

impl ShapeBuilder {
    pub(crate) fn finish(self) -> Result<Built> {
        if !self.stack.is_empty() {
            return Err(GeozeroError::Geometry("unterminated geometry".into()));
        }
        let shape = self
            .shape
            .ok_or_else(|| GeozeroError::Geometry("input contains no geometry".into()))?;
        Ok(Built {
            shape,
            dims: self.dims,
            srid: self.srid,
        })
    }

    fn push_coord(&mut self, coord: Coord) -> Result<()> {
        // WKB encodes POINT EMPTY as NaN ordinates.
        let empty = coord.x.is_nan() && coord.y.is_nan();
        if !empty {
            self.dims.get_or_insert(Dimensions::of(&coord));
        }
        match self.stack.last_mut() {
            Some(Frame::Point(slot)) => {
                if !empty {
                    *slot = Some(coord);
                }
            }
            Some(Frame::Line(coords)) => coords.push(coord),
            Some(Frame::MultiPoint(points)) => points.push((!empty).then_some(coord)),
            _ => {
                return Err(GeozeroError::Geometry(
                    "coordinate outside of a point, line or multipoint".into(),
                ));
            }
        }
        Ok(())
    }

    fn emit(&mut self, shape: Shape) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Collection(items)) => {
                items.push(shape);
                Ok(())
            }
            Some(_) => Err(GeozeroError::Geometry(format!(
                "unexpected {} inside a typed multi-geometry",
                shape.type_name()
            ))),
            None if self.shape.is_some() => Err(GeozeroError::Geometry(
                "more than one top-level geometry".into(),
            )),
            None => {
                self.shape = Some(shape);
                Ok(())
            }
        }
    }

    fn pop(&mut self, what: &str) -> Result<Frame> {
        self.stack.pop().ok_or_else(|| mismatch(what))
    }
}

impl GeomProcessor for ShapeBuilder {
    fn dimensions(&self) -> CoordDimensions {
        CoordDimensions::xyzm()
    }

    fn multi_dim(&self) -> bool {
        true
    }

    fn srid(&mut self, srid: Option<i32>) -> Result<()> {
        self.srid = self.srid.or(srid);
        Ok(())
    }

    fn xy(&mut self, x: f64, y: f64, _idx: usize) -> Result<()> {
        self.push_coord(Coord::xy(x, y))
    }

    fn coordinate(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
        _t: Option<f64>,
        _tm: Option<u64>,
        _idx: usize,
    ) -> Result<()> {
        self.push_coord(Coord { x, y, z, m })
    }

    fn empty_point(&mut self, _idx: usize) -> Result<()> {
        if let Some(Frame::MultiPoint(points)) = self.stack.last_mut() {
            points.push(None);
            return Ok(());
        }
        self.emit(Shape::Point(None))
    }

    fn point_begin(&mut self, _idx: usize) -> Result<()> {
        self.stack.push(Frame::Point(None));
        Ok(())
    }

    fn point_end(&mut self, _idx: usize) -> Result<()> {
        let Frame::Point(point) = self.pop("point")? else {
            return Err(mismatch("point"));
        };
        match self.stack.last_mut() {
            Some(Frame::MultiPoint(points)) => {
                points.push(point);
                Ok(())
            }
            _ => self.emit(Shape::Point(point)),
        }
    }

    fn multipoint_begin(&mut self, size: usize, _idx: usize) -> Result<()> {
        self.stack.push(Frame::MultiPoint(Vec::with_capacity(size)));
        Ok(())
    }

    fn multipoint_end(&mut self, _idx: usize) -> Result<()> {
        let Frame::MultiPoint(points) = self.pop("multipoint")? else {
            return Err(mismatch("multipoint"));
        };
        self.emit(Shape::MultiPoint(points))
    }

    fn linestring_begin(&mut self, _tagged: bool, size: usize, _idx: usize) -> Result<()> {
        self.stack.push(Frame::Line(Vec::with_capacity(size)));
        Ok(())
    }

    fn linestring_end(&mut self, _tagged: bool, _idx: usize) -> Result<()> {
        let Frame::Line(coords) = self.pop("linestring")? else {
            return Err(mismatch("linestring"));
        };
        match self.stack.last_mut() {
            Some(Frame::Polygon(rings)) | Some(Frame::MultiLine(rings)) => {
                rings.push(coords);
                Ok(())
            }
            _ => self.emit(Shape::LineString(coords)),
        }
    }

    fn multilinestring_begin(&mut self, size: usize, _idx: usize) -> Result<()> {
        self.stack.push(Frame::MultiLine(Vec::with_capacity(size)));
        Ok(())
    }

    fn multilinestring_end(&mut self, _idx: usize) -> Result<()> {
        let Frame::MultiLine(lines) = self.pop("multilinestring")? else {
            return Err(mismatch("multilinestring"));
        };
        self.emit(Shape::MultiLineString(lines))
    }

    fn polygon_begin(&mut self, _tagged: bool, size: usize, _idx: usize) -> Result<()> {
        self.stack.push(Frame::Polygon(Vec::with_capacity(size)));
        Ok(())
    }

    fn polygon_end(&mut self, _tagged: bool, _idx: usize) -> Result<()> {
        let Frame::Polygon(rings) = self.pop("polygon")? else {
            return Err(mismatch("polygon"));
        };
        match self.stack.last_mut() {
            Some(Frame::MultiPolygon(polygons)) => {
                polygons.push(rings);
                Ok(())
            }
            _ => self.emit(Shape::Polygon(rings)),
        }
    }

    fn multipolygon_begin(&mut self, size: usize, _idx: usize) -> Result<()> {
        self.stack
            .push(Frame::MultiPolygon(Vec::with_capacity(size)));
        Ok(())
    }

    fn multipolygon_end(&mut self, _idx: usize) -> Result<()> {
        let Frame::MultiPolygon(polygons) = self.pop("multipolygon")? else {
            return Err(mismatch("multipolygon"));
        };
        self.emit(Shape::MultiPolygon(polygons))
    }

    fn geometrycollection_begin(&mut self, size: usize, _idx: usize) -> Result<()> {
        self.stack.push(Frame::Collection(Vec::with_capacity(size)));
        Ok(())
    }

    fn geometrycollection_end(&mut self, _idx: usize) -> Result<()> {
        let Frame::Collection(items) = self.pop("geometrycollection")? else {
            return Err(mismatch("geometrycollection"));
        };
        self.emit(Shape::GeometryCollection(items))
    }
}
