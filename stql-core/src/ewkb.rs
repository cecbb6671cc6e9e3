//! EWKB (Extended Well-Known Binary) codec for the PostGIS wire format.
//!
//! Wire format:
//!   [0x01|0x00]   byte order marker (little-endian or big-endian)
//!   [u32]         geometry type with flags (in the declared byte order)
//!                 Bit 29 (0x20000000): SRID present
//!                 Bit 31 (0x80000000): Z dimension
//!                 Bit 30 (0x40000000): M dimension
//!                 Bits 0–28: geometry type (1=Point, 2=LineString, …)
//!   [i32]         SRID (only when SRID flag set, in declared byte order)
//!   …             geometry payload; nested members carry their own header
//!
//! ISO type codes (1001 = Point Z, 2001 = Point M, 3001 = Point ZM) are
//! accepted on read. Writing goes through geozero's `WkbWriter`, which always
//! emits little-endian EWKB; that is what `geometry_recv` expects.

use geozero::wkb::Ewkb;
use geozero::{GeozeroGeometry, ToWkb};

use crate::builder::ShapeBuilder;
use crate::error::{Result, StqlError};
use crate::geometry::{Dimensions, Geometry, Shape};

// ── EWKB flag constants ───────────────────────────────────────────────────────
pub const EWKB_SRID_FLAG: u32 = 0x20000000;
pub const EWKB_Z_FLAG: u32 = 0x80000000;
pub const EWKB_M_FLAG: u32 = 0x40000000;

// ── Geometry type codes ───────────────────────────────────────────────────────
pub const WKB_POINT: u32 = 1;
pub const WKB_LINESTRING: u32 = 2;
pub const WKB_POLYGON: u32 = 3;
pub const WKB_MULTIPOINT: u32 = 4;
pub const WKB_MULTILINESTRING: u32 = 5;
pub const WKB_MULTIPOLYGON: u32 = 6;
pub const WKB_GEOMETRYCOLLECTION: u32 = 7;

/// Parsed EWKB header metadata.
#[derive(Debug, Clone)]
pub struct EwkbHeader {
    /// Base geometry type code (1=Point, 2=LineString, ..., 7=GeometryCollection).
    pub geom_type: u32,
    /// SRID embedded in the EWKB, if the SRID flag is set.
    pub srid: Option<i32>,
    pub has_z: bool,
    pub has_m: bool,
    /// Byte offset where the geometry payload starts (after header + optional SRID).
    pub data_offset: usize,
    pub little_endian: bool,
}

impl EwkbHeader {
    pub fn dims(&self) -> Dimensions {
        Dimensions {
            has_z: self.has_z,
            has_m: self.has_m,
        }
    }
}

/// Peek at the EWKB header without parsing the payload.
///
/// ```
/// use stql_core::ewkb::{parse_ewkb_header, EWKB_SRID_FLAG, EWKB_Z_FLAG, WKB_POINT};
///
/// let mut blob = vec![0x01];
/// blob.extend_from_slice(&(WKB_POINT | EWKB_Z_FLAG | EWKB_SRID_FLAG).to_le_bytes());
/// blob.extend_from_slice(&4326i32.to_le_bytes());
/// let hdr = parse_ewkb_header(&blob).unwrap();
/// assert_eq!(hdr.geom_type, WKB_POINT);
/// assert_eq!(hdr.srid, Some(4326));
/// assert!(hdr.has_z && !hdr.has_m);
/// ```
pub fn parse_ewkb_header(blob: &[u8]) -> Result<EwkbHeader> {
    if blob.len() < 5 {
        return Err(StqlError::InvalidEwkb("blob too short"));
    }

    let little_endian = match blob[0] {
        0x01 => true,
        0x00 => false,
        _ => return Err(StqlError::InvalidEwkb("invalid byte order marker")),
    };

    let read_u32 = |bytes: [u8; 4]| {
        if little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        }
    };
    let read_i32 = |bytes: [u8; 4]| {
        if little_endian {
            i32::from_le_bytes(bytes)
        } else {
            i32::from_be_bytes(bytes)
        }
    };

    let raw_type = read_u32([blob[1], blob[2], blob[3], blob[4]]);
    let has_srid = (raw_type & EWKB_SRID_FLAG) != 0;
    let code = raw_type & 0x1FFFFFFF;
    let (iso_z, iso_m) = match code / 1000 {
        1 => (true, false),
        2 => (false, true),
        3 => (true, true),
        _ => (false, false),
    };
    let has_z = (raw_type & EWKB_Z_FLAG) != 0 || iso_z;
    let has_m = (raw_type & EWKB_M_FLAG) != 0 || iso_m;
    let geom_type = code % 1000;

    let mut offset = 5usize;
    let srid = if has_srid {
        if blob.len() < 9 {
            return Err(StqlError::InvalidEwkb("SRID flag set but blob too short"));
        }
        let s = read_i32([blob[5], blob[6], blob[7], blob[8]]);
        offset += 4;
        Some(s)
    } else {
        None
    };

    Ok(EwkbHeader {
        geom_type,
        srid,
        has_z,
        has_m,
        data_offset: offset,
        little_endian,
    })
}

/// Extract only the SRID from an EWKB blob (cheap, no geometry parsing).
pub fn extract_srid(blob: &[u8]) -> Option<i32> {
    parse_ewkb_header(blob).ok().and_then(|h| h.srid)
}

/// Decode an EWKB blob, keeping Z, M and SRID.
///
/// ```
/// use stql_core::ewkb::{parse_ewkb, write_ewkb};
/// use stql_core::{Coord, Geometry, Shape};
///
/// let point = Geometry::new(Shape::Point(Some(Coord::xyzm(1.0, 2.0, 3.0, 4.0))))
///     .with_srid(Some(4326));
/// let blob = write_ewkb(&point).unwrap();
/// assert_eq!(parse_ewkb(&blob).unwrap(), point);
/// ```
pub fn parse_ewkb(blob: &[u8]) -> Result<Geometry> {
    let header = parse_ewkb_header(blob)?;
    if header.geom_type == WKB_POINT && point_payload_is_nan(blob, &header)? {
        return Ok(Geometry::from_parts(
            Shape::Point(None),
            header.dims(),
            header.srid,
        ));
    }

    let mut builder = ShapeBuilder::default();
    Ewkb(blob).process_geom(&mut builder)?;
    let built = builder.finish()?;
    Ok(Geometry::from_parts(
        built.shape,
        header.dims(),
        header.srid.or(built.srid),
    ))
}

fn point_payload_is_nan(blob: &[u8], header: &EwkbHeader) -> Result<bool> {
    let needed = header.data_offset + 8 * usize::from(header.dims().coord_dim());
    if blob.len() < needed {
        return Err(StqlError::InvalidEwkb("point payload truncated"));
    }

    let read = |at: usize| {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&blob[at..at + 8]);
        if header.little_endian {
            f64::from_le_bytes(bytes)
        } else {
            f64::from_be_bytes(bytes)
        }
    };
    let x = read(header.data_offset);
    let y = read(header.data_offset + 8);
    Ok(x.is_nan() && y.is_nan())
}

/// Encode a geometry as little-endian EWKB through geozero's writer.
///
/// Every vertex must carry the ordinates declared by [`Geometry::dims`];
/// a missing Z or M is an error rather than a silent zero.
pub fn write_ewkb(geom: &Geometry) -> Result<Vec<u8>> {
    check_layout(geom)?;
    Ok(geom.to_ewkb(geom.dims().into(), geom.srid())?)
}

fn check_layout(geom: &Geometry) -> Result<()> {
    let dims = geom.dims();
    let mut missing = None;
    geom.shape().for_each_coord(&mut |c| {
        if dims.has_z && c.z.is_none() {
            missing.get_or_insert("Z");
        }
        if dims.has_m && c.m.is_none() {
            missing.get_or_insert("M");
        }
    });
    match missing {
        Some(axis) => Err(StqlError::InvalidInput(format!(
            "vertex is missing its {axis} ordinate"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn le_point(type_word: u32, ordinates: &[f64]) -> Vec<u8> {
        let mut blob = vec![0x01];
        blob.extend_from_slice(&type_word.to_le_bytes());
        for v in ordinates {
            blob.extend_from_slice(&v.to_le_bytes());
        }
        blob
    }

    #[test]
    fn header_blob_too_short() {
        assert!(parse_ewkb_header(&[0x01, 0x02]).is_err());
        assert!(parse_ewkb_header(&[]).is_err());
    }

    #[test]
    fn header_big_endian_point_with_srid() {
        let mut blob = vec![0x00];
        let typ = WKB_POINT | EWKB_SRID_FLAG;
        blob.extend_from_slice(&typ.to_be_bytes());
        blob.extend_from_slice(&4326i32.to_be_bytes());
        blob.extend_from_slice(&1.0f64.to_be_bytes());
        blob.extend_from_slice(&2.0f64.to_be_bytes());

        let hdr = parse_ewkb_header(&blob).unwrap();
        assert_eq!(hdr.geom_type, WKB_POINT);
        assert_eq!(hdr.srid, Some(4326));
        assert_eq!(hdr.data_offset, 9);
        assert!(!hdr.little_endian);
    }

    #[test]
    fn header_invalid_byte_order_marker() {
        assert!(parse_ewkb_header(&[0x02, 0x01, 0x00, 0x00, 0x00]).is_err());
    }

    #[test]
    fn header_srid_flag_but_truncated() {
        let blob = le_point(WKB_POINT | EWKB_SRID_FLAG, &[]);
        assert!(parse_ewkb_header(&blob).is_err());
    }

    #[test]
    fn header_reads_iso_dimension_codes() {
        let hdr = parse_ewkb_header(&le_point(3001, &[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(hdr.geom_type, WKB_POINT);
        assert!(hdr.has_z && hdr.has_m);

        let hdr = parse_ewkb_header(&le_point(2002, &[])).unwrap();
        assert_eq!(hdr.geom_type, WKB_LINESTRING);
        assert!(!hdr.has_z && hdr.has_m);
    }

    #[test]
    fn extract_srid_malformed_blob() {
        assert_eq!(extract_srid(&[]), None);
        assert_eq!(extract_srid(&[0xFF, 0xFF]), None);
    }

    #[test]
    fn parse_zm_point_keeps_all_ordinates() {
        let blob = le_point(
            WKB_POINT | EWKB_Z_FLAG | EWKB_M_FLAG,
            &[1.0, 2.0, 3.0, 4.0],
        );
        let geom = parse_ewkb(&blob).unwrap();
        assert_eq!(geom.dims(), Dimensions::XYZM);
        assert_eq!(
            geom.as_point().unwrap(),
            Some(Coord::xyzm(1.0, 2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn parse_big_endian_point() {
        let mut blob = vec![0x00];
        let typ = WKB_POINT | EWKB_SRID_FLAG;
        blob.extend_from_slice(&typ.to_be_bytes());
        blob.extend_from_slice(&4326i32.to_be_bytes());
        blob.extend_from_slice(&10.0f64.to_be_bytes());
        blob.extend_from_slice(&(-20.0f64).to_be_bytes());

        let geom = parse_ewkb(&blob).unwrap();
        assert_eq!(geom.srid(), Some(4326));
        assert_eq!(geom.as_point().unwrap(), Some(Coord::xy(10.0, -20.0)));
    }

    #[test]
    fn empty_point_roundtrip() {
        let empty =
            Geometry::from_parts(Shape::Point(None), Dimensions::XYZ, Some(4326));
        let blob = write_ewkb(&empty).unwrap();
        // byte order(1) + type(4) + srid(4) + 3 NaN ordinates
        assert_eq!(blob.len(), 33);
        let parsed = parse_ewkb(&blob).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.dims(), Dimensions::XYZ);
        assert_eq!(parsed.srid(), Some(4326));
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        let truncated = le_point(WKB_POINT, &[1.0]);
        assert!(parse_ewkb(&truncated).is_err());

        let mut malformed = vec![0x01];
        malformed.extend_from_slice(&WKB_LINESTRING.to_le_bytes());
        malformed.extend_from_slice(&1u32.to_le_bytes());
        assert!(parse_ewkb(&malformed).is_err());
    }

    #[test]
    fn write_xy_point_sizes() {
        let p = Geometry::new(Shape::Point(Some(Coord::xy(1.0, 2.0))));
        assert_eq!(write_ewkb(&p).unwrap().len(), 21);
        let with_srid = p.with_srid(Some(4326));
        let blob = write_ewkb(&with_srid).unwrap();
        assert_eq!(blob.len(), 25);
        assert_eq!(extract_srid(&blob), Some(4326));
    }

    #[test]
    fn write_rejects_vertex_missing_declared_z() {
        let bad = Geometry::from_parts(
            Shape::LineString(vec![Coord::xyz(0.0, 0.0, 1.0), Coord::xy(1.0, 1.0)]),
            Dimensions::XYZ,
            None,
        );
        let err = write_ewkb(&bad).unwrap_err();
        assert!(format!("{err}").contains("Z ordinate"));
    }

    #[test]
    fn nested_collection_roundtrip_keeps_measures() {
        let gc = Geometry::new(Shape::GeometryCollection(vec![
            Shape::Point(Some(Coord::xym(1.0, 2.0, 9.0))),
            Shape::MultiLineString(vec![
                vec![Coord::xym(0.0, 0.0, 1.0), Coord::xym(1.0, 1.0, 2.0)],
                vec![Coord::xym(2.0, 2.0, 3.0), Coord::xym(3.0, 3.0, 4.0)],
            ]),
            Shape::MultiPolygon(vec![vec![vec![
                Coord::xym(0.0, 0.0, 0.0),
                Coord::xym(1.0, 0.0, 0.0),
                Coord::xym(1.0, 1.0, 0.0),
                Coord::xym(0.0, 0.0, 0.0),
            ]]]),
        ]))
        .with_srid(Some(3857));
        let parsed = parse_ewkb(&write_ewkb(&gc).unwrap()).unwrap();
        assert_eq!(parsed, gc);
        assert_eq!(parsed.geometry_type(), "GEOMETRYCOLLECTIONM");
    }

    #[test]
    fn multipoint_roundtrip() {
        let mp = Geometry::new(Shape::MultiPoint(vec![
            Some(Coord::xyz(1.0, 2.0, 3.0)),
            Some(Coord::xyz(-2.0, 3.0, 0.5)),
        ]));
        assert_eq!(parse_ewkb(&write_ewkb(&mp).unwrap()).unwrap(), mp);
    }

    #[test]
    fn multipoint_keeps_empty_members() {
        // MULTIPOINT(EMPTY,1 2): each member is a point header then x and y.
        let mut blob = vec![0x01];
        blob.extend_from_slice(&WKB_MULTIPOINT.to_le_bytes());
        blob.extend_from_slice(&2u32.to_le_bytes());
        blob.extend_from_slice(&le_point(WKB_POINT, &[f64::NAN, f64::NAN]));
        blob.extend_from_slice(&le_point(WKB_POINT, &[1.0, 2.0]));

        let mp = parse_ewkb(&blob).unwrap();
        assert_eq!(mp.num_geometries(), 2);
        assert_eq!(mp.num_points(), 1);
        assert_eq!(
            mp.shape(),
            &Shape::MultiPoint(vec![None, Some(Coord::xy(1.0, 2.0))])
        );

        let written = write_ewkb(&mp).unwrap();
        assert_eq!(written.len(), blob.len());
        assert_eq!(parse_ewkb(&written).unwrap(), mp);
        assert_eq!(mp.to_ewkt().unwrap(), "MULTIPOINT(EMPTY,1 2)");
    }

    #[test]
    fn geozero_writer_matches_postgis_bytes() {
        // SELECT 'SRID=4326;MULTIPOINT(10 -20 100, 0 -0.5 101)'::geometry
        let hex = "01040000A0E6100000020000000101000080000000000000244000000000000034C0\
                   000000000000594001010000800000000000000000000000000000E0BF0000000000405940";
        let expected: Vec<u8> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect();
        let mp: Geometry = "SRID=4326;MULTIPOINT(10 -20 100,0 -0.5 101)".parse().unwrap();
        assert_eq!(write_ewkb(&mp).unwrap(), expected);
    }
}
