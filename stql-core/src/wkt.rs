//! EWKT reading and (E)WKT formatting.
//!
//! The reader accepts both PostGIS EWKT (`SRID=4326;POINTM(1 2 3)`) and
//! ISO WKT (`POINT ZM (1 2 3 4)`). Untagged coordinates with three or four
//! ordinates are read as Z and ZM, matching how PostGIS parses them.
//!
//! Both writers run geozero's `WktWriter` and then add the dimension tags
//! it leaves out: [`Geometry::to_wkt`] follows `ST_AsText` (ISO tags, no
//! SRID) and [`Geometry::to_ewkt`] follows `ST_AsEWKT`.

use std::fmt;
use std::str::FromStr;

use geozero::wkt::{Wkt, WktDialect};
use geozero::{CoordDimensions, GeozeroGeometry, ToWkt};

use crate::builder::ShapeBuilder;
use crate::error::{Result, StqlError};
use crate::geometry::{Dimensions, Geometry};

const KEYWORDS: &[&str] = &[
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

/// Parse EWKT or WKT text into a [`Geometry`].
///
/// ```
/// use stql_core::wkt::parse_ewkt;
/// use stql_core::Dimensions;
///
/// let g = parse_ewkt("SRID=4326;POINTM(1 2 3)").unwrap();
/// assert_eq!(g.srid(), Some(4326));
/// assert_eq!(g.dims(), Dimensions::XYM);
/// ```
pub fn parse_ewkt(text: &str) -> Result<Geometry> {
    let (srid, body) = split_srid(text.trim())?;
    let normalized = normalize_tags(body);

    let mut builder = ShapeBuilder::default();
    Wkt(normalized.as_bytes())
        .process_geom(&mut builder)
        .map_err(|e| StqlError::InvalidEwkt(format!("{e} in {body:?}")))?;
    let built = builder.finish()?;
    let dims = built.dims.unwrap_or_else(|| declared_dims(&normalized));
    Ok(Geometry::from_parts(built.shape, dims, srid))
}

fn split_srid(text: &str) -> Result<(Option<i32>, &str)> {
    let has_prefix = text
        .get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("SRID="));
    if !has_prefix {
        return Ok((None, text));
    }
    let (number, body) = text[5..]
        .split_once(';')
        .ok_or_else(|| StqlError::InvalidEwkt("SRID prefix without ';'".into()))?;
    let srid = number
        .trim()
        .parse::<i32>()
        .map_err(|_| StqlError::InvalidEwkt(format!("invalid SRID {number:?}")))?;
    Ok((Some(srid), body.trim_start()))
}

/// Ordinate count of the first coordinate tuple, if any.
fn first_tuple_width(text: &str) -> Option<usize> {
    let start = text.find(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))?;
    let rest = &text[start..];
    let end = rest.find([',', ')']).unwrap_or(rest.len());
    Some(rest[..end].split_whitespace().count())
}

/// True when a PostGIS-style `M` suffix (`POINTM`) appears anywhere.
fn has_m_suffix(upper: &str) -> bool {
    KEYWORDS.iter().any(|k| {
        upper.match_indices(k).any(|(i, _)| {
            let tail = &upper[i + k.len()..];
            tail.starts_with('M') && !tail.starts_with("MULTI")
        })
    })
}

/// Rewrite every type keyword so it carries an explicit ISO dimension tag.
///
/// `POINTM(..)` becomes `POINT M (..)`; untagged keywords get the tag
/// implied by the width of the first coordinate tuple.
fn normalize_tags(text: &str) -> String {
    let measured = has_m_suffix(&text.to_ascii_uppercase());
    let implied = match first_tuple_width(text) {
        Some(3) if measured => Some("M"),
        Some(3) => Some("Z"),
        Some(4) => Some("ZM"),
        _ => None,
    };

    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;
    while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic()) {
        out.push_str(&rest[..start]);
        let word_len = rest[start..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len() - start);
        let word = rest[start..start + word_len].to_ascii_uppercase();
        rest = &rest[start + word_len..];

        if KEYWORDS.contains(&word.as_str()) {
            out.push_str(&word);
            let after = rest.trim_start();
            let next_len = after
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(after.len());
            let next = after[..next_len].to_ascii_uppercase();
            if matches!(next.as_str(), "Z" | "M" | "ZM") {
                out.push(' ');
                out.push_str(&next);
                rest = &after[next_len..];
            } else if let Some(tag) = implied {
                out.push(' ');
                out.push_str(tag);
            }
        } else if let Some(stem) = word
            .strip_suffix('M')
            .filter(|stem| KEYWORDS.contains(stem))
        {
            out.push_str(stem);
            out.push_str(" M");
        } else {
            out.push_str(&word);
        }
    }
    out.push_str(rest);
    out
}

/// Dimensions named by the first tag of normalized text, for empty inputs.
fn declared_dims(normalized: &str) -> Dimensions {
    let tag = normalized
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .trim_end_matches('(');
    match tag {
        "Z" => Dimensions::XYZ,
        "M" => Dimensions::XYM,
        "ZM" => Dimensions::XYZM,
        _ => Dimensions::XY,
    }
}

// ── writers ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum Flavor {
    /// `POINT Z (1 2 3)`
    Iso,
    /// `POINTM(1 2 3)`
    Ewkt,
}

/// Add PostGIS dimension tags to geozero's untagged WKT.
///
/// geozero writes `POINT(1 2 3)` for both XYZ and XYM, and an empty point
/// as `POINT(EMPTY)`. Every type keyword gets the tag for `dims`, and the
/// empty point collapses to `POINT EMPTY`.
fn tag_dimensions(body: &str, dims: Dimensions, flavor: Flavor) -> String {
    let tag = match (flavor, dims.has_z, dims.has_m) {
        (Flavor::Iso, true, true) => " ZM",
        (Flavor::Iso, true, false) => " Z",
        (Flavor::Iso, false, true) => " M",
        (Flavor::Ewkt, false, true) => "M",
        _ => "",
    };

    let mut out = String::with_capacity(body.len() + 16);
    let mut rest = body;
    while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic()) {
        out.push_str(&rest[..start]);
        let len = rest[start..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len() - start);
        let word = &rest[start..start + len];
        rest = &rest[start + len..];
        out.push_str(word);
        if !KEYWORDS.contains(&word) {
            continue;
        }

        out.push_str(tag);
        if let Some(after) = rest.strip_prefix("(EMPTY)") {
            out.push_str(" EMPTY");
            rest = after;
        } else if flavor == Flavor::Iso && !tag.is_empty() && rest.starts_with('(') {
            out.push(' ');
        }
    }
    out.push_str(rest);
    out
}

impl Geometry {
    /// ISO WKT without SRID, as `ST_AsText` prints it.
    ///
    /// Ordinates use Rust's shortest round-trip decimal form, so large or
    /// tiny values are spelled out (`100000000000000000000`) where PostGIS
    /// prints `1e+20`. Both forms parse back to the same value.
    ///
    /// ```
    /// let g: stql_core::Geometry = "SRID=4326;POINT(-70.01 42.37)".parse().unwrap();
    /// assert_eq!(g.to_wkt().unwrap(), "POINT(-70.01 42.37)");
    /// ```
    pub fn to_wkt(&self) -> Result<String> {
        let body = self.to_wkt_with_opts(WktDialect::Wkt, CoordDimensions::xyzm(), None)?;
        Ok(tag_dimensions(&body, self.dims(), Flavor::Iso))
    }

    /// PostGIS EWKT, as `ST_AsEWKT` prints it.
    pub fn to_ewkt(&self) -> Result<String> {
        let body =
            self.to_wkt_with_opts(WktDialect::Ewkt, CoordDimensions::xyzm(), self.srid())?;
        Ok(tag_dimensions(&body, self.dims(), Flavor::Ewkt))
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ewkt().map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Geometry {
    type Err = StqlError;

    fn from_str(s: &str) -> Result<Self> {
        parse_ewkt(s)
    }
}
