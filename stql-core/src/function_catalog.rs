//! Canonical PostGIS function catalogue shared by the Diesel bindings and
//! tooling.
//!
//! One entry per Rust binding. Overloads of the same SQL function are
//! separate entries distinguished by their parameter list.

use crate::error::{Result, StqlError};
use crate::geometry::Geometry;

/// SQL-level kind of a binding parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// `geometry` expression.
    Geometry,
    /// `text` holding WKT/EWKT, passed through `ST_GeomFromEWKT`.
    Ewkt,
    Double,
    Integer,
    Text,
}

/// SQL-level kind of a binding result. Every result is nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    Geometry,
    Bool,
    Integer,
    Double,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionFamily {
    Io,
    Constructor,
    Accessor,
    Processing,
    Editor,
    Affine,
    Validation,
}

/// Canonical declaration of one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Rust binding name, unique across the catalogue.
    pub method: &'static str,
    /// Function name emitted in SQL.
    pub sql_name: &'static str,
    pub params: &'static [ArgKind],
    pub returns: ReturnKind,
    pub family: FunctionFamily,
    /// Only PostGIS can evaluate this entry.
    pub server_side_only: bool,
}

impl FunctionSpec {
    /// Argument count as rendered in SQL. Text overloads count the wrapped
    /// WKT argument once.
    pub const fn n_arg(&self) -> usize {
        self.params.len()
    }

    /// Fail with [`StqlError::NotDirectlyInvocable`] unless this entry can be
    /// evaluated without a database.
    pub fn ensure_client_evaluable(&self) -> Result<()> {
        if self.server_side_only {
            return Err(StqlError::NotDirectlyInvocable {
                function: self.method,
            });
        }
        Ok(())
    }

    /// Evaluate a client-evaluable text I/O entry over string arguments.
    ///
    /// Geometry arguments are EWKT. Geometry results come back as EWKT.
    ///
    /// ```
    /// use stql_core::function_catalog::lookup;
    ///
    /// let as_text = lookup("st_astext").unwrap();
    /// assert_eq!(as_text.evaluate_text(&["SRID=4326;POINT(1 2)"]).unwrap(), "POINT(1 2)");
    ///
    /// let rotate = lookup("st_rotate").unwrap();
    /// assert!(rotate.evaluate_text(&["POINT(1 2)", "1.0"]).is_err());
    /// ```
    pub fn evaluate_text(&self, args: &[&str]) -> Result<String> {
        self.ensure_client_evaluable()?;
        if args.len() != self.n_arg() {
            return Err(StqlError::InvalidInput(format!(
                "{} expects {} argument(s), got {}",
                self.method,
                self.n_arg(),
                args.len()
            )));
        }
        let geom: Geometry = args[0].parse()?;
        match (self.method, self.returns) {
            ("st_geomfromtext_srid", _) => {
                let srid = args[1].trim().parse::<i32>().map_err(|_| {
                    StqlError::InvalidInput(format!("invalid SRID {:?}", args[1]))
                })?;
                geom.with_srid(Some(srid)).to_ewkt()
            }
            ("st_astext", _) => geom.to_wkt(),
            (_, ReturnKind::Geometry) | ("st_asewkt", _) => geom.to_ewkt(),
            _ => Err(StqlError::NotDirectlyInvocable {
                function: self.method,
            }),
        }
    }
}

use ArgKind::{Double as D, Ewkt as E, Geometry as G, Integer as I, Text as T};

const fn server(
    method: &'static str,
    sql_name: &'static str,
    params: &'static [ArgKind],
    returns: ReturnKind,
    family: FunctionFamily,
) -> FunctionSpec {
    FunctionSpec {
        method,
        sql_name,
        params,
        returns,
        family,
        server_side_only: true,
    }
}

const fn text_io(
    method: &'static str,
    sql_name: &'static str,
    params: &'static [ArgKind],
    returns: ReturnKind,
) -> FunctionSpec {
    FunctionSpec {
        method,
        sql_name,
        params,
        returns,
        family: FunctionFamily::Io,
        server_side_only: false,
    }
}

const fn editor(method: &'static str, sql_name: &'static str, params: &'static [ArgKind]) -> FunctionSpec {
    server(method, sql_name, params, ReturnKind::Geometry, FunctionFamily::Editor)
}

const fn affine(method: &'static str, sql_name: &'static str, params: &'static [ArgKind]) -> FunctionSpec {
    server(method, sql_name, params, ReturnKind::Geometry, FunctionFamily::Affine)
}

const fn accessor(
    method: &'static str,
    sql_name: &'static str,
    params: &'static [ArgKind],
    returns: ReturnKind,
) -> FunctionSpec {
    server(method, sql_name, params, returns, FunctionFamily::Accessor)
}

const fn processing(method: &'static str, sql_name: &'static str, params: &'static [ArgKind]) -> FunctionSpec {
    server(method, sql_name, params, ReturnKind::Geometry, FunctionFamily::Processing)
}

pub const CATALOG: &[FunctionSpec] = &[
    // I/O
    text_io("st_geomfromtext", "ST_GeomFromText", &[T], ReturnKind::Geometry),
    text_io("st_geomfromtext_srid", "ST_GeomFromText", &[T, I], ReturnKind::Geometry),
    text_io("st_geomfromewkt", "ST_GeomFromEWKT", &[T], ReturnKind::Geometry),
    text_io("st_astext", "ST_AsText", &[G], ReturnKind::Text),
    text_io("st_asewkt", "ST_AsEWKT", &[G], ReturnKind::Text),
    // Constructors
    server("st_makepoint", "ST_MakePoint", &[D, D], ReturnKind::Geometry, FunctionFamily::Constructor),
    server("st_makepoint_xyz", "ST_MakePoint", &[D, D, D], ReturnKind::Geometry, FunctionFamily::Constructor),
    server("st_makepoint_xyzm", "ST_MakePoint", &[D, D, D, D], ReturnKind::Geometry, FunctionFamily::Constructor),
    // Accessors
    accessor("geometry_type", "GeometryType", &[G], ReturnKind::Text),
    accessor("st_boundary", "ST_Boundary", &[G], ReturnKind::Geometry),
    accessor("st_dimension", "ST_Dimension", &[G], ReturnKind::Integer),
    accessor("st_endpoint", "ST_EndPoint", &[G], ReturnKind::Geometry),
    accessor("st_envelope", "ST_Envelope", &[G], ReturnKind::Geometry),
    accessor("st_isempty", "ST_IsEmpty", &[G], ReturnKind::Bool),
    accessor("st_numgeometries", "ST_NumGeometries", &[G], ReturnKind::Integer),
    accessor("st_numpoints", "ST_NumPoints", &[G], ReturnKind::Integer),
    accessor("st_x", "ST_X", &[G], ReturnKind::Double),
    accessor("st_y", "ST_Y", &[G], ReturnKind::Double),
    accessor("st_z", "ST_Z", &[G], ReturnKind::Double),
    accessor("st_m", "ST_M", &[G], ReturnKind::Double),
    // Processing
    processing("st_centroid", "ST_Centroid", &[G]),
    processing("st_convexhull", "ST_ConvexHull", &[G]),
    processing("st_difference", "ST_Difference", &[G, G]),
    processing("st_union", "ST_Union", &[G, G]),
    // Editors
    editor("st_addpoint", "ST_AddPoint", &[G, G]),
    editor("st_addpoint_at", "ST_AddPoint", &[G, G, I]),
    editor("st_collectionextract", "ST_CollectionExtract", &[G, I]),
    editor("st_collectionhomogenize", "ST_CollectionHomogenize", &[G]),
    editor("st_force2d", "ST_Force2D", &[G]),
    editor("st_force3d", "ST_Force3D", &[G]),
    editor("st_force3dz", "ST_Force3DZ", &[G]),
    editor("st_force3dm", "ST_Force3DM", &[G]),
    editor("st_force4d", "ST_Force4D", &[G]),
    editor("st_forcepolygonccw", "ST_ForcePolygonCCW", &[G]),
    editor("st_forcecollection", "ST_ForceCollection", &[G]),
    editor("st_forcepolygoncw", "ST_ForcePolygonCW", &[G]),
    editor("st_forcesfs", "ST_ForceSFS", &[G]),
    editor("st_forcesfs_version", "ST_ForceSFS", &[G, T]),
    editor("st_forcesfs_text", "ST_ForceSFS", &[E]),
    editor("st_forcerhr", "ST_ForceRHR", &[G]),
    editor("st_forcecurve", "ST_ForceCurve", &[G]),
    editor("st_linemerge", "ST_LineMerge", &[G]),
    editor("st_multi", "ST_Multi", &[G]),
    editor("st_normalize", "ST_Normalize", &[G]),
    editor("st_quantizecoordinates", "ST_QuantizeCoordinates", &[G, I]),
    editor("st_quantizecoordinates_xyzm", "ST_QuantizeCoordinates", &[G, I, I, I, I]),
    editor("st_removepoint", "ST_RemovePoint", &[G, I]),
    editor("st_reverse", "ST_Reverse", &[G]),
    editor("st_segmentize", "ST_Segmentize", &[G, D]),
    editor("st_segmentize_text", "ST_Segmentize", &[E, D]),
    editor("st_setpoint", "ST_SetPoint", &[G, I, G]),
    editor("st_snaptogrid", "ST_SnapToGrid", &[G, D]),
    editor("st_snaptogrid_xy", "ST_SnapToGrid", &[G, D, D]),
    editor("st_snaptogrid_origin", "ST_SnapToGrid", &[G, D, D, D, D]),
    editor("st_snaptogrid_point", "ST_SnapToGrid", &[G, G, D, D, D, D]),
    editor("st_snap", "ST_Snap", &[G, G, D]),
    editor("st_swapordinates", "ST_SwapOrdinates", &[G, T]),
    editor("st_swapordinates_text", "ST_SwapOrdinates", &[E, T]),
    // Affine transforms
    affine("st_affine", "ST_Affine", &[G, D, D, D, D, D, D, D, D, D, D, D, D]),
    affine("st_affine_text", "ST_Affine", &[E, D, D, D, D, D, D, D, D, D, D, D, D]),
    affine("st_affine_2d", "ST_Affine", &[G, D, D, D, D, D, D]),
    affine("st_affine_2d_text", "ST_Affine", &[E, D, D, D, D, D, D]),
    affine("st_rotate", "ST_Rotate", &[G, D]),
    affine("st_rotate_text", "ST_Rotate", &[E, D]),
    affine("st_rotate_xy", "ST_Rotate", &[G, D, D, D]),
    affine("st_rotate_xy_text", "ST_Rotate", &[E, D, D, D]),
    affine("st_rotate_origin", "ST_Rotate", &[G, D, G]),
    affine("st_rotate_origin_text", "ST_Rotate", &[E, D, G]),
    affine("st_rotatex", "ST_RotateX", &[G, D]),
    affine("st_rotatex_text", "ST_RotateX", &[E, D]),
    affine("st_rotatey", "ST_RotateY", &[G, D]),
    affine("st_rotatey_text", "ST_RotateY", &[E, D]),
    affine("st_rotatez", "ST_RotateZ", &[G, D]),
    affine("st_rotatez_text", "ST_RotateZ", &[E, D]),
    affine("st_scale", "ST_Scale", &[G, D, D]),
    affine("st_scale_text", "ST_Scale", &[E, D, D]),
    affine("st_scale_xyz", "ST_Scale", &[G, D, D, D]),
    affine("st_scale_xyz_text", "ST_Scale", &[E, D, D, D]),
    affine("st_scale_factor", "ST_Scale", &[G, G]),
    affine("st_scale_factor_text", "ST_Scale", &[E, G]),
    affine("st_scale_origin", "ST_Scale", &[G, G, G]),
    affine("st_scale_origin_text", "ST_Scale", &[E, G, G]),
    affine("st_translate", "ST_Translate", &[G, D, D]),
    affine("st_translate_text", "ST_Translate", &[E, D, D]),
    affine("st_translate_xyz", "ST_Translate", &[G, D, D, D]),
    affine("st_translate_xyz_text", "ST_Translate", &[E, D, D, D]),
    affine("st_transscale", "ST_TransScale", &[G, D, D, D, D]),
    affine("st_transscale_text", "ST_TransScale", &[E, D, D, D, D]),
    // Validation
    server("st_isvalid", "ST_IsValid", &[G], ReturnKind::Bool, FunctionFamily::Validation),
    server("st_isvalid_flags", "ST_IsValid", &[G, I], ReturnKind::Bool, FunctionFamily::Validation),
    server("st_isvalidreason", "ST_IsValidReason", &[G], ReturnKind::Text, FunctionFamily::Validation),
    server("st_isvalidreason_flags", "ST_IsValidReason", &[G, I], ReturnKind::Text, FunctionFamily::Validation),
];

/// Find the entry for a Rust binding name.
pub fn lookup(method: &str) -> Option<&'static FunctionSpec> {
    CATALOG.iter().find(|f| f.method == method)
}

/// Find the overload of `sql_name` (case-insensitive) taking `params`.
///
/// ```
/// use stql_core::function_catalog::resolve;
/// use stql_core::ArgKind::{Double, Geometry};
///
/// let spec = resolve("st_scale", &[Geometry, Double, Double, Double]).unwrap();
/// assert_eq!(spec.method, "st_scale_xyz");
/// assert!(resolve("ST_Scale", &[Geometry]).is_err());
/// ```
pub fn resolve(sql_name: &str, params: &[ArgKind]) -> Result<&'static FunctionSpec> {
    let found = CATALOG
        .iter()
        .find(|f| f.sql_name.eq_ignore_ascii_case(sql_name) && f.params == params);
    found.ok_or_else(|| {
        tracing::debug!(sql_name, n_arg = params.len(), "no catalogue overload");
        StqlError::UnknownFunction {
            name: sql_name.to_string(),
            n_arg: params.len(),
        }
    })
}

/// All overloads sharing one SQL name, in catalogue order.
pub fn overloads(sql_name: &str) -> impl Iterator<Item = &'static FunctionSpec> + '_ {
    CATALOG
        .iter()
        .filter(move |f| f.sql_name.eq_ignore_ascii_case(sql_name))
}

pub fn family(family: FunctionFamily) -> impl Iterator<Item = &'static FunctionSpec> {
    CATALOG.iter().filter(move |f| f.family == family)
}
