use thiserror::Error;

#[derive(Debug, Error)]
pub enum StqlError {
    #[error("invalid EWKB: {0}")]
    InvalidEwkb(&'static str),

    #[error("invalid EWKT: {0}")]
    InvalidEwkt(String),

    #[error("geozero error: {0}")]
    Geozero(#[from] geozero::error::GeozeroError),

    #[error("geometry is not a {0}")]
    WrongType(&'static str),

    #[error("vertex index out of bounds: {index} (len {len})")]
    OutOfBounds { index: usize, len: usize },

    #[error("unknown ordinate name: {0:?} (expected one of x, y, z, m)")]
    UnknownOrdinate(String),

    #[error("no catalogued spatial function {name} taking {n_arg} argument(s)")]
    UnknownFunction { name: String, n_arg: usize },

    #[error("{function} is evaluated by the database server and cannot be invoked directly")]
    NotDirectlyInvocable { function: &'static str },

    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StqlError>;
