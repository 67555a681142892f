//! Error types for OBJ/MTL parsing

use thiserror::Error;

/// Which of the two input documents an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The geometry (.obj) text
    Geometry,
    /// The material (.mtl) text
    Material,
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry => write!(f, "geometry"),
            Self::Material => write!(f, "material"),
        }
    }
}

/// Errors produced while converting OBJ + MTL text into a record
#[derive(Error, Debug)]
pub enum ParseError {
    /// A byte input was not valid UTF-8
    #[error("{document} document is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// Which input failed to decode
        document: Document,
        /// Underlying decode error
        #[source]
        source: std::str::Utf8Error,
    },

    /// A float token failed to parse (strict numeric mode only)
    #[error("Line {line}: malformed number '{token}'")]
    MalformedNumber {
        /// 1-based line number
        line: usize,
        /// The offending token, empty when a component was missing
        token: String,
    },

    /// A face vertex reference did not start with an integer index
    ///
    /// Indices are not range-checked against the vertex list, but they must
    /// fit in an `i64` after the 1-based to 0-based conversion, so values
    /// beyond `i64::MAX` and `i64::MIN` itself are also reported here.
    #[error("Line {line}: malformed face index '{token}'")]
    MalformedIndex {
        /// 1-based line number
        line: usize,
        /// The offending vertex reference
        token: String,
    },

    /// A face line had fewer than three vertex references
    #[error("Line {line}: face has {arity} vertices, at least 3 required")]
    UnsupportedFaceArity {
        /// 1-based line number
        line: usize,
        /// Number of vertex references found
        arity: usize,
    },

    /// The geometry text has no `usemtl` line
    #[error("No usemtl directive found in geometry document")]
    MaterialNameMissing,

    /// The referenced material has no `newmtl` block
    #[error("Material '{name}' not found in material document")]
    MaterialBlockNotFound {
        /// The material name that was looked up
        name: String,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ParseError>;
