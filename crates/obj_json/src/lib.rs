//! # obj_json
//!
//! Converts a Wavefront OBJ geometry file and its companion MTL material file
//! into one flat record for a rendering pipeline.
//!
//! ## Pipeline
//!
//! - **Geometry**: `v`, `vn`, `vt` and `f` lines become flat arrays; faces are
//!   fan-triangulated and re-indexed from 0
//! - **Material name**: the first `usemtl` line selects the material
//! - **Material**: the matching `newmtl` block yields shading attributes
//! - **Merge**: both results are combined into a [`ModelRecord`]
//!
//! ## Quick Start
//!
//! ```rust
//! let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nusemtl Mat\nf 1 2 3 4\n";
//! let mtl = "newmtl Mat\nKd 1.0 0.5 0.0\n";
//!
//! let record = obj_json::parse(obj, mtl).unwrap();
//! assert_eq!(record.geometry.faces, vec![[0, 1, 2], [0, 2, 3]]);
//! assert_eq!(record.material.diffuse, Some([1.0, 0.5, 0.0]));
//! ```
//!
//! Parsing is pure and synchronous; reading files and writing the JSON
//! output is left to the caller.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod error;
pub mod logging;
pub mod mtl_parser;
pub mod obj_parser;
pub mod record;

mod numeric;

pub use config::{Config, ConfigError, MissingMaterialPolicy, NumericMode, ParseOptions};
pub use error::{Document, ParseError, Result};
pub use mtl_parser::{Material, MaterialLibrary, MtlParser};
pub use obj_parser::{triangulate, Geometry, ObjParser};
pub use record::ModelRecord;

/// Parse OBJ and MTL text with default options
pub fn parse(obj: &str, mtl: &str) -> Result<ModelRecord> {
    parse_with_options(obj, mtl, &ParseOptions::default())
}

/// Parse OBJ and MTL text into a merged record
///
/// A geometry text without `usemtl` yields an empty material record unless
/// `options.require_material` is set.
pub fn parse_with_options(obj: &str, mtl: &str, options: &ParseOptions) -> Result<ModelRecord> {
    let geometry = parse_obj(obj, options)?;

    let material_name = parse_material_name(obj);
    if material_name.is_none() {
        if options.require_material {
            return Err(ParseError::MaterialNameMissing);
        }
        log::warn!("No usemtl directive found, material attributes will be empty");
    }

    let material = parse_mtl(mtl, material_name, options)?;
    Ok(ModelRecord::merge(geometry, material))
}

/// Parse OBJ and MTL byte buffers, decoding each as UTF-8 first
pub fn parse_bytes(obj: &[u8], mtl: &[u8], options: &ParseOptions) -> Result<ModelRecord> {
    let obj = decode(obj, Document::Geometry)?;
    let mtl = decode(mtl, Document::Material)?;
    parse_with_options(obj, mtl, options)
}

/// Extract geometry arrays from OBJ text
pub fn parse_obj(obj: &str, options: &ParseOptions) -> Result<Geometry> {
    ObjParser::parse(obj, options)
}

/// Name following the first `usemtl` in OBJ text, if any
pub fn parse_material_name(obj: &str) -> Option<&str> {
    ObjParser::material_name(obj)
}

/// File named by the first `mtllib` in OBJ text, if any
pub fn parse_material_library(obj: &str) -> Option<&str> {
    ObjParser::material_library(obj)
}

/// Extract the named material's attributes from MTL text
pub fn parse_mtl(mtl: &str, material_name: Option<&str>, options: &ParseOptions) -> Result<Material> {
    MtlParser::parse(mtl, material_name, options)
}

fn decode(bytes: &[u8], document: Document) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|source| ParseError::InvalidUtf8 { document, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nusemtl Panel\nf 1//1 2//1 3//1 4//1\n";
    const PANEL_MTL: &str = "newmtl Panel\nNs 32\nKa 0 0 0\nKd 0.2 0.4 0.6\nKs 1 1 1\nd 0.5\n";

    #[test]
    fn test_parse_merges_geometry_and_material() {
        let record = parse(QUAD_OBJ, PANEL_MTL).unwrap();

        assert_eq!(record.geometry.vertices.len(), 4);
        assert_eq!(record.geometry.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(record.geometry.normals.len(), 2);
        assert_eq!(record.material.specular_power, Some(32.0));
        assert_eq!(record.material.diffuse, Some([0.2, 0.4, 0.6]));
        assert_eq!(record.material.alpha, Some(0.5));
    }

    #[test]
    fn test_missing_usemtl_recovers_with_empty_material() {
        let obj = "v 0 0 0\nf 1 1 1\n";
        let record = parse(obj, PANEL_MTL).unwrap();
        assert!(record.material.is_empty());
        assert_eq!(record.geometry.faces.len(), 1);
    }

    #[test]
    fn test_missing_usemtl_required() {
        let options = ParseOptions {
            require_material: true,
            ..Default::default()
        };
        let err = parse_with_options("v 0 0 0\n", PANEL_MTL, &options).unwrap_err();
        assert!(matches!(err, ParseError::MaterialNameMissing));
    }

    #[test]
    fn test_parse_bytes() {
        let record = parse_bytes(QUAD_OBJ.as_bytes(), PANEL_MTL.as_bytes(), &ParseOptions::default()).unwrap();
        assert_eq!(record, parse(QUAD_OBJ, PANEL_MTL).unwrap());
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let err = parse_bytes(QUAD_OBJ.as_bytes(), &[0x6e, 0xff, 0xfe], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8 { document: Document::Material, .. }));

        let err = parse_bytes(&[0xc3, 0x28], PANEL_MTL.as_bytes(), &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8 { document: Document::Geometry, .. }));
    }

    #[test]
    fn test_geometry_error_reported_before_material() {
        let obj = "usemtl Unknown\nf 1 2\n";
        let err = parse(obj, PANEL_MTL).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFaceArity { .. }));
    }
}
