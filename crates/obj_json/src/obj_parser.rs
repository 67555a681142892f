//! OBJ geometry parser
//!
//! Reads vertex positions, normals, texture coordinates and faces from the
//! text of a Wavefront .obj file into flat arrays. Faces are fan-triangulated
//! and their indices converted from 1-based to 0-based. No bounds checking
//! is done against the vertex list.

use serde::{Deserialize, Serialize};

use crate::config::ParseOptions;
use crate::error::{ParseError, Result};
use crate::numeric::parse_components;

/// Flat geometry arrays extracted from an OBJ document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Vertex positions in input order
    pub vertices: Vec<[f64; 3]>,
    /// Triangle vertex indices, 0-based
    pub faces: Vec<[i64; 3]>,
    /// Vertex normals, each input normal stored twice
    pub normals: Vec<[f64; 3]>,
    /// Texture coordinates in input order
    pub uvs: Vec<[f64; 2]>,
}

/// OBJ text parser
pub struct ObjParser;

impl ObjParser {
    /// Parse OBJ text into geometry arrays
    ///
    /// # Arguments
    /// * `contents` - The text contents of the OBJ file
    /// * `options` - Numeric handling for vertex, normal and uv components
    pub fn parse(contents: &str, options: &ParseOptions) -> Result<Geometry> {
        let mode = options.numeric_mode;
        let mut geometry = Geometry::default();
        let mut face_lines = 0usize;

        for (line_num, line) in contents.lines().enumerate() {
            let line_num = line_num + 1;
            let parts: Vec<&str> = line.split_whitespace().collect();
            let Some((&command, args)) = parts.split_first() else {
                continue;
            };

            match command {
                "v" => {
                    geometry.vertices.push(parse_components(args, line_num, mode)?);
                }
                "vn" => {
                    // One copy per triangle of the quad that shares it
                    let normal = parse_components(args, line_num, mode)?;
                    geometry.normals.push(normal);
                    geometry.normals.push(normal);
                }
                "vt" => {
                    geometry.uvs.push(parse_components(args, line_num, mode)?);
                }
                "f" => {
                    let polygon = args
                        .iter()
                        .map(|vertex| Self::parse_vertex_index(vertex, line_num))
                        .collect::<Result<Vec<i64>>>()?;
                    geometry.faces.extend(triangulate(&polygon, line_num)?);
                    face_lines += 1;
                }
                _ => {
                    log::trace!("Line {}: ignoring '{}'", line_num, command);
                }
            }
        }

        log::debug!(
            "Parsed OBJ: {} vertices, {} face lines -> {} triangles, {} normals, {} uvs",
            geometry.vertices.len(),
            face_lines,
            geometry.faces.len(),
            geometry.normals.len(),
            geometry.uvs.len()
        );

        Ok(geometry)
    }

    /// Get the material referenced by the first line containing `usemtl`
    ///
    /// Returns the second whitespace-separated token of that line. Later
    /// `usemtl` lines are ignored.
    pub fn material_name(contents: &str) -> Option<&str> {
        contents
            .lines()
            .find(|line| line.contains("usemtl"))
            .and_then(|line| line.split_whitespace().nth(1))
    }

    /// Get the material library file named by the first `mtllib` line
    pub fn material_library(contents: &str) -> Option<&str> {
        contents.lines().find_map(|line| {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("mtllib") => tokens.next(),
                _ => None,
            }
        })
    }

    /// Parse the position index of an OBJ vertex reference ("v", "v/vt", "v/vt/vn", "v//vn")
    /// and convert it to 0-based. The range is not validated.
    fn parse_vertex_index(vertex: &str, line_num: usize) -> Result<i64> {
        let position = vertex.split('/').next().unwrap_or("");
        position
            .parse::<i64>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .ok_or_else(|| ParseError::MalformedIndex {
                line: line_num,
                token: vertex.to_string(),
            })
    }
}

/// Fan-triangulate a polygon around its first vertex
///
/// A quad `[a, b, c, d]` yields `[a, b, c]` then `[a, c, d]`.
pub fn triangulate(polygon: &[i64], line_num: usize) -> Result<Vec<[i64; 3]>> {
    if polygon.len() < 3 {
        return Err(ParseError::UnsupportedFaceArity {
            line: line_num,
            arity: polygon.len(),
        });
    }

    Ok(polygon
        .windows(2)
        .skip(1)
        .map(|pair| [polygon[0], pair[0], pair[1]])
        .collect())
}
