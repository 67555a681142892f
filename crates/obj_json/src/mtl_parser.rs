//! MTL (Material Template Library) parser
//!
//! Splits Wavefront .mtl text into named blocks and extracts the shading
//! attributes of one block. Only the requested block is parsed, so malformed
//! values in unrelated materials never affect the result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{MissingMaterialPolicy, NumericMode, ParseOptions};
use crate::error::{ParseError, Result};
use crate::numeric::{parse_components, parse_float};

/// Shading attributes of a single material
///
/// Every field is absent unless its directive appears in the block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Specular exponent (Ns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular_power: Option<f64>,
    /// Ambient color (Ka)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient: Option<[f64; 3]>,
    /// Diffuse color (Kd)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffuse: Option<[f64; 3]>,
    /// Specular color (Ks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular: Option<[f64; 3]>,
    /// Dissolve (d) or transparency (Tr), whichever comes last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// First component of the transmission filter (Tf)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive: Option<f64>,
}

impl Material {
    /// Whether no attribute was found
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One `newmtl` block: the declaration line up to the next declaration
#[derive(Debug, Clone)]
struct Block<'a> {
    name: &'a str,
    /// 1-based number of the `newmtl` line
    start_line: usize,
    lines: Vec<&'a str>,
}

/// Material blocks of an MTL document, keyed by exact name
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary<'a> {
    blocks: Vec<Block<'a>>,
    by_name: HashMap<&'a str, usize>,
}

impl<'a> MaterialLibrary<'a> {
    /// Split MTL text into blocks
    ///
    /// The `newmtl` directive is matched case-insensitively. When a name is
    /// declared more than once the first block keeps it. Text before the
    /// first declaration belongs to no block.
    pub fn parse(contents: &'a str) -> Self {
        let mut library = Self::default();

        for (line_num, line) in contents.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let is_declaration = tokens
                .next()
                .is_some_and(|command| command.eq_ignore_ascii_case("newmtl"));

            if is_declaration {
                let name = tokens.next().unwrap_or("");
                let index = library.blocks.len();
                if library.by_name.contains_key(name) {
                    log::warn!("Line {}: duplicate material '{}' ignored", line_num + 1, name);
                } else {
                    library.by_name.insert(name, index);
                }
                library.blocks.push(Block {
                    name,
                    start_line: line_num + 1,
                    lines: Vec::new(),
                });
            } else if let Some(block) = library.blocks.last_mut() {
                block.lines.push(line);
            }
        }

        library
    }

    /// Number of distinct material names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the document declares no materials
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Material names in declaration order, duplicates omitted
    pub fn names(&self) -> Vec<&'a str> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(index, block)| self.by_name.get(block.name) == Some(index))
            .map(|(_, block)| block.name)
            .collect()
    }

    /// Whether a material with exactly this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Parse the attributes of the named material
    ///
    /// Returns `Ok(None)` when no block has that name.
    pub fn get(&self, name: &str, mode: NumericMode) -> Result<Option<Material>> {
        match self.by_name.get(name) {
            Some(&index) => Self::parse_block(&self.blocks[index], mode).map(Some),
            None => Ok(None),
        }
    }

    fn parse_block(block: &Block<'_>, mode: NumericMode) -> Result<Material> {
        let mut material = Material::default();

        for (offset, line) in block.lines.iter().enumerate() {
            let line_num = block.start_line + offset + 1;
            let parts: Vec<&str> = line.split_whitespace().collect();
            let Some((&command, args)) = parts.split_first() else {
                continue;
            };

            match command {
                "Ns" => material.specular_power = Some(parse_float(args.first().copied(), line_num, mode)?),
                "Ka" => material.ambient = Some(parse_components(args, line_num, mode)?),
                "Kd" => material.diffuse = Some(parse_components(args, line_num, mode)?),
                "Ks" => material.specular = Some(parse_components(args, line_num, mode)?),
                "d" | "Tr" => material.alpha = Some(parse_float(args.first().copied(), line_num, mode)?),
                // Tf is an RGB filter, only the first component is kept
                "Tf" => material.emissive = Some(parse_float(args.first().copied(), line_num, mode)?),
                _ => {}
            }
        }

        log::debug!("Parsed material '{}' from line {}: {:?}", block.name, block.start_line, material);
        Ok(material)
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Extract the named material's attributes from MTL text
    ///
    /// # Arguments
    /// * `contents` - The text contents of the MTL file
    /// * `material_name` - Name from the OBJ `usemtl` line, if any
    /// * `options` - Numeric handling and missing-material policy
    ///
    /// # Returns
    /// An empty record when `material_name` is `None`. A name with no
    /// matching block is an error or an empty record depending on
    /// `options.missing_material`.
    pub fn parse(contents: &str, material_name: Option<&str>, options: &ParseOptions) -> Result<Material> {
        let Some(name) = material_name else {
            return Ok(Material::default());
        };

        let library = MaterialLibrary::parse(contents);
        match library.get(name, options.numeric_mode)? {
            Some(material) => Ok(material),
            None => match options.missing_material {
                MissingMaterialPolicy::Error => Err(ParseError::MaterialBlockNotFound {
                    name: name.to_string(),
                }),
                MissingMaterialPolicy::Empty => {
                    log::warn!("Material '{}' not found, using empty material", name);
                    Ok(Material::default())
                }
            },
        }
    }
}
