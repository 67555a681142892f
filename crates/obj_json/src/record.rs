//! Merged geometry + material record

use serde::{Deserialize, Serialize};

use crate::mtl_parser::Material;
use crate::obj_parser::Geometry;

/// Flat record handed to the rendering pipeline
///
/// Serializes as a single mapping: the four geometry arrays followed by
/// whichever material attributes were present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Vertex, face, normal and uv arrays
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Shading attributes of the referenced material
    #[serde(flatten)]
    pub material: Material,
}

impl ModelRecord {
    /// Combine geometry and material into one record
    pub fn merge(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_json_is_flat_union() {
        let geometry = Geometry {
            vertices: vec![[0.0, 0.0, 0.0]],
            faces: vec![[0, 0, 0]],
            normals: Vec::new(),
            uvs: Vec::new(),
        };
        let material = Material {
            specular_power: Some(96.0),
            diffuse: Some([0.5, 0.5, 0.5]),
            ..Default::default()
        };

        let record = ModelRecord::merge(geometry, material);
        let value: Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "vertices": [[0.0, 0.0, 0.0]],
                "faces": [[0, 0, 0]],
                "normals": [],
                "uvs": [],
                "specularPower": 96.0,
                "diffuse": [0.5, 0.5, 0.5],
            })
        );
    }

    #[test]
    fn test_absent_material_keys_omitted() {
        let record = ModelRecord::default();
        let value: Value = serde_json::from_str(&record.to_json_pretty().unwrap()).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert!(value.get("alpha").is_none());
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let record = ModelRecord::merge(
            Geometry::default(),
            Material {
                alpha: Some(f64::NAN),
                ..Default::default()
            },
        );
        let value: Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["alpha"], Value::Null);
    }

    #[test]
    fn test_json_deserializes_back() {
        let json = r#"{"vertices":[[1.0,2.0,3.0]],"faces":[],"normals":[],"uvs":[[0.5,0.5]],"ambient":[0.1,0.2,0.3]}"#;
        let record: ModelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.geometry.uvs, vec![[0.5, 0.5]]);
        assert_eq!(record.material.ambient, Some([0.1, 0.2, 0.3]));
        assert_eq!(record.material.diffuse, None);
    }
}
