use serde::Serialize;

use crate::config::MaterialConfig;
use crate::geometry::MeshStore;

/// JSON document returned by `get_shaders_and_filters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadersAndFilters {
    pub shaderpack: String,
    pub materials: Vec<MaterialReport>,
    pub filters: Vec<FilterReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialReport {
    pub name: String,
    pub pass: String,
    pub filter: String,
}

/// A chunk filter that currently holds geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterReport {
    pub name: String,
    pub chunks: usize,
}

impl ShadersAndFilters {
    pub fn collect(shaderpack: &str, materials: &[MaterialConfig], meshes: &MeshStore) -> Self {
        Self {
            shaderpack: shaderpack.to_string(),
            materials: materials
                .iter()
                .map(|m| MaterialReport {
                    name: m.name.clone(),
                    pass: m.pass.clone(),
                    filter: m.filter.clone(),
                })
                .collect(),
            filters: meshes
                .filters()
                .map(|f| FilterReport { name: f.to_string(), chunks: meshes.chunk_count(f) })
                .collect(),
        }
    }

    pub fn to_json(&self) -> String {
        // plain strings and integers only
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("failed to serialize diagnostics: {e}");
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ChunkUpload;

    #[test]
    fn lists_materials_and_live_filters() {
        let mut meshes = MeshStore::new();
        let chunk = ChunkUpload {
            format_tag: 0,
            position: [0.0; 3],
            id: 1,
            vertices: vec![0; 9],
            indices: vec![0, 1, 2],
        };
        meshes.stage_add("block".into(), chunk).unwrap();
        meshes.apply_staged();

        let mats = [MaterialConfig {
            name: "gui".into(),
            pass: "gui".into(),
            filter: "geometry_type::gui".into(),
        }];
        let report = ShadersAndFilters::collect("BSL", &mats, &meshes);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(json["shaderpack"], "BSL");
        assert_eq!(json["materials"][0]["filter"], "geometry_type::gui");
        assert_eq!(json["filters"][0]["name"], "block");
        assert_eq!(json["filters"][0]["chunks"], 1);
    }
}
