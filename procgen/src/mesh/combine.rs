//! Mesh combining utilities

use glam::Mat4;

use super::modifiers::{MeshModifier, Transform};
use super::MeshData;

/// Combine multiple meshes into one
///
/// Vertex and index data are concatenated with each part's indices offset
/// by the number of vertices before it.
pub fn combine(meshes: &[&MeshData]) -> MeshData {
    let total_vertices: usize = meshes.iter().map(|m| m.vertices.len()).sum();
    let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();

    let mut result = MeshData::with_capacity(total_vertices, total_indices);
    for mesh in meshes {
        let base = result.vertices.len() as u32;
        result.vertices.extend_from_slice(&mesh.vertices);
        result.indices.extend(mesh.indices.iter().map(|&i| base + i));
    }

    result
}

/// Combine multiple meshes with per-mesh transforms
pub fn combine_transformed(meshes: &[(&MeshData, Mat4)]) -> MeshData {
    let transformed: Vec<MeshData> = meshes
        .iter()
        .map(|(mesh, matrix)| {
            let mut part = (*mesh).clone();
            Transform::from_matrix(*matrix).apply(&mut part);
            part
        })
        .collect();

    let refs: Vec<&MeshData> = transformed.iter().collect();
    combine(&refs)
}
