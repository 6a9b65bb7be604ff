//! CPU-side shadow-volume assembly. The GPU-side extrusion buffer is
//! the doubled real-vertex buffer: index `i` is the vertex itself
//! (`w = 1`), index `i + n` the copy with `w = 0` that the extrusion
//! shader pushes to infinity. Everything here only produces index
//! lists into that buffer; no per-light vertex data is built.

use crate::scene::mesh::{Edge, Face};

/// Index lists for one caster's shadow volume under one light.
#[derive(Debug, Default, PartialEq)]
pub struct VolumeIndices {
    /// Extruded silhouette sides: quads for a point light, triangles
    /// converging on the apex at infinity for a directional one.
    pub sides: Vec<u32>,
    /// Cap at infinity, point lights only. A directional volume
    /// already converges to a point, so its dark cap is empty.
    pub dark_cap: Vec<u32>,
}

impl VolumeIndices {
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty() && self.dark_cap.is_empty()
    }
}

/// Builds the side and dark-cap index lists from an oriented
/// silhouette. `real_vert_count` is the offset into the extruded half
/// of the buffer; for a directional light the index `real_vert_count`
/// itself serves as the shared apex, since every extruded vertex of a
/// directional volume lands on the same point at infinity.
pub fn build_volume_indices(
    silhouette: &[Edge],
    real_vert_count: u32,
    light_w: f32,
) -> VolumeIndices {
    let n = real_vert_count;
    let mut out = VolumeIndices::default();

    if light_w != 0.0 {
        out.sides.reserve(silhouette.len() * 6);
        out.dark_cap.reserve(silhouette.len() * 3);
        for edge in silhouette {
            // Quad (v1, v2, v2+n, v1+n) as two triangles.
            let (v1, v2) = (edge.v1, edge.v2);
            out.sides
                .extend([v1, v2, v2 + n, v1, v2 + n, v1 + n]);
            // Fan around the extruded copy of vertex 0.
            out.dark_cap.extend([n, v1 + n, v2 + n]);
        }
    } else {
        out.sides.reserve(silhouette.len() * 3);
        for edge in silhouette {
            out.sides.extend([edge.v1, edge.v2, n]);
        }
    }

    out
}

/// The light cap: one un-extruded triangle per light-facing face,
/// closing the volume at the caster's lit surface. `light_facing` is
/// the caster's classification from the same silhouette computation.
pub fn build_light_cap_indices(faces: &[Face], light_facing: &[bool]) -> Vec<u32> {
    faces
        .iter()
        .zip(light_facing)
        .filter(|(_, &lit)| lit)
        .flat_map(|(face, _)| face.index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Caster, Mesh, MeshHandle};
    use crate::shapes;
    use glam::{Vec3, Vec4};

    fn cube_silhouette(light: Vec4) -> (Mesh, Vec<Edge>, Vec<bool>) {
        let mesh = Mesh::build(shapes::cube(1.0));
        let mut caster = Caster::new(MeshHandle(0), Vec3::ZERO, Vec3::ZERO);
        let sil = caster.silhouette(&mesh, light).to_vec();
        let facing = caster.light_facing().to_vec();
        (mesh, sil, facing)
    }

    #[test]
    fn point_light_emits_sides_and_dark_cap() {
        let (mesh, sil, _) = cube_silhouette(Vec4::new(0.0, 5.0, 0.0, 1.0));
        let n = mesh.real_vertex_count() as u32;
        let vol = build_volume_indices(&sil, n, 1.0);

        // 4 silhouette edges: a quad (2 tris) per side, a fan tri per
        // dark-cap edge.
        assert_eq!(vol.sides.len(), 4 * 6);
        assert_eq!(vol.dark_cap.len(), 4 * 3);
        // The dark cap lives entirely in the extruded half.
        assert!(vol.dark_cap.iter().all(|&i| i >= n));
        assert!(vol.sides.iter().all(|&i| i < 2 * n));
    }

    #[test]
    fn directional_light_emits_no_dark_cap() {
        let (mesh, sil, _) = cube_silhouette(Vec4::new(0.0, -1.0, 0.0, 0.0));
        let n = mesh.real_vertex_count() as u32;
        let vol = build_volume_indices(&sil, n, 0.0);

        assert!(vol.dark_cap.is_empty());
        // One triangle per edge, apex shared at index n.
        assert_eq!(vol.sides.len(), 4 * 3);
        assert_eq!(vol.sides.iter().filter(|&&i| i == n).count(), 4);
    }

    #[test]
    fn empty_silhouette_builds_empty_volume() {
        let vol = build_volume_indices(&[], 8, 1.0);
        assert!(vol.is_empty());
    }

    #[test]
    fn light_cap_covers_exactly_the_lit_faces() {
        let (mesh, _, facing) = cube_silhouette(Vec4::new(0.0, 5.0, 0.0, 1.0));
        let cap = build_light_cap_indices(&mesh.faces, &facing);

        // Two lit top faces, one triangle each.
        assert_eq!(cap.len(), 2 * 3);
        for i in cap {
            assert!(mesh.real_verts[i as usize].y > 0.0);
        }
    }

    #[test]
    fn side_quads_reference_matching_extruded_vertices() {
        let (mesh, sil, _) = cube_silhouette(Vec4::new(0.0, 5.0, 0.0, 1.0));
        let n = mesh.real_vertex_count() as u32;
        let vol = build_volume_indices(&sil, n, 1.0);

        for (edge, quad) in sil.iter().zip(vol.sides.chunks_exact(6)) {
            assert_eq!(quad, [edge.v1, edge.v2, edge.v2 + n, edge.v1, edge.v2 + n, edge.v1 + n]);
        }
    }
}
