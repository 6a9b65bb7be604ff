use std::collections::HashMap;
use glam::{Vec2, Vec3};

/// A triangle of the mesh. `index` holds real-vertex indices in winding
/// order; `v_start` is the offset of the face's first entry in the
/// expanded per-face arrays. The winding order is assumed consistent
/// across the whole mesh.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub index: [u32; 3],
    pub v_start: u32,
    pub normal: Vec3,
}

/// An undirected mesh edge between two real vertices, with the one or
/// two faces that share it. `f2` is `None` for a boundary edge of an
/// open mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub v1: u32,
    pub v2: u32,
    pub f1: u32,
    pub f2: Option<u32>,
}

impl Edge {
    fn new(v1: u32, v2: u32, f1: u32) -> Self {
        Self { v1, v2, f1, f2: None }
    }

    /// The same edge walked the other way, with the face roles swapped.
    /// Only meaningful for an edge with two owners.
    pub fn reversed(&self) -> Option<Edge> {
        let f2 = self.f2?;
        Some(Edge {
            v1: self.v2,
            v2: self.v1,
            f1: f2,
            f2: Some(self.f1),
        })
    }
}

/// Raw geometry as delivered by a loader, before adjacency exists.
///
/// `real_verts` are deduplicated positions referenced by `triangles`.
/// `normals` and `tex_coords` are expanded per-face-corner arrays
/// (three entries per triangle) and may be empty.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub real_verts: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub texture: Option<image::RgbaImage>,
}

/// A triangle mesh with the derived adjacency needed for silhouette
/// extraction. Owns geometry only; placement lives on `Caster`.
pub struct Mesh {
    /// Expanded per-face-corner positions, three per face. Positions
    /// may duplicate real vertices so corners can carry independent
    /// normals.
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,

    /// Deduplicated positions referenced by edges and extrusion.
    pub real_verts: Vec<Vec3>,

    pub faces: Vec<Face>,
    pub edges: Vec<Edge>,

    pub has_normals: bool,
    pub has_tex_coords: bool,

    pub texture: Option<image::RgbaImage>,
}

impl Mesh {
    /// Expands the raw arrays, synthesizes normals if the source had
    /// none, and builds the edge adjacency. Called exactly once per
    /// mesh, after loading.
    pub fn build(data: MeshData) -> Mesh {
        let MeshData {
            real_verts,
            triangles,
            normals,
            tex_coords,
            texture,
        } = data;

        let has_normals_src = !normals.is_empty();
        let has_tex_coords = !tex_coords.is_empty();

        let mut positions = Vec::with_capacity(triangles.len() * 3);
        let mut faces = Vec::with_capacity(triangles.len());

        for tri in &triangles {
            let v_start = positions.len() as u32;
            for &i in tri {
                positions.push(real_verts[i as usize]);
            }
            faces.push(Face {
                index: *tri,
                v_start,
                normal: Vec3::ZERO,
            });
        }

        // Flat normals for meshes that ship without shading normals.
        let normals = if has_normals_src {
            normals
        } else {
            let mut flat = Vec::with_capacity(positions.len());
            for chunk in positions.chunks_exact(3) {
                let n = (chunk[0] - chunk[1])
                    .cross(chunk[1] - chunk[2])
                    .normalize_or_zero();
                flat.extend([n, n, n]);
            }
            flat
        };

        let mut mesh = Mesh {
            positions,
            normals,
            tex_coords,
            real_verts,
            faces,
            edges: Vec::new(),
            has_normals: true,
            has_tex_coords,
            texture,
        };

        mesh.build_adjacency();
        mesh.calc_face_normals();
        mesh
    }

    /// Two-pass edge construction. Pass 1 records an edge for every
    /// face edge whose lower-indexed endpoint comes first in winding
    /// order, keyed by the ordered pair. Pass 2 attaches the opposite
    /// face by looking up the reversed pair. With consistent winding a
    /// closed manifold pairs every edge; anything left with one owner
    /// is a boundary edge of an open mesh.
    fn build_adjacency(&mut self) {
        let mut edge_ref: HashMap<(u32, u32), usize> = HashMap::new();

        for (f, face) in self.faces.iter().enumerate() {
            for i in 0..3 {
                let i1 = face.index[i];
                let i2 = face.index[(i + 1) % 3];
                if i1 < i2 {
                    self.edges.push(Edge::new(i1, i2, f as u32));
                    edge_ref.insert((i1, i2), self.edges.len() - 1);
                }
            }
        }

        for (f, face) in self.faces.iter().enumerate() {
            for i in 0..3 {
                let i1 = face.index[i];
                let i2 = face.index[(i + 1) % 3];
                if i1 > i2 {
                    match edge_ref.get(&(i2, i1)) {
                        Some(&e) => self.edges[e].f2 = Some(f as u32),
                        // No partner wound the other way: an open
                        // boundary that pass 1 never saw. Stored
                        // lower-index-first like every other edge.
                        None => self.edges.push(Edge::new(i2, i1, f as u32)),
                    }
                }
            }
        }
    }

    /// Averages the three shading normals referenced by each face into
    /// a unit face normal. The lighting pipeline works with shading
    /// normals, so the face normal matches them rather than the
    /// geometric cross product. With synthesized flat normals this is
    /// a pass-through.
    fn calc_face_normals(&mut self) {
        for face in &mut self.faces {
            let s = face.v_start as usize;
            face.normal = (self.normals[s] + self.normals[s + 1] + self.normals[s + 2])
                .normalize_or_zero();
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn real_vertex_count(&self) -> usize {
        self.real_verts.len()
    }

    /// Axis-aligned bounds of the deduplicated vertices.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.real_verts {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;

    #[test]
    fn cube_adjacency_is_closed() {
        let mesh = Mesh::build(shapes::cube(1.0));
        assert_eq!(mesh.faces.len(), 12);
        // A closed cube has 18 undirected edges, every one manifold.
        assert_eq!(mesh.edges.len(), 18);
        for edge in &mesh.edges {
            assert!(edge.f2.is_some(), "boundary edge in a closed cube");
        }
    }

    #[test]
    fn lone_triangle_has_three_boundary_edges() {
        let data = MeshData {
            real_verts: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2]],
            ..Default::default()
        };
        let mesh = Mesh::build(data);
        assert_eq!(mesh.edges.len(), 3);
        for edge in &mesh.edges {
            assert_eq!(edge.f2, None);
            assert!(edge.v1 < edge.v2, "edge ({}, {}) not canonical", edge.v1, edge.v2);
        }
    }

    #[test]
    fn flat_normals_synthesized_when_absent() {
        let data = MeshData {
            real_verts: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2]],
            ..Default::default()
        };
        let mesh = Mesh::build(data);
        assert!(mesh.has_normals);
        assert_eq!(mesh.normals.len(), 3);
        // CCW in the XY plane faces +Z.
        assert!((mesh.faces[0].normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn face_normals_average_shading_normals() {
        let mesh = Mesh::build(shapes::cube(1.0));
        for face in &mesh.faces {
            assert!((face.normal.length() - 1.0).abs() < 1e-5);
            let s = face.v_start as usize;
            // Sharing the corner normals, the average must not flip
            // against any of them.
            for n in &mesh.normals[s..s + 3] {
                assert!(face.normal.dot(*n) > 0.0);
            }
        }
    }

    #[test]
    fn edge_reversed_swaps_owners() {
        let edge = Edge {
            v1: 3,
            v2: 7,
            f1: 1,
            f2: Some(4),
        };
        let rev = edge.reversed().unwrap();
        assert_eq!((rev.v1, rev.v2), (7, 3));
        assert_eq!((rev.f1, rev.f2), (4, Some(1)));

        let boundary = Edge::new(0, 1, 0);
        assert!(boundary.reversed().is_none());
    }
}
