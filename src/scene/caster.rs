use glam::{EulerRot, Mat4, Vec3, Vec4};

use super::mesh::{Edge, Mesh};
use super::MeshHandle;

/// Threshold for the light-facing dot product. A strict `> 0.0` makes
/// near-perpendicular faces flicker between facings as the light moves.
pub const LIGHT_FACING_EPS: f32 = 1e-4;

/// A placed instance of a shared `Mesh` that may cast a shadow.
///
/// Both derived quantities are lazy: the local-to-world matrix is
/// rebuilt on read after any pose mutation, and the silhouette is
/// rebuilt on read after `set_dirty_silhouette` (driven once per light
/// per frame by the renderer). Pose changes do not dirty the
/// silhouette: it is computed in mesh-local space against a light
/// position already transformed into that space.
pub struct Caster {
    mesh: MeshHandle,

    pos: Vec3,
    rot: Vec3,

    local_to_world: Mat4,
    dirty_matrix: bool,

    casts_shadow: bool,

    light_facing: Vec<bool>,
    silhouette: Vec<Edge>,
    dirty_silhouette: bool,
}

impl Caster {
    pub fn new(mesh: MeshHandle, pos: Vec3, rot: Vec3) -> Self {
        Self::with_shadow(mesh, pos, rot, true)
    }

    pub fn with_shadow(mesh: MeshHandle, pos: Vec3, rot: Vec3, casts_shadow: bool) -> Self {
        Self {
            mesh,
            pos,
            rot,
            local_to_world: Mat4::IDENTITY,
            dirty_matrix: true,
            casts_shadow,
            light_facing: Vec::new(),
            silhouette: Vec::new(),
            dirty_silhouette: true,
        }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }

    pub fn translation(&self) -> Vec3 {
        self.pos
    }

    pub fn rotation(&self) -> Vec3 {
        self.rot
    }

    pub fn local_to_world(&mut self) -> Mat4 {
        if self.dirty_matrix {
            self.local_to_world = Mat4::from_translation(self.pos)
                * Mat4::from_euler(
                    EulerRot::XYZ,
                    self.rot.x.to_radians(),
                    self.rot.y.to_radians(),
                    self.rot.z.to_radians(),
                );
            self.dirty_matrix = false;
        }
        self.local_to_world
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.pos += delta;
        self.dirty_matrix = true;
    }

    pub fn set_translation(&mut self, pos: Vec3) {
        self.pos = pos;
        self.dirty_matrix = true;
    }

    pub fn rotate(&mut self, delta: Vec3) {
        self.rot = wrap_degrees(self.rot + delta);
        self.dirty_matrix = true;
    }

    pub fn set_rotation(&mut self, rot: Vec3) {
        self.rot = wrap_degrees(rot);
        self.dirty_matrix = true;
    }

    /// Marks the cached silhouette stale. The renderer calls this for
    /// every caster before each light's volume pass.
    pub fn set_dirty_silhouette(&mut self, dirty: bool) {
        self.dirty_silhouette = dirty;
    }

    /// Per-face classification from the last silhouette computation.
    /// Valid only between a `silhouette` call and the next
    /// `set_dirty_silhouette`.
    pub fn light_facing(&self) -> &[bool] {
        &self.light_facing
    }

    /// The oriented edge loop separating light-facing from unlit faces,
    /// for a light position already in this caster's local space.
    /// Cached until the silhouette is marked dirty.
    ///
    /// Each returned edge is oriented so its first owner face is the
    /// light-facing one; boundary edges (one owner) cannot be
    /// classified and are excluded.
    pub fn silhouette(&mut self, mesh: &Mesh, light_pos: Vec4) -> &[Edge] {
        if self.dirty_silhouette {
            self.find_light_facing(mesh, light_pos);

            self.silhouette.clear();
            for edge in &mesh.edges {
                let Some(f2) = edge.f2 else { continue };

                let lf1 = self.light_facing[edge.f1 as usize];
                let lf2 = self.light_facing[f2 as usize];
                if lf1 != lf2 {
                    if lf1 {
                        self.silhouette.push(*edge);
                    } else if let Some(rev) = edge.reversed() {
                        self.silhouette.push(rev);
                    }
                }
            }

            self.dirty_silhouette = false;
        }

        &self.silhouette
    }

    /// Classifies every face against the light. For a point light the
    /// facing vector runs from the face's first real vertex toward the
    /// light; a directional light has a constant facing vector.
    fn find_light_facing(&mut self, mesh: &Mesh, light_pos: Vec4) {
        self.light_facing.clear();
        self.light_facing.extend(mesh.faces.iter().map(|face| {
            let facing = if light_pos.w != 0.0 {
                light_pos.w * light_pos.truncate() - mesh.real_verts[face.index[0] as usize]
            } else {
                -light_pos.truncate()
            };
            face.normal.dot(facing) > LIGHT_FACING_EPS
        }));
    }
}

fn wrap_degrees(rot: Vec3) -> Vec3 {
    Vec3::new(
        rot.x.rem_euclid(360.0),
        rot.y.rem_euclid(360.0),
        rot.z.rem_euclid(360.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::MeshData;
    use crate::shapes;
    use std::collections::HashMap;

    fn cube() -> Mesh {
        Mesh::build(shapes::cube(1.0))
    }

    fn caster() -> Caster {
        Caster::new(MeshHandle(0), Vec3::ZERO, Vec3::ZERO)
    }

    const OVERHEAD: Vec4 = Vec4::new(0.0, 5.0, 0.0, 1.0);

    #[test]
    fn cube_under_overhead_point_light() {
        let mesh = cube();
        let mut caster = caster();

        let sil: Vec<Edge> = caster.silhouette(&mesh, OVERHEAD).to_vec();

        // Only the two top faces see the light.
        let facing = caster.light_facing();
        assert_eq!(facing.iter().filter(|&&f| f).count(), 2);
        for (face, lit) in mesh.faces.iter().zip(facing) {
            assert_eq!(*lit, face.normal.y > 0.5, "face normal {:?}", face.normal);
        }

        // The silhouette is the four edges of the top square, all at
        // the top of the cube.
        assert_eq!(sil.len(), 4);
        for edge in &sil {
            assert!(mesh.real_verts[edge.v1 as usize].y > 0.0);
            assert!(mesh.real_verts[edge.v2 as usize].y > 0.0);
        }
    }

    #[test]
    fn silhouette_orientation_keeps_lit_face_first() {
        let mesh = cube();
        let mut caster = caster();
        let sil = caster.silhouette(&mesh, OVERHEAD).to_vec();
        let facing = caster.light_facing().to_vec();

        for edge in &sil {
            assert!(facing[edge.f1 as usize], "first owner must be light-facing");
            assert!(!facing[edge.f2.unwrap() as usize]);
        }
    }

    #[test]
    fn silhouette_forms_closed_loops() {
        let mesh = cube();
        let mut caster = caster();

        // A light off to one side of the hull still yields closed
        // loops: every vertex is an endpoint an even number of times.
        let sil = caster.silhouette(&mesh, Vec4::new(3.0, 4.0, 2.5, 1.0));

        let mut degree: HashMap<u32, u32> = HashMap::new();
        for edge in sil {
            *degree.entry(edge.v1).or_default() += 1;
            *degree.entry(edge.v2).or_default() += 1;
        }
        assert!(!degree.is_empty());
        for (v, d) in degree {
            assert_eq!(d % 2, 0, "vertex {v} has odd silhouette degree");
        }
    }

    #[test]
    fn silhouette_cache_is_idempotent() {
        let mesh = cube();
        let mut caster = caster();

        let first = caster.silhouette(&mesh, OVERHEAD).to_vec();
        let second = caster.silhouette(&mesh, OVERHEAD).to_vec();
        assert_eq!(first, second);

        // Invalidate and recompute with the same light: identical.
        caster.set_dirty_silhouette(true);
        let third = caster.silhouette(&mesh, OVERHEAD).to_vec();
        assert_eq!(first, third);
    }

    #[test]
    fn pose_mutation_leaves_silhouette_cache_alone() {
        let mesh = cube();
        let mut caster = caster();

        let before = caster.silhouette(&mesh, OVERHEAD).to_vec();
        caster.translate(Vec3::new(10.0, 0.0, 0.0));
        caster.rotate(Vec3::new(0.0, 45.0, 0.0));
        let after = caster.silhouette(&mesh, OVERHEAD).to_vec();
        assert_eq!(before, after);
    }

    #[test]
    fn directional_light_classifies_by_direction_only() {
        let mesh = cube();
        let mut caster = caster();

        // Light shining straight down: facing vector is -position,
        // i.e. +Y faces are lit no matter where they sit.
        let sil = caster.silhouette(&mesh, Vec4::new(0.0, -1.0, 0.0, 0.0));
        assert_eq!(sil.len(), 4);
        let facing = caster.light_facing();
        for (face, lit) in mesh.faces.iter().zip(facing) {
            assert_eq!(*lit, face.normal.y > 0.5);
        }
    }

    #[test]
    fn boundary_edges_excluded_from_silhouette() {
        let data = MeshData {
            real_verts: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            triangles: vec![[0, 2, 1]],
            ..Default::default()
        };
        let mesh = Mesh::build(data);
        let mut caster = caster();

        // The lone triangle faces the light, but none of its edges
        // have a second owner to classify against.
        let sil = caster.silhouette(&mesh, OVERHEAD);
        assert!(sil.is_empty());
        assert_eq!(caster.light_facing(), &[true]);
    }

    #[test]
    fn degenerate_light_yields_empty_silhouette() {
        let mesh = cube();
        let mut caster = caster();
        let sil = caster.silhouette(&mesh, Vec4::ZERO);
        assert!(sil.is_empty());
    }

    #[test]
    fn rotation_wraps_into_0_360() {
        let mut caster = caster();
        caster.set_rotation(Vec3::new(-30.0, 370.0, 720.0));
        assert_eq!(caster.rotation(), Vec3::new(330.0, 10.0, 0.0));

        caster.rotate(Vec3::new(45.0, 355.0, -10.0));
        assert_eq!(caster.rotation(), Vec3::new(15.0, 5.0, 350.0));
    }

    #[test]
    fn local_to_world_recomputed_after_pose_change() {
        let mut caster = caster();
        let m0 = caster.local_to_world();
        assert_eq!(m0, Mat4::IDENTITY);

        caster.set_translation(Vec3::new(1.0, 2.0, 3.0));
        let m1 = caster.local_to_world();
        assert_eq!(
            m1.transform_point3(Vec3::ZERO),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }
}
