pub mod caster;
pub mod light;
pub mod mesh;

pub use caster::Caster;
pub use light::Light;
pub use mesh::{Edge, Face, Mesh, MeshData};

/// Index into the scene's mesh arena. Casters hold handles rather than
/// references so any number of them can share one mesh; the arena
/// outlives every caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

/// An unordered collection of meshes, casters and lights. Fields are
/// public so the renderer can borrow casters mutably while reading the
/// mesh arena.
#[derive(Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub casters: Vec<Caster>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    pub fn mesh(&self, handle: MeshHandle) -> &Mesh {
        &self.meshes[handle.0]
    }

    pub fn add_caster(&mut self, caster: Caster) -> usize {
        self.casters.push(caster);
        self.casters.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Invalidates every caster's cached silhouette. The renderer
    /// calls this at the start of each light's iteration; the cache
    /// only ever serves one light.
    pub fn dirty_all_casters(&mut self) {
        for caster in &mut self.casters {
            caster.set_dirty_silhouette(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;
    use glam::{Vec3, Vec4};

    #[test]
    fn casters_share_a_mesh_through_the_arena() {
        let mut scene = Scene::new();
        let cube = scene.add_mesh(Mesh::build(shapes::cube(1.0)));
        scene.add_caster(Caster::new(cube, Vec3::ZERO, Vec3::ZERO));
        scene.add_caster(Caster::new(cube, Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO));

        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.casters[0].mesh(), scene.casters[1].mesh());
    }

    #[test]
    fn dirty_all_casters_invalidates_every_cache() {
        let mut scene = Scene::new();
        let cube = scene.add_mesh(Mesh::build(shapes::cube(1.0)));
        scene.add_caster(Caster::new(cube, Vec3::ZERO, Vec3::ZERO));
        scene.add_caster(Caster::new(cube, Vec3::X, Vec3::ZERO));

        let light_a = Vec4::new(0.0, 5.0, 0.0, 1.0);
        let light_b = Vec4::new(5.0, 0.0, 0.0, 1.0);

        let mesh = &scene.meshes[0];
        let mut before = Vec::new();
        for caster in &mut scene.casters {
            before.push(caster.silhouette(mesh, light_a).to_vec());
        }

        scene.dirty_all_casters();

        let mesh = &scene.meshes[0];
        for (caster, old) in scene.casters.iter_mut().zip(&before) {
            let new = caster.silhouette(mesh, light_b);
            assert_ne!(&new.to_vec(), old);
        }
    }

    #[test]
    fn each_light_in_the_loop_gets_a_fresh_silhouette() {
        let mut scene = Scene::new();
        let cube = scene.add_mesh(Mesh::build(shapes::cube(1.0)));
        scene.add_caster(Caster::new(cube, Vec3::ZERO, Vec3::ZERO));

        // An overhead light, then a side light, following the
        // renderer's per-light cadence: invalidate, then recompute.
        let lights = [Vec4::new(0.0, 5.0, 0.0, 1.0), Vec4::new(5.0, 0.0, 0.0, 1.0)];

        let mut silhouettes = Vec::new();
        for light in lights {
            scene.dirty_all_casters();
            let mesh = &scene.meshes[0];
            silhouettes.push(scene.casters[0].silhouette(mesh, light).to_vec());
        }

        assert_ne!(
            silhouettes[0], silhouettes[1],
            "the side light must not reuse the overhead light's edges"
        );
        let mesh = &scene.meshes[0];
        for edge in &silhouettes[1] {
            assert!(mesh.real_verts[edge.v1 as usize].x > 0.0);
            assert!(mesh.real_verts[edge.v2 as usize].x > 0.0);
        }
    }
}
