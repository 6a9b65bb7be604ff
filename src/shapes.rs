//! Procedural primitives for the demo scene and tests. All shapes are
//! closed manifolds with consistent counter-clockwise outward winding,
//! which the silhouette classification and the stencil front/back
//! separation both rely on.

use glam::Vec3;

use crate::scene::MeshData;

/// Axis-aligned cube centered at the origin, `size` edge length.
/// Ships without shading normals so flat ones get synthesized.
pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let real_verts = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    let triangles = vec![
        [4, 5, 6],
        [4, 6, 7], // +z
        [1, 0, 3],
        [1, 3, 2], // -z
        [5, 1, 2],
        [5, 2, 6], // +x
        [0, 4, 7],
        [0, 7, 3], // -x
        [7, 6, 2],
        [7, 2, 3], // +y
        [0, 1, 5],
        [0, 5, 4], // -y
    ];
    MeshData {
        real_verts,
        triangles,
        ..Default::default()
    }
}

/// Closed cylinder along the Y axis, capped with triangle fans.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let n = segments.max(3);
    let h = height * 0.5;

    let mut real_verts = Vec::with_capacity(2 * n as usize + 2);
    for ring in [-h, h] {
        for i in 0..n {
            let theta = i as f32 / n as f32 * std::f32::consts::TAU;
            real_verts.push(Vec3::new(radius * theta.cos(), ring, radius * theta.sin()));
        }
    }
    let bottom_center = 2 * n;
    let top_center = 2 * n + 1;
    real_verts.push(Vec3::new(0.0, -h, 0.0));
    real_verts.push(Vec3::new(0.0, h, 0.0));

    let mut triangles = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1) = (i, j);
        let (t0, t1) = (n + i, n + j);
        triangles.push([b0, t0, t1]);
        triangles.push([b0, t1, b1]);
        triangles.push([top_center, t1, t0]);
        triangles.push([bottom_center, b0, b1]);
    }

    MeshData {
        real_verts,
        triangles,
        ..Default::default()
    }
}

/// Torus in the XZ plane with smooth analytic shading normals.
pub fn ring(major: f32, minor: f32, major_segments: u32, minor_segments: u32) -> MeshData {
    let m = major_segments.max(3);
    let n = minor_segments.max(3);

    let mut real_verts = Vec::with_capacity((m * n) as usize);
    let mut vert_normals = Vec::with_capacity((m * n) as usize);
    for i in 0..m {
        let theta = i as f32 / m as f32 * std::f32::consts::TAU;
        for j in 0..n {
            let phi = j as f32 / n as f32 * std::f32::consts::TAU;
            let tube = major + minor * phi.cos();
            real_verts.push(Vec3::new(
                tube * theta.cos(),
                minor * phi.sin(),
                tube * theta.sin(),
            ));
            vert_normals.push(Vec3::new(
                phi.cos() * theta.cos(),
                phi.sin(),
                phi.cos() * theta.sin(),
            ));
        }
    }

    let at = |i: u32, j: u32| (i % m) * n + (j % n);
    let mut triangles = Vec::new();
    for i in 0..m {
        for j in 0..n {
            let a = at(i, j);
            let b = at(i, j + 1);
            let c = at(i + 1, j + 1);
            let d = at(i + 1, j);
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    let mut normals = Vec::with_capacity(triangles.len() * 3);
    for tri in &triangles {
        for &v in tri {
            normals.push(vert_normals[v as usize]);
        }
    }

    MeshData {
        real_verts,
        triangles,
        normals,
        ..Default::default()
    }
}

/// A room to stand in: a cube with the winding flipped so its faces
/// point inward. Used as a non-casting interior.
pub fn inverted_cube(size: f32) -> MeshData {
    let mut data = cube(size);
    for tri in &mut data.triangles {
        tri.swap(1, 2);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Mesh;

    fn assert_closed(data: MeshData) {
        let mesh = Mesh::build(data);
        for edge in &mesh.edges {
            assert!(edge.f2.is_some(), "open edge {:?}", edge);
        }
    }

    #[test]
    fn shapes_are_closed_manifolds() {
        assert_closed(cube(1.0));
        assert_closed(cylinder(1.0, 2.0, 12));
        assert_closed(ring(2.0, 0.5, 16, 8));
        assert_closed(inverted_cube(8.0));
    }

    #[test]
    fn cube_normals_point_outward() {
        let mesh = Mesh::build(cube(2.0));
        for face in &mesh.faces {
            let center = (mesh.real_verts[face.index[0] as usize]
                + mesh.real_verts[face.index[1] as usize]
                + mesh.real_verts[face.index[2] as usize])
                / 3.0;
            assert!(face.normal.dot(center) > 0.0);
        }
    }

    #[test]
    fn ring_has_smooth_normals() {
        let data = ring(2.0, 0.5, 16, 8);
        assert_eq!(data.normals.len(), data.triangles.len() * 3);
        let mesh = Mesh::build(data);
        for face in &mesh.faces {
            assert!((face.normal.length() - 1.0).abs() < 1e-4);
        }
    }
}
