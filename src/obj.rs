//! Wavefront OBJ loading. A loader is a free function that populates a
//! plain `MeshData`; adjacency construction happens afterwards in
//! `Mesh::build`, once, like for any other mesh source.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glam::{Vec2, Vec3};
use log::warn;

use crate::scene::MeshData;

/// Parses an OBJ file from disk. A `mtllib` record is followed far
/// enough to texture the mesh: the first `map_Kd` of the material file
/// becomes its diffuse map. Meshes without one render plain white.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading OBJ file {}", path.display()))?;
    let mut data =
        parse_obj(&text).with_context(|| format!("parsing OBJ file {}", path.display()))?;

    let dir = path.parent().unwrap_or(Path::new("."));
    if let Some(tex_path) = find_diffuse_map(&text, dir) {
        match load_texture(&tex_path) {
            Ok(img) => data.texture = Some(img),
            Err(err) => warn!("{}: ignoring texture: {err:#}", path.display()),
        }
    }
    Ok(data)
}

/// Decodes a texture image for a mesh.
pub fn load_texture(path: impl AsRef<Path>) -> Result<image::RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("loading texture {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Resolves the first `mtllib` record to its first `map_Kd`, both
/// relative to `dir`. A missing record means an untextured mesh; an
/// unreadable material file only logs.
fn find_diffuse_map(obj_text: &str, dir: &Path) -> Option<PathBuf> {
    let mtl_path = dir.join(first_record(obj_text, "mtllib")?);
    let mtl_text = match std::fs::read_to_string(&mtl_path) {
        Ok(text) => text,
        Err(err) => {
            warn!("reading material file {}: {err}", mtl_path.display());
            return None;
        }
    };
    first_record(&mtl_text, "map_Kd").map(|name| dir.join(name))
}

fn first_record<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let line = line.split('#').next().unwrap_or("").trim();
        let mut fields = line.split_whitespace();
        if fields.next() != Some(keyword) {
            return None;
        }
        fields.next()
    })
}

/// Parses OBJ text: `v`, `vt`, `vn` and `f` records, with negative
/// (relative) indices and fan triangulation of faces with more than
/// three corners. Anything else (groups, materials, smoothing) is
/// skipped.
pub fn parse_obj(text: &str) -> Result<MeshData> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();

    let mut data = MeshData::default();
    // Corners without a normal/texcoord index poison the whole array:
    // the expanded arrays must stay parallel to the triangle list.
    let mut normals_complete = true;
    let mut tex_coords_complete = true;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let keyword = fields.next().unwrap_or("");
        let context = || format!("line {}: {:?}", line_no + 1, line);

        match keyword {
            "v" => positions.push(parse_vec3(&mut fields).with_context(context)?),
            "vt" => tex_coords.push(parse_vec2(&mut fields).with_context(context)?),
            "vn" => normals.push(parse_vec3(&mut fields).with_context(context)?),
            "f" => {
                let corners: Vec<Corner> = fields
                    .map(|f| parse_corner(f, &positions, &tex_coords, &normals))
                    .collect::<Result<_>>()
                    .with_context(context)?;
                if corners.len() < 3 {
                    bail!("{}: face with fewer than 3 corners", context());
                }
                for i in 1..corners.len() - 1 {
                    for corner in [&corners[0], &corners[i], &corners[i + 1]] {
                        match corner.normal {
                            Some(n) => data.normals.push(n),
                            None => normals_complete = false,
                        }
                        match corner.tex_coord {
                            Some(t) => data.tex_coords.push(t),
                            None => tex_coords_complete = false,
                        }
                    }
                    data.triangles.push([
                        corners[0].vertex,
                        corners[i].vertex,
                        corners[i + 1].vertex,
                    ]);
                }
            }
            _ => {}
        }
    }

    if !normals_complete {
        data.normals.clear();
    }
    if !tex_coords_complete {
        data.tex_coords.clear();
    }
    data.real_verts = positions;

    if data.triangles.is_empty() {
        bail!("no faces found");
    }
    Ok(data)
}

struct Corner {
    vertex: u32,
    tex_coord: Option<Vec2>,
    normal: Option<Vec3>,
}

fn parse_corner(
    field: &str,
    positions: &[Vec3],
    tex_coords: &[Vec2],
    normals: &[Vec3],
) -> Result<Corner> {
    let mut parts = field.split('/');

    let v = parts.next().unwrap_or("");
    let vertex = resolve_index(v, positions.len())
        .with_context(|| format!("vertex index {:?}", field))?
        .context("missing vertex index")?;

    let tex_coord = match parts.next() {
        Some(t) => resolve_index(t, tex_coords.len())?
            .map(|i| tex_coords[i as usize]),
        None => None,
    };
    let normal = match parts.next() {
        Some(n) => resolve_index(n, normals.len())?
            .map(|i| normals[i as usize]),
        None => None,
    };

    Ok(Corner {
        vertex,
        tex_coord,
        normal,
    })
}

/// OBJ indices are 1-based; negative indices count back from the end
/// of the array as it stood at the face's line.
fn resolve_index(field: &str, len: usize) -> Result<Option<u32>> {
    if field.is_empty() {
        return Ok(None);
    }
    let idx: i64 = field
        .parse()
        .with_context(|| format!("bad index {:?}", field))?;
    let resolved = if idx > 0 {
        idx - 1
    } else if idx < 0 {
        len as i64 + idx
    } else {
        bail!("index 0 is not valid in OBJ");
    };
    if resolved < 0 || resolved >= len as i64 {
        bail!("index {} out of range (have {})", idx, len);
    }
    Ok(Some(resolved as u32))
}

fn parse_vec3(fields: &mut std::str::SplitWhitespace<'_>) -> Result<Vec3> {
    let mut out = [0.0f32; 3];
    for v in &mut out {
        *v = fields
            .next()
            .context("expected 3 components")?
            .parse()
            .context("bad float")?;
    }
    Ok(Vec3::from_array(out))
}

fn parse_vec2(fields: &mut std::str::SplitWhitespace<'_>) -> Result<Vec2> {
    let mut out = [0.0f32; 2];
    for v in &mut out {
        *v = fields
            .next()
            .context("expected 2 components")?
            .parse()
            .context("bad float")?;
    }
    Ok(Vec2::from_array(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Mesh;

    const TETRA: &str = "
# a closed tetrahedron
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

    #[test]
    fn parses_a_closed_tetrahedron() {
        let data = parse_obj(TETRA).unwrap();
        assert_eq!(data.real_verts.len(), 4);
        assert_eq!(data.triangles.len(), 4);

        let mesh = Mesh::build(data);
        assert_eq!(mesh.edges.len(), 6);
        for edge in &mesh.edges {
            assert!(edge.f2.is_some());
        }
    }

    #[test]
    fn triangulates_quads_as_a_fan() {
        let data = parse_obj(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        )
        .unwrap();
        assert_eq!(data.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn resolves_negative_indices() {
        let data = parse_obj(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n",
        )
        .unwrap();
        assert_eq!(data.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn carries_normals_only_when_every_corner_has_one() {
        let with = parse_obj(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        )
        .unwrap();
        assert_eq!(with.normals.len(), 3);

        let without = parse_obj(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3\n",
        )
        .unwrap();
        assert!(without.normals.is_empty());
    }

    #[test]
    fn material_records_resolve_to_a_diffuse_map() {
        let obj = "# station hull\nmtllib station.mtl\nv 0 0 0\n";
        assert_eq!(first_record(obj, "mtllib"), Some("station.mtl"));

        let mtl = "newmtl hull\nKd 1 1 1\nmap_Kd hull.png # diffuse\n";
        assert_eq!(first_record(mtl, "map_Kd"), Some("hull.png"));

        assert_eq!(first_record("v 0 0 0\nf 1 2 3\n", "mtllib"), None);
        assert_eq!(first_record("mtllib\n", "mtllib"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_obj("v 0 0\n").is_err());
        assert!(parse_obj("v 0 0 0\nf 1 2 3\n").is_err());
        assert!(parse_obj("").is_err());
    }
}
