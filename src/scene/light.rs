use glam::{Vec3, Vec4};

/// A light source. The homogeneous `w` of the position selects the
/// kind: `w == 0` is a directional light (the xyz is the travel
/// direction of the rays), anything else a point light. The renderer
/// switches volume extrusion and cap drawing on this.
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub position: Vec4,
    pub color: Vec3,
}

impl Light {
    pub fn point(pos: Vec3, color: Vec3) -> Self {
        Self {
            position: pos.extend(1.0),
            color,
        }
    }

    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self {
            position: direction.extend(0.0),
            color,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }
}

/// The lights that actually render this frame. Lights beyond the cap
/// are skipped outright, an operator-controlled degradation rather
/// than an error.
pub fn visible_lights(lights: &[Light], max_visible: usize) -> &[Light] {
    &lights[..lights.len().min(max_visible)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_count_cap() {
        let lights = vec![
            Light::point(Vec3::ZERO, Vec3::ONE),
            Light::point(Vec3::X, Vec3::ONE),
            Light::point(Vec3::Y, Vec3::ONE),
        ];
        assert_eq!(visible_lights(&lights, 1).len(), 1);
        assert_eq!(visible_lights(&lights, 3).len(), 3);
        assert_eq!(visible_lights(&lights, 99).len(), 3);
        assert_eq!(visible_lights(&lights, 0).len(), 0);
    }

    #[test]
    fn kind_from_homogeneous_w() {
        assert!(!Light::point(Vec3::ONE, Vec3::ONE).is_directional());
        assert!(Light::directional(Vec3::Y, Vec3::ONE).is_directional());
    }
}
