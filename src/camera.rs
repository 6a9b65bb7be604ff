use glam::{Mat4, Vec3};

/// Orbit camera around a target point.
pub struct Camera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            yaw: 0.0,
            pitch: 20.0,
            distance,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 128.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.target
            + self.distance
                * Vec3::new(
                    pitch.cos() * yaw.sin(),
                    pitch.sin(),
                    pitch.cos() * yaw.cos(),
                )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            aspect,
            self.z_near,
            self.z_far,
        );
        proj * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_orbits_at_distance() {
        let cam = Camera::new(Vec3::ZERO, 10.0);
        assert!((cam.position().length() - 10.0).abs() < 1e-4);

        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), 5.0);
        cam.yaw = 90.0;
        cam.pitch = 0.0;
        let p = cam.position() - cam.target;
        assert!((p - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }
}
