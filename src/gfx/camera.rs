use glam::{Mat4, Vec3};

/// Fly camera. The view matrix is cached and rebuilt lazily when any of the
/// pose fields change.
#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec3,
    front: Vec3,
    up: Vec3,
    pitch: f32,
    yaw: f32,

    mtx: Mat4,
    dirty: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Creation Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn new() -> Self {
        // Start on the +Z axis looking at the origin (yaw -90 deg is -Z).
        Self {
            pos: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            pitch: 0.0f32,
            yaw: -90.0f32,

            mtx: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self.dirty = true;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self.dirty = true;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-89.0, 89.0);
        self.dirty = true;
        self
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Usability Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn move_forward(&mut self, amount: f32) {
        self.pos += amount * self.front;
        self.dirty = true;
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.pos -= amount * self.front;
        self.dirty = true;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.pos += self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.pos -= self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.pos.y += amount;
        self.dirty = true;
    }

    pub fn move_down(&mut self, amount: f32) {
        self.pos.y -= amount;
        self.dirty = true;
    }

    pub fn move_pitch(&mut self, amount: f32) {
        self.pitch = (self.pitch + amount).clamp(-89.0, 89.0);
        self.dirty = true;
    }

    pub fn move_yaw(&mut self, amount: f32) {
        self.yaw += amount;
        self.dirty = true;
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Get / Set Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn get_mtx(&mut self) -> Mat4 {
        if self.dirty {
            self.calc_mtx();
        }

        self.mtx
    }

    pub fn get_pos(&self) -> Vec3 {
        self.pos
    }

    pub fn get_front(&self) -> Vec3 {
        self.front
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Internal Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    fn calc_mtx(&mut self) {
        self.front = Vec3::new(
            self.yaw.to_radians().cos() * self.pitch.to_radians().cos(),
            self.pitch.to_radians().sin(),
            self.yaw.to_radians().sin() * self.pitch.to_radians().cos(),
        )
        .normalize();

        self.mtx = Mat4::look_at_rh(self.pos, self.pos + self.front, self.up);

        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let mut cam = Camera::new();
        let view = cam.get_mtx();
        // The origin sits 3 units in front of the camera.
        let origin = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x).abs() < 1e-5);
        assert!((origin.y).abs() < 1e-5);
        assert!((origin.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = Camera::new();
        cam.move_pitch(200.0);
        cam.get_mtx();
        assert!(cam.get_front().y < 1.0);
        assert!(cam.get_front().y > 0.9);
    }
}
