#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Vertex {
    pub pos: glam::Vec3,
    pub texcoord: glam::Vec2,
}

impl Vertex {
    pub fn new(pos: glam::Vec3, texcoord: glam::Vec2) -> Self {
        Self { pos, texcoord }
    }
}
