use std::{mem::offset_of, ptr::slice_from_raw_parts};

use eframe::glow;
use glam::Vec3;

use crate::{
    gfx::{Model, Shader, Vertex},
    shade::{corner_texcoord, QUAD_CORNERS},
    viewer::Cloud,
};

/// The point cloud expanded into disc quads, plus its GL resources.
///
/// Each point becomes four vertices offset by the quad corners in the
/// model-space XY plane, carrying the corner texcoord, and six element
/// indices forming two triangles.
#[derive(Debug, Clone)]
pub struct DiscModel {
    pub cloud: Cloud,
    half_size: f32,

    verts: Vec<Vertex>,
    elements: Vec<u32>,

    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    ebo: Option<glow::Buffer>,
}

impl DiscModel {
    pub fn new(cloud: Cloud, half_size: f32) -> Self {
        let mut model = Self {
            cloud,
            half_size,
            verts: Vec::new(),
            elements: Vec::new(),
            vao: None,
            vbo: None,
            ebo: None,
        };
        model.rebuild();
        model
    }

    pub fn set_half_size(&mut self, half_size: f32) {
        self.half_size = half_size;
        self.rebuild();
    }

    pub fn set_cloud(&mut self, cloud: Cloud) {
        self.cloud = cloud;
        self.rebuild();
    }

    pub fn step(&mut self, delta: f32) {
        self.cloud.step(delta);
        self.rebuild();
    }

    /// Regenerate the vertex and element arrays from the cloud.
    pub fn rebuild(&mut self) {
        self.verts.clear();
        self.elements.clear();
        self.verts.reserve(self.cloud.len() * 4);
        self.elements.reserve(self.cloud.len() * 6);

        for (point_idx, point) in self.cloud.points().iter().enumerate() {
            for corner_idx in 0..4u32 {
                let corner = QUAD_CORNERS[corner_idx as usize] * self.half_size;
                let pos = Vec3::new(point.x + corner.x, point.y + corner.y, point.z);
                self.verts.push(Vertex::new(pos, corner_texcoord(corner_idx)));
            }

            let p = point_idx as u32 * 4;
            self.elements
                .extend_from_slice(&[p, p + 1, p + 2, p + 2, p + 3, p]);
        }
    }

    pub fn element_count(&self) -> i32 {
        self.elements.len() as i32
    }

    #[cfg(test)]
    fn verts(&self) -> &[Vertex] {
        &self.verts
    }

    #[cfg(test)]
    fn elements(&self) -> &[u32] {
        &self.elements
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                 GL Resources                                                      //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Model for DiscModel {
    fn setup_gl(&mut self, gl: &glow::Context) {
        // Do not setup twice!
        if self.vao.is_some() || self.vbo.is_some() || self.ebo.is_some() {
            panic!("Trying to setup GL Twice");
        }

        unsafe {
            use glow::HasContext as _;

            match gl.create_vertex_array() {
                Ok(vao) => self.vao = Some(vao),
                Err(e) => panic!("{}", e),
            };
            match gl.create_buffer() {
                Ok(vbo) => self.vbo = Some(vbo),
                Err(e) => panic!("{}", e),
            };
            match gl.create_buffer() {
                Ok(ebo) => self.ebo = Some(ebo),
                Err(e) => panic!("{}", e),
            };

            gl.bind_vertex_array(self.vao);

            gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, size_of::<Vertex>() as _, 0);

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                size_of::<Vertex>() as _,
                offset_of!(Vertex, texcoord) as _,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.ebo);

            gl.bind_vertex_array(None);
        }

        self.update_gl(gl);
    }

    fn destroy_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if let (Some(vao), Some(vbo), Some(ebo)) = (self.vao, self.vbo, self.ebo) {
                gl.delete_vertex_array(vao);
                gl.delete_buffer(vbo);
                gl.delete_buffer(ebo);
            }

            self.vao = None;
            self.vbo = None;
            self.ebo = None;
        }
    }

    fn update_gl(&mut self, gl: &glow::Context) {
        if self.vao.is_none() || self.vbo.is_none() || self.ebo.is_none() {
            return;
        }

        unsafe {
            use glow::HasContext as _;

            // The element binding is VAO state, so upload with the VAO bound.
            gl.bind_vertex_array(self.vao);

            // The cloud animates and can be resized, so upload fresh data
            // rather than patching in place.
            let vert_data = slice_from_raw_parts(
                self.verts.as_ptr() as *const u8,
                self.verts.len() * size_of::<Vertex>(),
            )
            .as_ref()
            .unwrap();
            gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vert_data, glow::DYNAMIC_DRAW);

            let element_data = slice_from_raw_parts(
                self.elements.as_ptr() as *const u8,
                self.elements.len() * size_of::<u32>(),
            )
            .as_ref()
            .unwrap();
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.ebo);
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, element_data, glow::DYNAMIC_DRAW);

            gl.bind_vertex_array(None);
        }
    }

    fn draw(&mut self, gl: &glow::Context, shader: &Shader) {
        // All uniforms are set by the app before the draw.
        let _ = shader;

        if self.vao.is_none() || self.elements.is_empty() {
            return;
        }

        unsafe {
            use glow::HasContext as _;

            gl.bind_vertex_array(self.vao);
            gl.draw_elements(
                glow::TRIANGLES,
                self.element_count(),
                glow::UNSIGNED_INT,
                0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_quad_expansion_counts() {
        let model = DiscModel::new(Cloud::new(10), 0.1);
        assert_eq!(model.verts().len(), 40);
        assert_eq!(model.elements().len(), 60);
    }

    #[test]
    fn test_element_pattern() {
        let model = DiscModel::new(Cloud::new(3), 0.1);
        for point_idx in 0..3u32 {
            let p = point_idx * 4;
            let base = point_idx as usize * 6;
            assert_eq!(
                &model.elements()[base..base + 6],
                &[p, p + 1, p + 2, p + 2, p + 3, p]
            );
        }
    }

    #[test]
    fn test_corner_offsets_and_texcoords() {
        let model = DiscModel::new(Cloud::new(5), 0.25);
        for (point_idx, point) in model.cloud.points().iter().enumerate() {
            for corner_idx in 0..4 {
                let vert = model.verts()[point_idx * 4 + corner_idx];
                let corner = QUAD_CORNERS[corner_idx];
                assert_eq!(vert.texcoord, corner);
                assert_eq!(
                    vert.pos,
                    Vec3::new(
                        point.x + corner.x * 0.25,
                        point.y + corner.y * 0.25,
                        point.z
                    )
                );
            }
        }
    }

    #[test]
    fn test_rebuild_follows_half_size() {
        let mut model = DiscModel::new(Cloud::new(1), 0.1);
        let point = model.cloud.points()[0];
        model.set_half_size(0.5);
        let vert = model.verts()[2];
        assert_eq!(vert.texcoord, Vec2::new(1.0, 1.0));
        assert_eq!(vert.pos.x, point.x + 0.5);
        assert_eq!(vert.pos.y, point.y + 0.5);
    }
}
