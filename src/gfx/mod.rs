pub mod camera;
pub mod shader;
pub mod vertex;

pub use shader::Shader;
pub use vertex::Vertex;

use eframe::glow;

/// Anything that owns GL buffers and can be drawn with a [`Shader`].
pub trait Model {
    fn setup_gl(&mut self, gl: &glow::Context);
    fn destroy_gl(&mut self, gl: &glow::Context);

    /// Re-upload CPU-side data after it changed.
    fn update_gl(&mut self, gl: &glow::Context);

    fn draw(&mut self, gl: &glow::Context, shader: &Shader);
}
