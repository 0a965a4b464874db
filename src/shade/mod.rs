//! Pure shading math for the disc sprites.
//!
//! Everything in here is stateless and side-effect free. The GLSL programs in
//! `src/shaders/` mirror these functions one-to-one so the CPU side can be
//! tested directly and used for previews.

pub mod falloff;
pub mod quad;

pub use falloff::{fragment_shade, FalloffMode};
pub use quad::{corner_texcoord, vertex_shade, TexcoordSource, QUAD_CORNERS};
