use core::fmt;
use std::error::Error;

use eframe::glow;
use glam::{Mat4, Vec4};

#[allow(dead_code)]
pub enum ShaderUniformTypes<'a> {
    Mat4(&'a Mat4),
    Vec4(&'a Vec4),
    F32(f32),
    I32(i32),
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     Errors Arrising when building a program                                       //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub enum ShaderError {
    CreateProgram(String),
    CreateShader(String),
    Compile { stage: &'static str, log: String },
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateProgram(e) => write!(f, "Could not create a program: {e}"),
            Self::CreateShader(e) => write!(f, "Could not create a shader: {e}"),
            Self::Compile { stage, log } => write!(f, "Failed to compile {stage} shader:\n{log}"),
            Self::Link(log) => write!(f, "Failed to link program:\n{log}"),
        }
    }
}

impl Error for ShaderError {}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Program Wrapper                                                     //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
#[repr(C)]
pub struct Shader(glow::Program);

impl Shader {
    pub fn from_src(gl: &glow::Context, vtx: &str, frag: &str) -> Result<Self, ShaderError> {
        use glow::HasContext as _;

        unsafe {
            let program = gl.create_program().map_err(ShaderError::CreateProgram)?;

            let shader_sources = [
                (glow::VERTEX_SHADER, "vertex", vtx),
                (glow::FRAGMENT_SHADER, "fragment", frag),
            ];

            let mut shaders = Vec::with_capacity(shader_sources.len());

            for (shader_type, stage, shader_source) in shader_sources {
                let shader = gl
                    .create_shader(shader_type)
                    .map_err(ShaderError::CreateShader)?;
                gl.shader_source(shader, shader_source);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    return Err(ShaderError::Compile {
                        stage,
                        log: gl.get_shader_info_log(shader),
                    });
                }
                gl.attach_shader(program, shader);
                shaders.push(shader);
            }

            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                return Err(ShaderError::Link(gl.get_program_info_log(program)));
            }

            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            Ok(Self(program))
        }
    }

    pub fn set_uniform(&self, gl: &glow::Context, name: &str, uniform: ShaderUniformTypes) {
        unsafe {
            use glow::HasContext as _;
            match uniform {
                ShaderUniformTypes::Mat4(uniform) => {
                    gl.uniform_matrix_4_f32_slice(
                        gl.get_uniform_location(self.0, name).as_ref(),
                        false,
                        &uniform.to_cols_array(),
                    );
                }
                ShaderUniformTypes::Vec4(uniform) => {
                    gl.uniform_4_f32_slice(
                        gl.get_uniform_location(self.0, name).as_ref(),
                        &uniform.to_array(),
                    );
                }
                ShaderUniformTypes::F32(uniform) => {
                    gl.uniform_1_f32(gl.get_uniform_location(self.0, name).as_ref(), uniform);
                }
                ShaderUniformTypes::I32(uniform) => {
                    gl.uniform_1_i32(gl.get_uniform_location(self.0, name).as_ref(), uniform);
                }
            }
        }
    }

    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.use_program(Some(self.0));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.delete_program(self.0);
        }
    }
}
