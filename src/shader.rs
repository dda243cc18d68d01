//! Shader program wrapper
//!
//! Compiles a vertex/fragment source pair, links it, and exposes typed
//! uniform setters. A `ShaderProgram` only exists in the linked state:
//! every failure path returns an error and releases whatever GL objects
//! were created up to that point.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;
use thiserror::Error;

/// One independently compiled unit of GLSL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "VERTEX"),
            ShaderStage::Fragment => write!(f, "FRAGMENT"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read {stage} shader source from {path}: {source}")]
    SourceRead {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader source is empty")]
    EmptySource { stage: ShaderStage },

    #[error("failed to create GL object: {0}")]
    CreateResource(String),

    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program linking failed:\n{log}")]
    Link { log: String },
}

/// Reads one stage's source text. Empty files fail here rather than being
/// handed to the compiler as an empty string.
pub fn load_stage_source(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    let text = fs::read_to_string(path).map_err(|source| ShaderError::SourceRead {
        stage,
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(ShaderError::EmptySource { stage });
    }
    Ok(text)
}

/// A linked GL program. Exclusive owner of the underlying program object;
/// dropping it deletes the program.
pub struct ShaderProgram {
    gl: Rc<glow::Context>,
    program: glow::Program,
}

impl ShaderProgram {
    /// Reads both stage sources from disk, then compiles and links them.
    pub fn from_files(
        gl: Rc<glow::Context>,
        vert_path: impl AsRef<Path>,
        frag_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vert_src = load_stage_source(ShaderStage::Vertex, vert_path.as_ref())?;
        let frag_src = load_stage_source(ShaderStage::Fragment, frag_path.as_ref())?;
        Self::from_source(gl, &vert_src, &frag_src)
    }

    /// Compiles each stage independently, then links. Stage objects are
    /// deleted once the link has run, whether or not it succeeded.
    pub fn from_source(
        gl: Rc<glow::Context>,
        vert_src: &str,
        frag_src: &str,
    ) -> Result<Self, ShaderError> {
        for (stage, src) in [
            (ShaderStage::Vertex, vert_src),
            (ShaderStage::Fragment, frag_src),
        ] {
            if src.trim().is_empty() {
                return Err(ShaderError::EmptySource { stage });
            }
        }

        unsafe {
            let vs = compile_stage(&gl, ShaderStage::Vertex, vert_src)?;
            let fs = match compile_stage(&gl, ShaderStage::Fragment, frag_src) {
                Ok(fs) => fs,
                Err(e) => {
                    gl.delete_shader(vs);
                    return Err(e);
                }
            };

            let program = match gl.create_program() {
                Ok(p) => p,
                Err(e) => {
                    gl.delete_shader(vs);
                    gl.delete_shader(fs);
                    return Err(ShaderError::CreateResource(e));
                }
            };
            gl.attach_shader(program, vs);
            gl.attach_shader(program, fs);
            gl.link_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            log::debug!("linked shader program {program:?}");
            Ok(Self { gl, program })
        }
    }

    /// Makes this program the active one for subsequent draw calls.
    pub fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    /// Resolves a uniform name within this program. `None` when the name
    /// is absent (misspelled, or optimized out by the compiler).
    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(self.program, name) }
    }

    // Uniform setters write through the context to the currently bound
    // program, matching GL semantics; callers bind() before setting.
    // An unresolved name makes the call a no-op.

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    pub fn set_int(&self, name: &str, value: i32) {
        unsafe { self.gl.uniform_1_i32(self.location(name).as_ref(), value) };
    }

    pub fn set_float(&self, name: &str, value: f32) {
        unsafe { self.gl.uniform_1_f32(self.location(name).as_ref(), value) };
    }

    pub fn set_vec2(&self, name: &str, v: Vec2) {
        unsafe { self.gl.uniform_2_f32(self.location(name).as_ref(), v.x, v.y) };
    }

    pub fn set_vec3(&self, name: &str, v: Vec3) {
        unsafe { self.gl.uniform_3_f32(self.location(name).as_ref(), v.x, v.y, v.z) };
    }

    pub fn set_vec4(&self, name: &str, v: Vec4) {
        unsafe {
            self.gl
                .uniform_4_f32(self.location(name).as_ref(), v.x, v.y, v.z, v.w)
        };
    }

    // Matrices upload column-major, no transposition.

    pub fn set_mat2(&self, name: &str, m: &Mat2) {
        unsafe {
            self.gl
                .uniform_matrix_2_f32_slice(self.location(name).as_ref(), false, &m.to_cols_array())
        };
    }

    pub fn set_mat3(&self, name: &str, m: &Mat3) {
        unsafe {
            self.gl
                .uniform_matrix_3_f32_slice(self.location(name).as_ref(), false, &m.to_cols_array())
        };
    }

    pub fn set_mat4(&self, name: &str, m: &Mat4) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(self.location(name).as_ref(), false, &m.to_cols_array())
        };
    }

    /// Reads a mat4 uniform back from program storage. Introspection for
    /// tests and debugging; `None` when the name does not resolve.
    pub fn uniform_mat4(&self, name: &str) -> Option<Mat4> {
        let loc = self.location(name)?;
        let mut cols = [0.0f32; 16];
        unsafe { self.gl.get_uniform_f32(self.program, &loc, &mut cols) };
        Some(Mat4::from_cols_array(&cols))
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) };
    }
}

unsafe fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    src: &str,
) -> Result<glow::Shader, ShaderError> {
    let shader = gl
        .create_shader(stage.gl_kind())
        .map_err(ShaderError::CreateResource)?;
    gl.shader_source(shader, src);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_tags() {
        assert_eq!(ShaderStage::Vertex.to_string(), "VERTEX");
        assert_eq!(ShaderStage::Fragment.to_string(), "FRAGMENT");
    }

    #[test]
    fn compile_error_names_the_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:3: syntax error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("VERTEX"), "got: {msg}");
        assert!(msg.contains("syntax error"), "got: {msg}");
    }

    // set_mat4 uploads to_cols_array with transpose = false, so the array
    // layout has to be column-major for GLSL to see the same matrix.
    #[test]
    fn mat4_cols_array_is_column_major() {
        let m = Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0));
        let cols = m.to_cols_array();
        assert_eq!(&cols[12..15], &[7.0, 8.0, 9.0]);

        let identity = Mat4::IDENTITY.to_cols_array();
        for (i, v) in identity.iter().enumerate() {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(*v, expected, "element {i}");
        }
    }

    #[test]
    fn mat4_round_trips_through_cols_array() {
        let m = Mat4::perspective_rh_gl(1.0, 1.5, 0.1, 100.0);
        assert_eq!(Mat4::from_cols_array(&m.to_cols_array()), m);
    }
}
