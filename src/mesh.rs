//! Hardcoded cube geometry

use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to create GL object: {0}")]
    CreateResource(String),
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

const fn v(pos: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex { pos, uv }
}

/// Unit cube centered on the origin, two triangles per face.
pub const CUBE_VERTICES: [Vertex; 36] = [
    // back face
    v([-0.5, -0.5, -0.5], [0.0, 0.0]),
    v([0.5, -0.5, -0.5], [1.0, 0.0]),
    v([0.5, 0.5, -0.5], [1.0, 1.0]),
    v([0.5, 0.5, -0.5], [1.0, 1.0]),
    v([-0.5, 0.5, -0.5], [0.0, 1.0]),
    v([-0.5, -0.5, -0.5], [0.0, 0.0]),
    // front face
    v([-0.5, -0.5, 0.5], [0.0, 0.0]),
    v([0.5, -0.5, 0.5], [1.0, 0.0]),
    v([0.5, 0.5, 0.5], [1.0, 1.0]),
    v([0.5, 0.5, 0.5], [1.0, 1.0]),
    v([-0.5, 0.5, 0.5], [0.0, 1.0]),
    v([-0.5, -0.5, 0.5], [0.0, 0.0]),
    // left face
    v([-0.5, 0.5, 0.5], [1.0, 0.0]),
    v([-0.5, 0.5, -0.5], [1.0, 1.0]),
    v([-0.5, -0.5, -0.5], [0.0, 1.0]),
    v([-0.5, -0.5, -0.5], [0.0, 1.0]),
    v([-0.5, -0.5, 0.5], [0.0, 0.0]),
    v([-0.5, 0.5, 0.5], [1.0, 0.0]),
    // right face
    v([0.5, 0.5, 0.5], [1.0, 0.0]),
    v([0.5, 0.5, -0.5], [1.0, 1.0]),
    v([0.5, -0.5, -0.5], [0.0, 1.0]),
    v([0.5, -0.5, -0.5], [0.0, 1.0]),
    v([0.5, -0.5, 0.5], [0.0, 0.0]),
    v([0.5, 0.5, 0.5], [1.0, 0.0]),
    // bottom face
    v([-0.5, -0.5, -0.5], [0.0, 1.0]),
    v([0.5, -0.5, -0.5], [1.0, 1.0]),
    v([0.5, -0.5, 0.5], [1.0, 0.0]),
    v([0.5, -0.5, 0.5], [1.0, 0.0]),
    v([-0.5, -0.5, 0.5], [0.0, 0.0]),
    v([-0.5, -0.5, -0.5], [0.0, 1.0]),
    // top face
    v([-0.5, 0.5, -0.5], [0.0, 1.0]),
    v([0.5, 0.5, -0.5], [1.0, 1.0]),
    v([0.5, 0.5, 0.5], [1.0, 0.0]),
    v([0.5, 0.5, 0.5], [1.0, 0.0]),
    v([-0.5, 0.5, 0.5], [0.0, 0.0]),
    v([-0.5, 0.5, -0.5], [0.0, 1.0]),
];

/// VAO + VBO holding [`CUBE_VERTICES`]. Attribute 0 is position,
/// attribute 1 is texture coordinates.
pub struct CubeMesh {
    gl: Rc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

impl CubeMesh {
    pub fn new(gl: Rc<glow::Context>) -> Result<Self, MeshError> {
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(MeshError::CreateResource)?;
            gl.bind_vertex_array(Some(vao));
            let vbo = gl.create_buffer().map_err(MeshError::CreateResource)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&CUBE_VERTICES),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<Vertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 12);

            Ok(Self {
                gl,
                vao,
                vbo,
                vertex_count: CUBE_VERTICES.len() as i32,
            })
        }
    }

    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
        }
    }
}

impl Drop for CubeMesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
