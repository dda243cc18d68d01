//! glcube - ten spinning textured cubes on glow/glutin
//!
//! # Architecture
//! - **ShaderProgram**: compile + link a vertex/fragment pair, typed uniform setters
//! - **Texture2D**: decode an image file and upload it with mipmaps
//! - **CubeMesh**: hardcoded cube geometry in a VAO/VBO
//! - **GlWindow**: winit window + glutin surface/context + loaded glow
//!
//! All GL work is single-threaded and issued against the context owned by
//! [`GlWindow`]. Resources hold an `Rc` to the glow context and release
//! their GL objects on drop.

pub mod mesh;
pub mod shader;
pub mod texture;
pub mod window;

pub use mesh::{CubeMesh, MeshError, Vertex};
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
pub use texture::{Texture2D, TextureError};
pub use window::GlWindow;
