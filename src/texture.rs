//! Texture decode + upload

use std::path::{Path, PathBuf};
use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create GL texture: {0}")]
    CreateResource(String),
}

/// A 2D texture uploaded with mipmaps. Owns the GL texture object.
pub struct Texture2D {
    gl: Rc<glow::Context>,
    texture: glow::Texture,
}

impl Texture2D {
    /// Decodes an image file and uploads it as RGBA8. Decode failure is a
    /// typed error so the caller can log it and keep rendering without
    /// the texture.
    pub fn from_file(gl: Rc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = decoded.dimensions();

        let texture = unsafe { gl.create_texture() }.map_err(TextureError::CreateResource)?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::MIRRORED_REPEAT as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::MIRRORED_REPEAT as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(decoded.as_raw()),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
        }

        log::debug!("uploaded texture {} ({width}x{height})", path.display());
        Ok(Self { gl, texture })
    }

    /// Binds this texture to the given texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.texture) };
    }
}
