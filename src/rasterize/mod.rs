pub mod buffer;
pub mod index_buffer;
pub mod layout;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use buffer::VertexBuffer;
pub use index_buffer::IndexBuffer;
pub use layout::VertexBufferLayout;
pub use renderer::Renderer;
pub use shader::Shader;
pub use texture::Texture;
pub use vertex_array::VertexArray;

/// Any struct that owns OpenGL memory (buffers, vertex arrays,
/// programs, textures) must implement [`Rasterize`] so that the
/// memory is released exactly once.
///
/// The handle is stored as an [`Option`], [`cleanup_opengl()`] frees
/// the GPU side and sets it to [`None`], [`Drop::drop()`] calls
/// [`cleanup_opengl()`]. Calling [`cleanup_opengl()`] more than once
/// is a no-op.
///
/// [`cleanup_opengl()`]: Rasterize::cleanup_opengl
pub trait Rasterize {
    /// Release the GPU side of the object.
    fn cleanup_opengl(&mut self);

    /// True while the GPU handle is still owned.
    fn is_alive(&self) -> bool;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GpuError {
    #[error("driver returned no handle when creating {0}")]
    HandleCreation(&'static str),
    #[error("{what} of {size} bytes does not fit the OpenGL size type")]
    TooLarge { what: &'static str, size: usize },
}

/// Take `handle` out of `slot` if it is still owned. Helper for
/// [`Rasterize::cleanup_opengl()`] implementations.
pub(crate) fn take_handle(slot: &mut Option<gl::types::GLuint>) -> Option<gl::types::GLuint> {
    slot.take().filter(|&id| id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_take_handle_only_once() {
        let mut slot = Some(3);
        assert_eq!(take_handle(&mut slot), Some(3));
        assert_eq!(take_handle(&mut slot), None);
        assert_eq!(slot, None);
    }

    #[test]
    fn rasterize_take_handle_zero_is_not_owned() {
        let mut slot = Some(0);
        assert_eq!(take_handle(&mut slot), None);
    }
}
