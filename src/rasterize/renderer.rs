use std::convert::TryInto;

use crate::glm;

use super::{IndexBuffer, Shader, VertexArray};

/// Issues clears and indexed draws, no batching or state tracking.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn set_clear_color(&self, color: &glm::Vec4) {
        unsafe {
            gl_call!(gl::ClearColor(color[0], color[1], color[2], color[3]));
        }
    }

    pub fn clear(&self) {
        unsafe {
            gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT));
        }
    }

    /// Bind `shader`, `vertex_array` and `index_buffer` then draw
    /// the indexed triangles.
    pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) {
        shader.bind();
        vertex_array.bind();
        index_buffer.bind();

        unsafe {
            gl_call!(gl::DrawElements(
                gl::TRIANGLES,
                index_buffer.count().try_into().unwrap(),
                gl::UNSIGNED_INT,
                std::ptr::null(),
            ));
        }
    }
}
