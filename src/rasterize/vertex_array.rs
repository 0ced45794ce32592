use std::convert::TryInto;

use super::{take_handle, GpuError, Rasterize, VertexBuffer, VertexBufferLayout};

/// Vertex array object, records which buffers feed which attribute
/// locations.
#[derive(Debug)]
pub struct VertexArray {
    id: Option<gl::types::GLuint>,
    num_attributes: usize,
}

impl VertexArray {
    pub fn new() -> Result<Self, GpuError> {
        let mut id = 0;
        unsafe {
            gl_call!(gl::GenVertexArrays(1, &mut id));
        }
        if id == 0 {
            return Err(GpuError::HandleCreation("vertex array"));
        }

        Ok(Self {
            id: Some(id),
            num_attributes: 0,
        })
    }

    /// Attach `buffer` using `layout`. Element `i` of the layout
    /// feeds attribute location `i` after any attributes added by
    /// previous calls.
    pub fn add_buffer(&mut self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let stride: gl::types::GLsizei = layout.stride().try_into().unwrap();
        for (offset, element) in layout.offsets() {
            let location: gl::types::GLuint = self.num_attributes.try_into().unwrap();
            let count: gl::types::GLint = element.count.try_into().unwrap();
            let ty = element.element_type;
            unsafe {
                gl_call!(gl::EnableVertexAttribArray(location));
                if ty.is_integer() {
                    gl_call!(gl::VertexAttribIPointer(
                        location,
                        count,
                        ty.gl_enum(),
                        stride,
                        offset as *const gl::types::GLvoid,
                    ));
                } else {
                    gl_call!(gl::VertexAttribPointer(
                        location,
                        count,
                        ty.gl_enum(),
                        if ty.normalized() { gl::TRUE } else { gl::FALSE },
                        stride,
                        offset as *const gl::types::GLvoid,
                    ));
                }
            }
            self.num_attributes += 1;
        }
    }

    pub fn bind(&self) {
        if let Some(id) = self.id {
            unsafe {
                gl_call!(gl::BindVertexArray(id));
            }
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl_call!(gl::BindVertexArray(0));
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id.unwrap_or(0)
    }

    /// Number of enabled attribute locations.
    pub fn num_attributes(&self) -> usize {
        self.num_attributes
    }
}

impl Rasterize for VertexArray {
    fn cleanup_opengl(&mut self) {
        if let Some(id) = take_handle(&mut self.id) {
            unsafe {
                gl::DeleteVertexArrays(1, &id);
            }
        }
    }

    fn is_alive(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}
