use std::convert::TryInto;

use super::{take_handle, GpuError, Rasterize};

/// List of `u32` vertex indices (`GL_ELEMENT_ARRAY_BUFFER`) used for
/// indexed draws.
#[derive(Debug)]
pub struct IndexBuffer {
    id: Option<gl::types::GLuint>,
    count: usize,
}

impl IndexBuffer {
    pub fn new(indices: &[gl::types::GLuint]) -> Result<Self, GpuError> {
        let size = std::mem::size_of_val(indices);
        let gl_size: gl::types::GLsizeiptr = size.try_into().map_err(|_| GpuError::TooLarge {
            what: "index buffer",
            size,
        })?;

        let mut id = 0;
        unsafe {
            gl_call!(gl::GenBuffers(1, &mut id));
        }
        if id == 0 {
            return Err(GpuError::HandleCreation("index buffer"));
        }

        unsafe {
            gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id));
            gl_call!(gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                gl_size,
                indices.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW,
            ));
        }

        Ok(Self {
            id: Some(id),
            count: indices.len(),
        })
    }

    pub fn bind(&self) {
        if let Some(id) = self.id {
            unsafe {
                gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id));
            }
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0));
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id.unwrap_or(0)
    }

    /// Number of indices.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Rasterize for IndexBuffer {
    fn cleanup_opengl(&mut self) {
        if let Some(id) = take_handle(&mut self.id) {
            unsafe {
                gl::DeleteBuffers(1, &id);
            }
        }
    }

    fn is_alive(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}
