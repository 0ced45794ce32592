use std::convert::TryInto;

use super::{take_handle, GpuError, Rasterize};

/// Vertex data living on the GPU (`GL_ARRAY_BUFFER`).
#[derive(Debug)]
pub struct VertexBuffer {
    id: Option<gl::types::GLuint>,
    size: usize,
}

impl VertexBuffer {
    /// Upload `data` once with `GL_STATIC_DRAW`, the buffer stays
    /// bound afterwards.
    pub fn new<T: Copy>(data: &[T]) -> Result<Self, GpuError> {
        let size = std::mem::size_of_val(data);
        let gl_size: gl::types::GLsizeiptr = size.try_into().map_err(|_| GpuError::TooLarge {
            what: "vertex buffer",
            size,
        })?;

        let mut id = 0;
        unsafe {
            gl_call!(gl::GenBuffers(1, &mut id));
        }
        if id == 0 {
            return Err(GpuError::HandleCreation("vertex buffer"));
        }

        unsafe {
            gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, id));
            gl_call!(gl::BufferData(
                gl::ARRAY_BUFFER,
                gl_size,
                data.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW,
            ));
        }

        log::trace!("vertex buffer {} created with {} bytes", id, size);

        Ok(Self { id: Some(id), size })
    }

    pub fn bind(&self) {
        if let Some(id) = self.id {
            unsafe {
                gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, id));
            }
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, 0));
        }
    }

    /// GPU handle, 0 once released.
    pub fn id(&self) -> gl::types::GLuint {
        self.id.unwrap_or(0)
    }

    /// Size of the uploaded data in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Rasterize for VertexBuffer {
    fn cleanup_opengl(&mut self) {
        if let Some(id) = take_handle(&mut self.id) {
            unsafe {
                gl::DeleteBuffers(1, &id);
            }
            log::trace!("vertex buffer {} deleted", id);
        }
    }

    fn is_alive(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}
