use std::ffi::CStr;

/// Run an OpenGL call with error checking around it.
///
/// Pending errors are drained before the call, every error raised by
/// the call is logged together with the call site. The caller must be
/// in an `unsafe` context since the wrapped expression is an OpenGL
/// call.
#[macro_export]
macro_rules! gl_call {
    ($call:expr) => {{
        $crate::gpu_utils::clear_errors();
        let res = $call;
        $crate::gpu_utils::log_errors(stringify!($call), file!(), line!());
        res
    }};
}

/// Discard all pending OpenGL errors.
pub fn clear_errors() {
    unsafe { while gl::GetError() != gl::NO_ERROR {} }
}

/// Log all pending OpenGL errors, returns true if there were any.
pub fn log_errors(call: &str, file: &str, line: u32) -> bool {
    let mut had_error = false;
    loop {
        let error = unsafe { gl::GetError() };
        if error == gl::NO_ERROR {
            break;
        }
        had_error = true;
        log::error!(
            "[OpenGL Error] ({}, {:#06x}): {} {}:{}",
            error_name(error),
            error,
            call,
            file,
            line
        );
    }
    had_error
}

pub fn error_name(error: gl::types::GLenum) -> &'static str {
    match error {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown",
    }
}

/// Binding points that can be queried for the currently active
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    ArrayBuffer,
    ElementArrayBuffer,
    VertexArray,
    Program,
    Texture2D,
}

impl Binding {
    fn query_enum(self) -> gl::types::GLenum {
        match self {
            Binding::ArrayBuffer => gl::ARRAY_BUFFER_BINDING,
            Binding::ElementArrayBuffer => gl::ELEMENT_ARRAY_BUFFER_BINDING,
            Binding::VertexArray => gl::VERTEX_ARRAY_BINDING,
            Binding::Program => gl::CURRENT_PROGRAM,
            Binding::Texture2D => gl::TEXTURE_BINDING_2D,
        }
    }
}

/// Id of the object currently bound to `binding`, 0 if nothing is
/// bound.
pub fn bound_id(binding: Binding) -> gl::types::GLuint {
    let mut id: gl::types::GLint = 0;
    unsafe {
        gl::GetIntegerv(binding.query_enum(), &mut id);
    }
    id as gl::types::GLuint
}

/// Blend using the source alpha, textures with transparency need
/// this.
pub fn enable_alpha_blending() {
    unsafe {
        gl_call!(gl::Enable(gl::BLEND));
        gl_call!(gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA));
    }
}

fn get_string(name: gl::types::GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::from("<unavailable>");
        }
        CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
    }
}

/// Log the version and vendor information of the current context.
pub fn log_context_info() {
    log::info!("OpenGL {}", get_string(gl::VERSION));
    log::info!(
        "renderer: {}, vendor: {}, glsl: {}",
        get_string(gl::RENDERER),
        get_string(gl::VENDOR),
        get_string(gl::SHADING_LANGUAGE_VERSION)
    );
}
