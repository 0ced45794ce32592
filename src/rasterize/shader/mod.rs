use std::convert::TryInto;
use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};

use crate::glm;

use super::{take_handle, Rasterize};

pub mod source;
pub mod uniforms;

pub use source::ShaderProgramSource;
pub use uniforms::{UniformCache, INVALID_LOCATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not read shader {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no {0} section in shader source")]
    MissingStage(ShaderStage),
    #[error("{0} shader source contains a nul byte")]
    InvalidSource(ShaderStage),
    #[error("driver returned no handle when creating {0} shader")]
    HandleCreation(&'static str),
    #[error("{stage} shader compile error with log: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program link error with log: {0}")]
    Link(String),
}

fn get_shader_error_log(shader: gl::types::GLuint) -> String {
    let mut max_length = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut max_length);
    }

    let mut log: Vec<u8> = vec![0; max_length.max(0).try_into().unwrap_or(0)];
    let mut length = 0;
    unsafe {
        gl::GetShaderInfoLog(
            shader,
            max_length,
            &mut length,
            log.as_mut_ptr() as *mut gl::types::GLchar,
        );
    }
    log.truncate(length.max(0).try_into().unwrap_or(0));

    String::from_utf8_lossy(&log).to_string()
}

fn get_program_error_log(program: gl::types::GLuint) -> String {
    let mut max_length = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut max_length);
    }

    let mut log: Vec<u8> = vec![0; max_length.max(0).try_into().unwrap_or(0)];
    let mut length = 0;
    unsafe {
        gl::GetProgramInfoLog(
            program,
            max_length,
            &mut length,
            log.as_mut_ptr() as *mut gl::types::GLchar,
        );
    }
    log.truncate(length.max(0).try_into().unwrap_or(0));

    String::from_utf8_lossy(&log).to_string()
}

fn compile_shader(stage: ShaderStage, code: &str) -> Result<gl::types::GLuint, ShaderError> {
    let code = CString::new(code).map_err(|_| ShaderError::InvalidSource(stage))?;

    let shader = unsafe { gl_call!(gl::CreateShader(stage.gl_enum())) };
    if shader == 0 {
        return Err(ShaderError::HandleCreation(match stage {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }));
    }

    unsafe {
        gl_call!(gl::ShaderSource(shader, 1, &code.as_ptr(), std::ptr::null()));
        gl_call!(gl::CompileShader(shader));
    }

    let mut success: gl::types::GLint = -10;
    unsafe {
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    }
    if success != <u8 as Into<i32>>::into(gl::TRUE) {
        let log = get_shader_error_log(shader);
        log::error!("{} shader didn't compile", stage);
        unsafe {
            gl::DeleteShader(shader);
        }
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct Shader {
    program_id: Option<gl::types::GLuint>,
    path: Option<PathBuf>,
    uniform_cache: UniformCache,
}

impl Shader {
    /// Load a combined shader file, see [`ShaderProgramSource`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Shader, ShaderError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut shader = Self::from_source(&ShaderProgramSource::parse(&code)?)?;
        shader.path = Some(path.to_path_buf());
        log::debug!(
            "{}: uniforms: {:?} attributes: {:?}",
            path.display(),
            shader.active_uniforms(),
            shader.active_attributes(),
        );
        Ok(shader)
    }

    pub fn from_source(source: &ShaderProgramSource) -> Result<Shader, ShaderError> {
        Self::from_strings(&source.vertex, &source.fragment)
    }

    pub fn from_strings(vertex_code: &str, fragment_code: &str) -> Result<Shader, ShaderError> {
        let vertex_shader = compile_shader(ShaderStage::Vertex, vertex_code)?;
        let fragment_shader = match compile_shader(ShaderStage::Fragment, fragment_code) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe {
                    gl::DeleteShader(vertex_shader);
                }
                return Err(err);
            }
        };

        let shader_program = unsafe { gl_call!(gl::CreateProgram()) };
        if shader_program == 0 {
            unsafe {
                gl::DeleteShader(vertex_shader);
                gl::DeleteShader(fragment_shader);
            }
            return Err(ShaderError::HandleCreation("program"));
        }

        unsafe {
            gl_call!(gl::AttachShader(shader_program, vertex_shader));
            gl_call!(gl::AttachShader(shader_program, fragment_shader));
            gl_call!(gl::LinkProgram(shader_program));
            gl_call!(gl::ValidateProgram(shader_program));

            // the program keeps the compiled stages alive
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
        }

        let mut success: gl::types::GLint = -10;
        unsafe {
            gl::GetProgramiv(shader_program, gl::LINK_STATUS, &mut success);
        }
        if success != <u8 as Into<i32>>::into(gl::TRUE) {
            let log = get_program_error_log(shader_program);
            log::error!("program not linked");
            unsafe {
                gl::DeleteProgram(shader_program);
            }
            return Err(ShaderError::Link(log));
        }

        Ok(Shader {
            program_id: Some(shader_program),
            path: None,
            uniform_cache: UniformCache::new(),
        })
    }

    pub fn bind(&self) {
        if let Some(id) = self.program_id {
            unsafe {
                gl_call!(gl::UseProgram(id));
            }
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl_call!(gl::UseProgram(0));
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.program_id.unwrap_or(0)
    }

    /// File the program was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn uniform_cache(&self) -> &UniformCache {
        &self.uniform_cache
    }

    /// Cached location of the uniform `name`.
    pub fn uniform_location(&mut self, name: &str) -> gl::types::GLint {
        let program_id = self.id();
        self.uniform_cache
            .location(name, |name| Self::query_uniform_location(program_id, name))
    }

    /// Location of the uniform `name` straight from the driver,
    /// bypassing the cache.
    pub fn query_uniform_location(program_id: gl::types::GLuint, name: &str) -> gl::types::GLint {
        match CString::new(name) {
            Ok(name) => unsafe { gl_call!(gl::GetUniformLocation(program_id, name.as_ptr())) },
            Err(_) => INVALID_LOCATION,
        }
    }

    // Setters act on the currently bound program, bind() first.

    pub fn set_uniform_1i(&mut self, name: &str, value: gl::types::GLint) {
        let location = self.uniform_location(name);
        unsafe {
            gl_call!(gl::Uniform1i(location, value));
        }
    }

    pub fn set_uniform_1f(&mut self, name: &str, value: gl::types::GLfloat) {
        let location = self.uniform_location(name);
        unsafe {
            gl_call!(gl::Uniform1f(location, value));
        }
    }

    pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        let location = self.uniform_location(name);
        unsafe {
            gl_call!(gl::Uniform4f(location, v0, v1, v2, v3));
        }
    }

    pub fn set_uniform_vec4(&mut self, name: &str, value: &glm::Vec4) {
        self.set_uniform_4f(name, value[0], value[1], value[2], value[3]);
    }

    pub fn set_uniform_mat4(&mut self, name: &str, value: &glm::Mat4) {
        let location = self.uniform_location(name);
        unsafe {
            gl_call!(gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()));
        }
    }

    pub fn active_attributes(&self) -> Vec<String> {
        self.active_names(gl::ACTIVE_ATTRIBUTES, gl::GetActiveAttrib)
    }

    pub fn active_uniforms(&self) -> Vec<String> {
        self.active_names(gl::ACTIVE_UNIFORMS, gl::GetActiveUniform)
    }

    fn active_names(
        &self,
        count_enum: gl::types::GLenum,
        get_active: unsafe fn(
            gl::types::GLuint,
            gl::types::GLuint,
            gl::types::GLsizei,
            *mut gl::types::GLsizei,
            *mut gl::types::GLint,
            *mut gl::types::GLenum,
            *mut gl::types::GLchar,
        ),
    ) -> Vec<String> {
        const MAX_LENGTH: usize = 100;
        let mut names = Vec::new();
        let program_id = match self.program_id {
            Some(id) => id,
            None => return names,
        };

        let mut count: gl::types::GLint = 0;
        unsafe {
            gl::GetProgramiv(program_id, count_enum, &mut count);
        }

        for i in 0..count.max(0) as gl::types::GLuint {
            let mut name = [0 as gl::types::GLchar; MAX_LENGTH];
            let mut length: gl::types::GLsizei = 0;
            let mut size: gl::types::GLint = 0;
            let mut var_type: gl::types::GLenum = gl::NONE;
            unsafe {
                get_active(
                    program_id,
                    i,
                    MAX_LENGTH as gl::types::GLsizei,
                    &mut length,
                    &mut size,
                    &mut var_type,
                    name.as_mut_ptr(),
                );
                names.push(
                    CStr::from_ptr(name.as_ptr())
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        }

        names
    }
}

impl Rasterize for Shader {
    fn cleanup_opengl(&mut self) {
        if let Some(id) = take_handle(&mut self.program_id) {
            unsafe {
                gl::DeleteProgram(id);
            }
        }
    }

    fn is_alive(&self) -> bool {
        self.program_id.is_some()
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}
