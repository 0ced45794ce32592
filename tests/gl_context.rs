//! Checks that need a real OpenGL context. They open a hidden glfw
//! window and are ignored by default, run them with
//! `cargo test -- --ignored` on a machine with a display.

use std::path::Path;

use glfw::Context;

use gl_sandbox::config::AssetPaths;
use gl_sandbox::glm;
use gl_sandbox::gpu_utils::{self, Binding};
use gl_sandbox::rasterize::shader::ShaderProgramSource;
use gl_sandbox::rasterize::{
    IndexBuffer, Rasterize, Renderer, Shader, Texture, VertexArray, VertexBuffer,
    VertexBufferLayout,
};
use gl_sandbox::scene::{Scene, Texture2D};
use gl_sandbox::ui::Overlay;

const SIZE: usize = 16;

const COLOR_SHADER: &str = include_str!("../res/shaders/Color.shader");

fn with_context<F: FnOnce(&mut glfw::Window)>(test: F) {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS).unwrap();
    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::Visible(false));

    let (mut window, _events) = glfw
        .create_window(
            SIZE as u32,
            SIZE as u32,
            "gl_sandbox test",
            glfw::WindowMode::Windowed,
        )
        .expect("window creation failed");
    window.make_current();
    gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

    test(&mut window);
}

/// Offscreen color target so the results do not depend on the
/// hidden window's framebuffer.
struct Target {
    fbo: gl::types::GLuint,
    rbo: gl::types::GLuint,
}

impl Target {
    fn new() -> Self {
        let mut fbo = 0;
        let mut rbo = 0;
        unsafe {
            gl::GenFramebuffers(1, &mut fbo);
            gl::BindFramebuffer(gl::FRAMEBUFFER, fbo);
            gl::GenRenderbuffers(1, &mut rbo);
            gl::BindRenderbuffer(gl::RENDERBUFFER, rbo);
            gl::RenderbufferStorage(gl::RENDERBUFFER, gl::RGBA8, SIZE as _, SIZE as _);
            gl::FramebufferRenderbuffer(
                gl::FRAMEBUFFER,
                gl::COLOR_ATTACHMENT0,
                gl::RENDERBUFFER,
                rbo,
            );
            assert_eq!(
                gl::CheckFramebufferStatus(gl::FRAMEBUFFER),
                gl::FRAMEBUFFER_COMPLETE
            );
            gl::Viewport(0, 0, SIZE as _, SIZE as _);
        }
        Self { fbo, rbo }
    }

    fn read_pixels(&self) -> Vec<u8> {
        let mut pixels = vec![0_u8; SIZE * SIZE * 4];
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.fbo);
            gl::ReadPixels(
                0,
                0,
                SIZE as _,
                SIZE as _,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut gl::types::GLvoid,
            );
        }
        pixels
    }
}

impl Drop for Target {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteRenderbuffers(1, &self.rbo);
            gl::DeleteFramebuffers(1, &self.fbo);
        }
    }
}

fn full_screen_quad() -> (VertexArray, VertexBuffer, IndexBuffer) {
    #[rustfmt::skip]
    let positions: [f32; 8] = [
        -1.0, -1.0,
         1.0, -1.0,
         1.0,  1.0,
        -1.0,  1.0,
    ];
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2);

    let mut vertex_array = VertexArray::new().unwrap();
    let vertex_buffer = VertexBuffer::new(&positions).unwrap();
    vertex_array.add_buffer(&vertex_buffer, &layout);
    let index_buffer = IndexBuffer::new(&[0, 1, 2, 2, 3, 0]).unwrap();
    (vertex_array, vertex_buffer, index_buffer)
}

fn render_with(shader: &mut Shader, target: &Target) -> Vec<u8> {
    let (vertex_array, _vertex_buffer, index_buffer) = full_screen_quad();
    let renderer = Renderer::new();

    renderer.set_clear_color(&glm::vec4(0.0, 0.0, 0.0, 1.0));
    renderer.clear();

    shader.bind();
    shader.set_uniform_mat4("u_MVP", &glm::identity());
    shader.set_uniform_vec4("u_Color", &glm::vec4(0.2, 0.4, 0.6, 1.0));
    renderer.draw(&vertex_array, &index_buffer, shader);

    target.read_pixels()
}

fn handles_and_bindings() {
    let mut vertex_buffer = VertexBuffer::new(&[0.0_f32; 6]).unwrap();
    assert_ne!(vertex_buffer.id(), 0);
    assert_eq!(vertex_buffer.size(), 6 * 4);

    vertex_buffer.bind();
    assert_eq!(gpu_utils::bound_id(Binding::ArrayBuffer), vertex_buffer.id());
    vertex_buffer.unbind();
    assert_eq!(gpu_utils::bound_id(Binding::ArrayBuffer), 0);

    let id = vertex_buffer.id();
    vertex_buffer.cleanup_opengl();
    assert!(!vertex_buffer.is_alive());
    assert_eq!(unsafe { gl::IsBuffer(id) }, gl::FALSE);
    // second release is a no-op, drop at the end of scope is too
    vertex_buffer.cleanup_opengl();
    assert!(!gpu_utils::log_errors("double cleanup", file!(), line!()));

    let vertex_array = VertexArray::new().unwrap();
    vertex_array.bind();
    assert_eq!(gpu_utils::bound_id(Binding::VertexArray), vertex_array.id());

    let index_buffer = IndexBuffer::new(&[0, 1, 2]).unwrap();
    assert_ne!(index_buffer.id(), 0);
    assert_eq!(index_buffer.count(), 3);
    index_buffer.bind();
    assert_eq!(
        gpu_utils::bound_id(Binding::ElementArrayBuffer),
        index_buffer.id()
    );
    vertex_array.unbind();
    assert_eq!(gpu_utils::bound_id(Binding::VertexArray), 0);

    let texture = Texture::from_pixels(2, 1, &[255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    assert_ne!(texture.get_gl_tex(), 0);
    texture.bind(0);
    assert_eq!(gpu_utils::bound_id(Binding::Texture2D), texture.get_gl_tex());
    texture.unbind();
    assert_eq!(gpu_utils::bound_id(Binding::Texture2D), 0);

    let texture_id = texture.get_gl_tex();
    drop(texture);
    assert_eq!(unsafe { gl::IsTexture(texture_id) }, gl::FALSE);

    let vertex_array_id = vertex_array.id();
    drop(vertex_array);
    assert_eq!(unsafe { gl::IsVertexArray(vertex_array_id) }, gl::FALSE);

    let index_buffer_id = index_buffer.id();
    drop(index_buffer);
    assert_eq!(unsafe { gl::IsBuffer(index_buffer_id) }, gl::FALSE);

    let source = ShaderProgramSource::parse(COLOR_SHADER).unwrap();
    let mut shader = Shader::from_source(&source).unwrap();
    let program_id = shader.id();
    shader.cleanup_opengl();
    assert!(!shader.is_alive());
    assert_eq!(unsafe { gl::IsProgram(program_id) }, gl::FALSE);
    drop(shader);
    assert!(!gpu_utils::log_errors("release", file!(), line!()));
}

fn attribute_enabled(location: gl::types::GLuint) -> bool {
    let mut enabled = 0;
    unsafe {
        gl::GetVertexAttribiv(location, gl::VERTEX_ATTRIB_ARRAY_ENABLED, &mut enabled);
    }
    enabled != 0
}

fn attributes_continue_across_buffers() {
    let mut positions = VertexBufferLayout::new();
    positions.push::<f32>(2).push::<f32>(2);
    let mut colors = VertexBufferLayout::new();
    colors.push::<u8>(4);

    let mut vertex_array = VertexArray::new().unwrap();
    let first = VertexBuffer::new(&[0.0_f32; 16]).unwrap();
    let second = VertexBuffer::new(&[0_u8; 16]).unwrap();

    vertex_array.add_buffer(&first, &positions);
    assert_eq!(vertex_array.num_attributes(), 2);
    vertex_array.add_buffer(&second, &colors);
    assert_eq!(vertex_array.num_attributes(), 3);

    vertex_array.bind();
    assert!(attribute_enabled(0));
    assert!(attribute_enabled(1));
    assert!(attribute_enabled(2));
    assert!(!attribute_enabled(3));

    let mut buffer = 0;
    unsafe {
        gl::GetVertexAttribiv(2, gl::VERTEX_ATTRIB_ARRAY_BUFFER_BINDING, &mut buffer);
    }
    assert_eq!(buffer as gl::types::GLuint, second.id());
    vertex_array.unbind();
}

fn blend_func() -> (gl::types::GLint, gl::types::GLint) {
    let mut src = 0;
    let mut dst = 0;
    unsafe {
        gl::GetIntegerv(gl::BLEND_SRC_RGB, &mut src);
        gl::GetIntegerv(gl::BLEND_DST_RGB, &mut dst);
    }
    (src, dst)
}

fn texture_scene_blends_after_overlay(window: &mut glfw::Window) {
    let assets = AssetPaths::new(&Path::new(env!("CARGO_MANIFEST_DIR")).join("res"));
    let mut scene = Texture2D::new(&assets).unwrap();
    let renderer = Renderer::new();
    let mut overlay = Overlay::new(window).unwrap();

    for _ in 0..2 {
        overlay.run(window, |ctx| {
            egui::Window::new("Scenes").show(ctx, |ui| {
                ui.label("overlay");
            });
        });
        // premultiplied blending as left by the egui painter
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFuncSeparate(
                gl::ONE,
                gl::ONE_MINUS_SRC_ALPHA,
                gl::ONE_MINUS_DST_ALPHA,
                gl::ONE,
            );
        }

        scene.on_render(&renderer);
        assert_eq!(unsafe { gl::IsEnabled(gl::BLEND) }, gl::TRUE);
        assert_eq!(
            blend_func(),
            (
                gl::SRC_ALPHA as gl::types::GLint,
                gl::ONE_MINUS_SRC_ALPHA as gl::types::GLint
            )
        );
    }
}

fn cached_uniform_matches_direct_set() {
    let source = ShaderProgramSource::parse(COLOR_SHADER).unwrap();
    let mut shader = Shader::from_source(&source).unwrap();
    assert_ne!(shader.id(), 0);

    shader.bind();
    assert_eq!(gpu_utils::bound_id(Binding::Program), shader.id());

    let direct = Shader::query_uniform_location(shader.id(), "u_Color");
    assert_eq!(shader.uniform_location("u_Color"), direct);
    assert_eq!(shader.uniform_cache().get("u_Color"), Some(direct));

    let read_back = |shader: &Shader| {
        let mut value = [0.0_f32; 4];
        unsafe {
            gl::GetUniformfv(shader.id(), direct, value.as_mut_ptr());
        }
        value
    };

    shader.set_uniform_4f("u_Color", 0.1, 0.2, 0.3, 0.4);
    let cached = read_back(&shader);
    unsafe {
        gl::Uniform4f(direct, 0.1, 0.2, 0.3, 0.4);
    }
    assert_eq!(cached, read_back(&shader));

    shader.unbind();
    assert_eq!(gpu_utils::bound_id(Binding::Program), 0);
}

fn same_source_renders_same_pixels() {
    let target = Target::new();
    let source = ShaderProgramSource::parse(COLOR_SHADER).unwrap();

    let mut first = Shader::from_source(&source).unwrap();
    let first_pixels = render_with(&mut first, &target);
    let mut second = Shader::from_source(&source).unwrap();
    let second_pixels = render_with(&mut second, &target);

    assert_eq!(first_pixels, second_pixels);
    // the quad covers the whole target
    let center: usize = (SIZE / 2 * SIZE + SIZE / 2) * 4;
    assert_eq!(&first_pixels[center..center + 4], &[51, 102, 153, 255]);
    assert!(!gpu_utils::log_errors("render", file!(), line!()));
}

fn compile_errors_are_reported() {
    let err = Shader::from_strings("#version 330 core\nvoid main() { oops }", "").unwrap_err();
    assert!(err.to_string().contains("vertex shader compile error"));

    let mut uniforms = Shader::from_source(&ShaderProgramSource::parse(COLOR_SHADER).unwrap())
        .unwrap()
        .active_uniforms();
    uniforms.sort();
    assert_eq!(uniforms, vec!["u_Color".to_string(), "u_MVP".to_string()]);
}

// glfw must only be driven from a single thread, the checks share one
// context and run one after the other
#[test]
#[ignore]
fn gl_context_properties() {
    with_context(|window| {
        handles_and_bindings();
        attributes_continue_across_buffers();
        cached_uniform_matches_direct_set();
        same_source_renders_same_pixels();
        compile_errors_are_reported();
        texture_scene_blends_after_overlay(window);
    });
}
