use glfw::{Action, Context, Key, WindowEvent};

use crate::config::Config;
use crate::fps::FrameStats;
use crate::glm;
use crate::gpu_utils;
use crate::rasterize::Renderer;
use crate::scene::SceneMenu;
use crate::ui::{Overlay, OverlayError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to initialize glfw: {0:?}")]
    Init(glfw::InitError),
    #[error("failed to create a {width}x{height} window")]
    WindowCreation { width: u32, height: u32 },
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Open the window and run the frame loop until the window is
/// closed.
pub fn run(config: &Config) -> Result<(), AppError> {
    let mut glfw = glfw::init(glfw::LOG_ERRORS).map_err(AppError::Init)?;

    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let window_config = &config.window;
    let (mut window, events) = glfw
        .create_window(
            window_config.width,
            window_config.height,
            &window_config.title,
            glfw::WindowMode::Windowed,
        )
        .ok_or(AppError::WindowCreation {
            width: window_config.width,
            height: window_config.height,
        })?;

    window.set_key_polling(true);
    window.set_char_polling(true);
    window.set_cursor_pos_polling(true);
    window.set_cursor_enter_polling(true);
    window.set_mouse_button_polling(true);
    window.set_scroll_polling(true);
    window.set_framebuffer_size_polling(true);
    window.make_current();

    glfw.set_swap_interval(if window_config.vsync {
        glfw::SwapInterval::Sync(1)
    } else {
        glfw::SwapInterval::None
    });

    gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
    gpu_utils::log_context_info();

    // everything owning GPU memory is declared after the window so it
    // is dropped while the context is still alive
    let mut overlay = Overlay::new(&mut window)?;
    let renderer = Renderer::new();
    let mut menu = SceneMenu::new(config.assets());
    let mut frame_stats = FrameStats::new();
    let background = glm::vec4(0.0, 0.0, 0.0, 1.0);

    if let Some(kind) = config.start_scene {
        if let Err(err) = menu.open(kind) {
            log::error!("could not open scene {}: {}", kind, err);
        }
    }

    while !window.should_close() {
        glfw.poll_events();
        for (_, event) in glfw::flush_messages(&events) {
            overlay.handle_event(&event);

            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _)
                    if !overlay.wants_keyboard_input() =>
                {
                    window.set_should_close(true)
                }
                WindowEvent::FramebufferSize(width, height) => unsafe {
                    gl_call!(gl::Viewport(0, 0, width, height));
                },
                _ => {}
            }
        }

        let delta_time = frame_stats.update(config.fps_limit);
        menu.on_update(delta_time as f32);

        renderer.set_clear_color(&background);
        renderer.clear();
        menu.on_render(&renderer);

        overlay.run(&window, |ctx| {
            egui::Window::new("Scenes")
                .default_pos(egui::pos2(10.0, 10.0))
                .show(ctx, |ui| {
                    menu.on_ui(ui);
                    ui.separator();
                    ui.label(frame_stats.summary());
                });
        });
        menu.apply_request();

        window.swap_buffers();
    }

    log::info!("window closed");

    Ok(())
}
