use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;

use crate::glm;

pub mod input;

pub use input::EguiInput;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OverlayError {
    #[error("could not create the egui painter: {0}")]
    Painter(String),
}

/// Immediate mode debug UI drawn on top of the scene.
pub struct Overlay {
    ctx: egui::Context,
    painter: egui_glow::Painter,
    input: EguiInput,
    start: Instant,
}

impl Overlay {
    /// The window's context must be current.
    pub fn new(window: &mut glfw::Window) -> Result<Self, OverlayError> {
        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                window.get_proc_address(symbol) as *const _
            })
        };
        let painter = egui_glow::Painter::new(Arc::new(gl), "", None)
            .map_err(|err| OverlayError::Painter(err.to_string()))?;

        Ok(Self {
            ctx: egui::Context::default(),
            painter,
            input: EguiInput::new(),
            start: Instant::now(),
        })
    }

    pub fn handle_event(&mut self, event: &glfw::WindowEvent) {
        self.input.handle_event(event);
    }

    /// True while a widget has keyboard focus, key presses should not
    /// be acted upon by the application.
    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Build the UI with `add_contents` and paint it over the current
    /// framebuffer.
    pub fn run<F>(&mut self, window: &glfw::Window, add_contents: F)
    where
        F: FnOnce(&egui::Context),
    {
        let (width, height) = window.get_size();
        let (framebuffer_width, framebuffer_height) = window.get_framebuffer_size();
        let pixels_per_point = if width > 0 {
            framebuffer_width as f32 / width as f32
        } else {
            1.0
        };

        let raw_input = self.input.take_raw_input(
            egui::vec2(width as f32, height as f32),
            pixels_per_point,
            self.start.elapsed().as_secs_f64(),
        );

        let full_output = self.ctx.run(raw_input, add_contents);
        let clipped_primitives = self.ctx.tessellate(full_output.shapes);

        self.painter.paint_and_update_textures(
            [
                framebuffer_width.max(0) as u32,
                framebuffer_height.max(0) as u32,
            ],
            pixels_per_point,
            &clipped_primitives,
            &full_output.textures_delta,
        );
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.painter.destroy();
    }
}

pub fn color_edit_vec4(ui: &mut egui::Ui, label: &str, color: &mut glm::Vec4) -> egui::Response {
    ui.horizontal(|ui| {
        let mut rgba = [color[0], color[1], color[2], color[3]];
        let response = ui.color_edit_button_rgba_unmultiplied(&mut rgba);
        if response.changed() {
            *color = glm::vec4(rgba[0], rgba[1], rgba[2], rgba[3]);
        }
        ui.label(label);
        response
    })
    .inner
}

/// One slider per component of `value`.
pub fn slider_vec3(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut glm::Vec3,
    range: RangeInclusive<f32>,
) -> bool {
    ui.horizontal(|ui| {
        let mut changed = false;
        for i in 0..3 {
            changed |= ui
                .add(egui::Slider::new(&mut value[i], range.clone()))
                .changed();
        }
        ui.label(label);
        changed
    })
    .inner
}
