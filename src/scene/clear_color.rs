use crate::glm;
use crate::rasterize::Renderer;
use crate::ui;

use super::Scene;

/// Clears the framebuffer to an editable color.
#[derive(Debug)]
pub struct ClearColor {
    color: glm::Vec4,
}

impl ClearColor {
    pub fn new() -> Self {
        Self {
            color: glm::vec4(0.2, 0.3, 0.8, 1.0),
        }
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ClearColor {
    fn on_render(&mut self, renderer: &Renderer) {
        renderer.set_clear_color(&self.color);
        renderer.clear();
    }

    fn on_ui(&mut self, ui: &mut egui::Ui) {
        ui::color_edit_vec4(ui, "Clear Color", &mut self.color);
    }
}
