use crate::config::AssetPaths;
use crate::glm;
use crate::rasterize::{Renderer, Shader, VertexBufferLayout};

use super::{model_view_projection, pixel_projection, QuadMesh, Scene, SceneError};

/// Amount the red channel moves every frame.
const COLOR_STEP: f32 = 0.05;

/// Advance a channel that bounces between 0 and 1, the direction
/// flips once the channel leaves that range.
pub fn bounce_channel(value: f32, increment: f32) -> (f32, f32) {
    let increment = if value > 1.0 {
        -COLOR_STEP
    } else if value < 0.0 {
        COLOR_STEP
    } else {
        increment
    };
    (value + increment, increment)
}

/// A single square whose `u_Color` uniform is animated every frame.
pub struct ColorQuad {
    mesh: QuadMesh,
    shader: Shader,
    projection: glm::Mat4,
    view: glm::Mat4,
    translation: glm::Vec3,
    color: glm::Vec4,
    increment: f32,
    animate: bool,
}

impl ColorQuad {
    pub fn new(assets: &AssetPaths) -> Result<Self, SceneError> {
        #[rustfmt::skip]
        let positions: [f32; 8] = [
            -100.0, -100.0,
             100.0, -100.0,
             100.0,  100.0,
            -100.0,  100.0,
        ];

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2);
        let mesh = QuadMesh::new(&positions, &layout)?;

        let shader = Shader::from_file(&assets.color_shader)?;

        Ok(Self {
            mesh,
            shader,
            projection: pixel_projection(960.0, 540.0),
            view: glm::identity(),
            translation: glm::vec3(480.0, 270.0, 0.0),
            color: glm::vec4(0.0, 0.3, 0.8, 1.0),
            increment: COLOR_STEP,
            animate: true,
        })
    }
}

impl Scene for ColorQuad {
    fn on_update(&mut self, _delta_time: f32) {
        if self.animate {
            let (red, increment) = bounce_channel(self.color[0], self.increment);
            self.color[0] = red;
            self.increment = increment;
        }
    }

    fn on_render(&mut self, renderer: &Renderer) {
        let mvp = model_view_projection(&self.projection, &self.view, &self.translation);

        self.shader.bind();
        self.shader.set_uniform_vec4("u_Color", &self.color);
        self.shader.set_uniform_mat4("u_MVP", &mvp);

        renderer.draw(&self.mesh.vertex_array, &self.mesh.index_buffer, &self.shader);
    }

    fn on_ui(&mut self, ui: &mut egui::Ui) {
        ui.checkbox(&mut self.animate, "Animate red channel");
        crate::ui::color_edit_vec4(ui, "Color", &mut self.color);
        crate::ui::slider_vec3(ui, "Translation", &mut self.translation, 0.0..=960.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_quad_bounce_stays_near_unit_range() {
        let (mut value, mut increment) = (0.0, COLOR_STEP);
        let mut went_down = false;
        for _ in 0..200 {
            let (next, next_increment) = bounce_channel(value, increment);
            if next_increment < 0.0 {
                went_down = true;
            }
            value = next;
            increment = next_increment;
            assert!(value >= -COLOR_STEP - 1e-5 && value <= 1.0 + 2.0 * COLOR_STEP);
        }
        assert!(went_down);
    }

    #[test]
    fn color_quad_bounce_flips_at_edges() {
        assert_eq!(bounce_channel(1.01, COLOR_STEP).1, -COLOR_STEP);
        assert_eq!(bounce_channel(-0.01, -COLOR_STEP).1, COLOR_STEP);
        let (value, increment) = bounce_channel(0.5, -COLOR_STEP);
        assert_eq!(increment, -COLOR_STEP);
        assert!((value - 0.45).abs() < 1e-6);
    }
}
