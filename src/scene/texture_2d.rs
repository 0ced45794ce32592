use crate::config::AssetPaths;
use crate::glm;
use crate::gpu_utils;
use crate::rasterize::{Renderer, Shader, Texture, VertexBufferLayout};

use super::{model_view_projection, pixel_projection, QuadMesh, Scene, SceneError};

/// Texture unit the quads sample from.
const TEXTURE_SLOT: u32 = 0;

/// The same textured quad drawn twice with different model
/// translations.
pub struct Texture2D {
    mesh: QuadMesh,
    shader: Shader,
    texture: Texture,
    projection: glm::Mat4,
    view: glm::Mat4,
    translation_a: glm::Vec3,
    translation_b: glm::Vec3,
}

impl Texture2D {
    pub fn new(assets: &AssetPaths) -> Result<Self, SceneError> {
        // position xy, texture coordinate uv
        #[rustfmt::skip]
        let vertices: [f32; 16] = [
            -50.0, -50.0, 0.0, 0.0,
             50.0, -50.0, 1.0, 0.0,
             50.0,  50.0, 1.0, 1.0,
            -50.0,  50.0, 0.0, 1.0,
        ];

        let mut shader = Shader::from_file(&assets.basic_shader)?;
        let texture = Texture::from_file(&assets.texture)?;

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        let mesh = QuadMesh::new(&vertices, &layout)?;

        shader.bind();
        shader.set_uniform_1i("u_Texture", TEXTURE_SLOT as i32);

        Ok(Self {
            mesh,
            shader,
            texture,
            projection: pixel_projection(960.0, 540.0),
            view: glm::translate(&glm::identity(), &glm::vec3(0.0, 0.0, 0.0)),
            translation_a: glm::vec3(200.0, 200.0, 0.0),
            translation_b: glm::vec3(400.0, 200.0, 0.0),
        })
    }

    fn draw_at(&mut self, renderer: &Renderer, translation: &glm::Vec3) {
        let mvp = model_view_projection(&self.projection, &self.view, translation);
        self.shader.bind();
        self.shader.set_uniform_mat4("u_MVP", &mvp);
        renderer.draw(&self.mesh.vertex_array, &self.mesh.index_buffer, &self.shader);
    }
}

impl Scene for Texture2D {
    fn on_render(&mut self, renderer: &Renderer) {
        // the overlay paints with its own blend function each frame
        gpu_utils::enable_alpha_blending();
        self.texture.bind(TEXTURE_SLOT);

        let (translation_a, translation_b) = (self.translation_a, self.translation_b);
        self.draw_at(renderer, &translation_a);
        self.draw_at(renderer, &translation_b);
    }

    fn on_ui(&mut self, ui: &mut egui::Ui) {
        crate::ui::slider_vec3(ui, "Translation A", &mut self.translation_a, 0.0..=960.0);
        crate::ui::slider_vec3(ui, "Translation B", &mut self.translation_b, 0.0..=960.0);
        ui.label(format!(
            "texture: {}x{}, {} channels",
            self.texture.get_width(),
            self.texture.get_height(),
            self.texture.get_bpp()
        ));
        if let Some(path) = self.texture.get_path() {
            ui.label(format!("texture file: {}", path.display()));
        }
        if let Some(path) = self.shader.path() {
            ui.label(format!("shader file: {}", path.display()));
        }
    }
}
