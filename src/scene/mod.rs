//! Self contained demo scenes that can be switched at runtime.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::AssetPaths;
use crate::glm;
use crate::rasterize::shader::ShaderError;
use crate::rasterize::texture::TextureError;
use crate::rasterize::{
    GpuError, IndexBuffer, Renderer, VertexArray, VertexBuffer, VertexBufferLayout,
};

pub mod clear_color;
pub mod color_quad;
pub mod menu;
pub mod texture_2d;

pub use clear_color::ClearColor;
pub use color_quad::ColorQuad;
pub use menu::SceneMenu;
pub use texture_2d::Texture2D;

/// Hooks the frame loop calls on the active scene, in order:
/// update, render, then UI.
pub trait Scene {
    fn on_update(&mut self, _delta_time: f32) {}

    fn on_render(&mut self, renderer: &Renderer);

    fn on_ui(&mut self, _ui: &mut egui::Ui) {}
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKind {
    #[serde(rename = "clear-color")]
    ClearColor,
    #[serde(rename = "color-quad")]
    ColorQuad,
    #[serde(rename = "texture-2d")]
    Texture2D,
}

impl SceneKind {
    pub const ALL: &'static [SceneKind] = &[
        SceneKind::ClearColor,
        SceneKind::ColorQuad,
        SceneKind::Texture2D,
    ];

    pub const NAMES: &'static [&'static str] = &["clear-color", "color-quad", "texture-2d"];

    /// Name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::ClearColor => "clear-color",
            SceneKind::ColorQuad => "color-quad",
            SceneKind::Texture2D => "texture-2d",
        }
    }

    /// Name shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            SceneKind::ClearColor => "Clear Color",
            SceneKind::ColorQuad => "Color Quad",
            SceneKind::Texture2D => "2D Texture",
        }
    }

    /// Create the scene, uploading all of its GPU resources.
    pub fn build(self, assets: &AssetPaths) -> Result<Box<dyn Scene>, SceneError> {
        Ok(match self {
            SceneKind::ClearColor => Box::new(ClearColor::new()),
            SceneKind::ColorQuad => Box::new(ColorQuad::new(assets)?),
            SceneKind::Texture2D => Box::new(Texture2D::new(assets)?),
        })
    }
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene `{0}`, expected one of: clear-color, color-quad, texture-2d")]
pub struct UnknownScene(pub String);

impl FromStr for SceneKind {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownScene(s.to_string()))
    }
}

/// Indices of the two triangles making up a quad with corners
/// ordered counter clockwise.
pub const QUAD_INDICES: [gl::types::GLuint; 6] = [0, 1, 2, 2, 3, 0];

/// Vertex array, vertex buffer and index buffer of an indexed mesh.
#[derive(Debug)]
pub struct QuadMesh {
    pub vertex_array: VertexArray,
    pub vertex_buffer: VertexBuffer,
    pub index_buffer: IndexBuffer,
}

impl QuadMesh {
    pub fn new(vertices: &[f32], layout: &VertexBufferLayout) -> Result<Self, GpuError> {
        let mut vertex_array = VertexArray::new()?;
        let vertex_buffer = VertexBuffer::new(vertices)?;
        vertex_array.add_buffer(&vertex_buffer, layout);
        let index_buffer = IndexBuffer::new(&QUAD_INDICES)?;

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
        })
    }
}

/// `projection * view * model` where the model only translates.
pub fn model_view_projection(
    projection: &glm::Mat4,
    view: &glm::Mat4,
    translation: &glm::Vec3,
) -> glm::Mat4 {
    let model = glm::translate(&glm::identity(), translation);
    projection * view * model
}

/// Orthographic projection mapping pixels of a `width` x `height`
/// window, origin at the bottom left.
pub fn pixel_projection(width: f32, height: f32) -> glm::Mat4 {
    glm::ortho(0.0, width, 0.0, height, -1.0, 1.0)
}
