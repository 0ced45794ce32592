use crate::config::AssetPaths;
use crate::rasterize::Renderer;

use super::{Scene, SceneError, SceneKind};

/// Change of the active scene asked for from the UI, applied once
/// the UI pass is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRequest {
    Open(SceneKind),
    Back,
}

struct ActiveScene {
    kind: SceneKind,
    scene: Box<dyn Scene>,
}

/// Lists the available scenes while none is active, otherwise
/// forwards the frame hooks to the active one.
pub struct SceneMenu {
    assets: AssetPaths,
    current: Option<ActiveScene>,
    request: Option<MenuRequest>,
}

impl SceneMenu {
    pub fn new(assets: AssetPaths) -> Self {
        Self {
            assets,
            current: None,
            request: None,
        }
    }

    /// Replace the active scene by a new scene of `kind`. The old
    /// scene is dropped first so its GPU resources are released
    /// before the new ones are created. On error the menu is shown.
    pub fn open(&mut self, kind: SceneKind) -> Result<(), SceneError> {
        self.current = None;
        let scene = kind.build(&self.assets)?;
        log::info!("opened scene {}", kind);
        self.current = Some(ActiveScene { kind, scene });
        Ok(())
    }

    /// Drop the active scene and go back to the menu.
    pub fn close(&mut self) {
        if let Some(active) = self.current.take() {
            log::info!("closed scene {}", active.kind);
        }
    }

    pub fn current_kind(&self) -> Option<SceneKind> {
        self.current.as_ref().map(|active| active.kind)
    }

    pub fn request(&mut self, request: MenuRequest) {
        self.request = Some(request);
    }

    pub fn pending_request(&self) -> Option<MenuRequest> {
        self.request
    }

    /// Apply the request made during the UI pass, if any. Failures
    /// to build a scene are logged and leave the menu active.
    pub fn apply_request(&mut self) {
        match self.request.take() {
            Some(MenuRequest::Open(kind)) => {
                if let Err(err) = self.open(kind) {
                    log::error!("could not open scene {}: {}", kind, err);
                }
            }
            Some(MenuRequest::Back) => self.close(),
            None => {}
        }
    }

    pub fn on_update(&mut self, delta_time: f32) {
        if let Some(active) = self.current.as_mut() {
            active.scene.on_update(delta_time);
        }
    }

    pub fn on_render(&mut self, renderer: &Renderer) {
        if let Some(active) = self.current.as_mut() {
            active.scene.on_render(renderer);
        }
    }

    pub fn on_ui(&mut self, ui: &mut egui::Ui) {
        match self.current.as_mut() {
            Some(active) => {
                if ui.button("<-").clicked() {
                    self.request = Some(MenuRequest::Back);
                }
                ui.heading(active.kind.label());
                ui.separator();
                active.scene.on_ui(ui);
            }
            None => {
                for &kind in SceneKind::ALL {
                    if ui.button(kind.label()).clicked() {
                        self.request = Some(MenuRequest::Open(kind));
                    }
                }
            }
        }
    }
}
