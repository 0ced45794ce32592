//! Translation of glfw window events into egui input.

use glfw::{Action, WindowEvent};

/// egui scrolls in points, glfw reports lines.
pub const SCROLL_POINTS_PER_LINE: f32 = 50.0;

pub fn translate_modifiers(mods: glfw::Modifiers) -> egui::Modifiers {
    let ctrl = mods.contains(glfw::Modifiers::Control);
    let mac_cmd = cfg!(target_os = "macos") && mods.contains(glfw::Modifiers::Super);
    egui::Modifiers {
        alt: mods.contains(glfw::Modifiers::Alt),
        ctrl,
        shift: mods.contains(glfw::Modifiers::Shift),
        mac_cmd,
        command: if cfg!(target_os = "macos") {
            mac_cmd
        } else {
            ctrl
        },
    }
}

pub fn translate_mouse_button(button: glfw::MouseButton) -> Option<egui::PointerButton> {
    match button {
        glfw::MouseButton::Button1 => Some(egui::PointerButton::Primary),
        glfw::MouseButton::Button2 => Some(egui::PointerButton::Secondary),
        glfw::MouseButton::Button3 => Some(egui::PointerButton::Middle),
        _ => None,
    }
}

/// Keys egui widgets react to, `None` for the rest.
pub fn translate_key(key: glfw::Key) -> Option<egui::Key> {
    use egui::Key as E;
    use glfw::Key as G;

    let key = match key {
        G::Down => E::ArrowDown,
        G::Left => E::ArrowLeft,
        G::Right => E::ArrowRight,
        G::Up => E::ArrowUp,
        G::Escape => E::Escape,
        G::Tab => E::Tab,
        G::Backspace => E::Backspace,
        G::Enter | G::KpEnter => E::Enter,
        G::Space => E::Space,
        G::Insert => E::Insert,
        G::Delete => E::Delete,
        G::Home => E::Home,
        G::End => E::End,
        G::PageUp => E::PageUp,
        G::PageDown => E::PageDown,
        G::Num0 | G::Kp0 => E::Num0,
        G::Num1 | G::Kp1 => E::Num1,
        G::Num2 | G::Kp2 => E::Num2,
        G::Num3 | G::Kp3 => E::Num3,
        G::Num4 | G::Kp4 => E::Num4,
        G::Num5 | G::Kp5 => E::Num5,
        G::Num6 | G::Kp6 => E::Num6,
        G::Num7 | G::Kp7 => E::Num7,
        G::Num8 | G::Kp8 => E::Num8,
        G::Num9 | G::Kp9 => E::Num9,
        G::A => E::A,
        G::C => E::C,
        G::V => E::V,
        G::X => E::X,
        G::Y => E::Y,
        G::Z => E::Z,
        _ => return None,
    };
    Some(key)
}

/// Events collected between two overlay frames.
#[derive(Debug, Default)]
pub struct EguiInput {
    events: Vec<egui::Event>,
    modifiers: egui::Modifiers,
    pointer_pos: egui::Pos2,
}

impl EguiInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y) => {
                self.pointer_pos = egui::pos2(x as f32, y as f32);
                self.events.push(egui::Event::PointerMoved(self.pointer_pos));
            }
            WindowEvent::CursorEnter(false) => {
                self.events.push(egui::Event::PointerGone);
            }
            WindowEvent::MouseButton(button, action, mods) => {
                self.modifiers = translate_modifiers(mods);
                if let Some(button) = translate_mouse_button(button) {
                    self.events.push(egui::Event::PointerButton {
                        pos: self.pointer_pos,
                        button,
                        pressed: action == Action::Press,
                        modifiers: self.modifiers,
                    });
                }
            }
            WindowEvent::Scroll(x, y) => {
                self.events.push(egui::Event::Scroll(
                    egui::vec2(x as f32, y as f32) * SCROLL_POINTS_PER_LINE,
                ));
            }
            WindowEvent::Char(c) => {
                if !c.is_control() && !self.modifiers.ctrl && !self.modifiers.mac_cmd {
                    self.events.push(egui::Event::Text(c.to_string()));
                }
            }
            WindowEvent::Key(key, _scancode, action, mods) => {
                self.modifiers = translate_modifiers(mods);
                let pressed = action != Action::Release;

                if pressed && self.modifiers.command {
                    match key {
                        glfw::Key::C => self.events.push(egui::Event::Copy),
                        glfw::Key::X => self.events.push(egui::Event::Cut),
                        _ => {}
                    }
                }

                if let Some(key) = translate_key(key) {
                    self.events.push(egui::Event::Key {
                        key,
                        pressed,
                        repeat: action == Action::Repeat,
                        modifiers: self.modifiers,
                    });
                }
            }
            _ => {}
        }
    }

    /// Pending events, for inspection.
    pub fn events(&self) -> &[egui::Event] {
        &self.events
    }

    /// Input for the next egui frame, drains the pending events.
    ///
    /// `screen_size` is the window size in screen coordinates,
    /// `pixels_per_point` is the framebuffer to window ratio.
    pub fn take_raw_input(
        &mut self,
        screen_size: egui::Vec2,
        pixels_per_point: f32,
        time: f64,
    ) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, screen_size)),
            pixels_per_point: Some(pixels_per_point),
            time: Some(time),
            modifiers: self.modifiers,
            events: std::mem::take(&mut self.events),
            ..Default::default()
        }
    }
}
