//! "Select Camera" dialog: camera picker, FPS toggle, screenshot shortcut.
//!
//! Pure data collection. The caller decides what an accepted result means;
//! a cancel (button or window close) means no change.

use capture_viewer_core::{DeviceDescriptor, Settings};
use egui::{Align2, RichText};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Accepted(Settings),
    Cancelled,
}

pub struct SettingsDialog {
    devices: Vec<DeviceDescriptor>,
    /// Position in `devices`.
    selected: Option<usize>,
    incoming_index: u32,
    show_fps: bool,
    shortcut_text: String,
    open: bool,
}

impl SettingsDialog {
    /// Pre-selects the entry whose device index equals `current.cam_index`.
    /// The index is only as stable as the OS enumeration order.
    pub fn new(current: &Settings, devices: Vec<DeviceDescriptor>) -> Self {
        let selected = devices.iter().position(|d| d.index == current.cam_index);
        Self {
            devices,
            selected,
            incoming_index: current.cam_index,
            show_fps: current.show_fps,
            shortcut_text: current.shortcut_key.clone(),
            open: true,
        }
    }

    #[cfg(test)]
    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    #[cfg(test)]
    pub fn selected_position(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, position: usize) {
        if position < self.devices.len() {
            self.selected = Some(position);
        }
    }

    #[cfg(test)]
    pub fn set_show_fps(&mut self, show_fps: bool) {
        self.show_fps = show_fps;
    }

    #[cfg(test)]
    pub fn set_shortcut_text(&mut self, text: impl Into<String>) {
        self.shortcut_text = text.into();
    }

    /// Values as they would be returned on Save. With nothing selected the
    /// incoming camera index is kept.
    pub fn result(&self) -> Settings {
        let cam_index = self
            .selected
            .and_then(|pos| self.devices.get(pos))
            .map_or(self.incoming_index, |d| d.index);
        Settings {
            cam_index,
            show_fps: self.show_fps,
            shortcut_key: self.shortcut_text.trim().to_owned(),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogOutcome {
        let mut outcome = DialogOutcome::Pending;
        let mut open = self.open;

        egui::Window::new("Select Camera")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing = egui::vec2(8.0, 6.0);

                let selected_text = self
                    .selected
                    .and_then(|pos| self.devices.get(pos))
                    .map_or_else(|| "No camera selected".to_owned(), DeviceDescriptor::label);
                egui::ComboBox::from_id_salt("camera_picker")
                    .selected_text(selected_text)
                    .width(260.0)
                    .show_ui(ui, |ui| {
                        let mut picked = None;
                        for (pos, device) in self.devices.iter().enumerate() {
                            if ui.selectable_label(self.selected == Some(pos), device.label()).clicked() {
                                picked = Some(pos);
                            }
                        }
                        if let Some(pos) = picked {
                            self.select(pos);
                        }
                    });
                if self.devices.is_empty() {
                    ui.label(RichText::new("No cameras found").weak());
                }

                ui.checkbox(&mut self.show_fps, "Toggle FPS");

                ui.label("Shortcut for Screenshot:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.shortcut_text)
                        .hint_text("F10")
                        .desired_width(260.0),
                );

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        outcome = DialogOutcome::Accepted(self.result());
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = DialogOutcome::Cancelled;
                    }
                });
            });

        self.open = open;
        if !self.open && outcome == DialogOutcome::Pending {
            outcome = DialogOutcome::Cancelled;
        }
        outcome
    }
}
