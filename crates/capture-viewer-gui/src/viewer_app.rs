use std::time::Instant;

use capture_viewer_core::{list_devices, ViewerConfig};
use egui::{
    Align, Color32, FontFamily, FontId, Frame, Layout, Margin, RichText, TextureHandle,
    TextureOptions, Vec2,
};
use tracing::{error, info, warn};

use crate::assets::{self, SCREENSHOT_ICON, SETTINGS_ICON};
use crate::settings_dialog::{DialogOutcome, SettingsDialog};
use crate::state::{FeedPhase, Flash, Notice};
use crate::viewer::Viewer;

// ── Colours ───────────────────────────────────────────────────────────────────

const BG_DISPLAY: Color32 = Color32::BLACK;
const TEXT_FPS:   Color32 = Color32::WHITE;
const TEXT_DIM:   Color32 = Color32::from_rgb(130, 135, 148);
const TEXT_ERROR: Color32 = Color32::from_rgb(220, 80, 70);

const ICON_SIZE: f32 = 32.0;

// ── App struct ────────────────────────────────────────────────────────────────

struct Icons {
    settings:   Option<TextureHandle>,
    screenshot: Option<TextureHandle>,
}

pub struct ViewerApp {
    config:   ViewerConfig,
    viewer:   Viewer,
    texture:  Option<TextureHandle>,
    fps_text: String,
    flash:    Flash,
    dialog:   Option<SettingsDialog>,
    notice:   Option<Notice>,
    icons:    Icons,
    closed:   bool,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig, viewer: Viewer) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = BG_DISPLAY;
        cc.egui_ctx.set_visuals(visuals);

        let icon = |name: &str, rel: &str| {
            let path = assets::resource_path(rel, config.resource_dir.as_deref());
            assets::load_texture(&cc.egui_ctx, name, &path)
                .map_err(|e| warn!("Icon unavailable, using text button: {e:#}"))
                .ok()
        };
        let icons = Icons {
            settings:   icon("settings-icon", SETTINGS_ICON),
            screenshot: icon("screenshot-icon", SCREENSHOT_ICON),
        };

        if !viewer.is_ticking() {
            warn!("Camera {} did not start, no live feed", viewer.settings().cam_index);
        }

        Self {
            config,
            viewer,
            texture:  None,
            fps_text: String::new(),
            flash:    Flash::default(),
            dialog:   None,
            notice:   None,
            icons,
            closed:   false,
        }
    }

    fn open_settings(&mut self) {
        let devices = list_devices().unwrap_or_else(|e| {
            error!("Listing cameras failed: {e}");
            self.notice = Some(Notice::error(format!("Listing cameras failed: {e}")));
            Vec::new()
        });
        self.dialog = Some(SettingsDialog::new(self.viewer.settings(), devices));
    }

    fn take_screenshot(&mut self) {
        match self.viewer.screenshot() {
            Ok(Some(path)) => {
                self.notice = Some(Notice::info(format!("Saved {}", path.display())));
            }
            Ok(None) => {}
            Err(e) => {
                error!("Screenshot failed: {e}");
                self.notice = Some(Notice::error(format!("Screenshot failed: {e}")));
            }
        }
    }

    /// Display tick: pull one frame and upload it. No frame keeps the
    /// previous image.
    fn update_frame(&mut self, ctx: &egui::Context) {
        let Some(tick) = self.viewer.tick() else {
            return;
        };
        let size = [tick.frame.width() as usize, tick.frame.height() as usize];
        let image = egui::ColorImage::from_rgb(size, tick.frame.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("camera-frame", image, TextureOptions::LINEAR));
            }
        }
        self.fps_text = tick.fps_text;
    }

    fn poll_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match dialog.show(ctx) {
            DialogOutcome::Pending => {}
            DialogOutcome::Cancelled => self.dialog = None,
            DialogOutcome::Accepted(settings) => {
                self.dialog = None;
                if let Err(e) = self.viewer.apply_settings(settings) {
                    error!("Saving settings failed: {e}");
                    self.notice = Some(Notice::error(format!("Saving settings failed: {e}")));
                }
                if !self.viewer.settings().show_fps {
                    self.fps_text.clear();
                }
            }
        }
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.viewer.close() {
            error!("Saving settings on close failed: {e}");
        }
        info!("Viewer closed");
    }
}

// ── eframe::App implementation ────────────────────────────────────────────────

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
            return;
        }

        self.update_frame(ctx);

        // Shortcut is inert while the dialog is up.
        if self.dialog.is_none() {
            if let Some(shortcut) = self.viewer.shortcut() {
                if ctx.input_mut(|i| i.consume_shortcut(&shortcut)) {
                    self.take_screenshot();
                    self.flash.trigger(Instant::now(), self.config.flash_duration());
                }
            }
        }

        let now = Instant::now();
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }

        let phase = FeedPhase::from_status(self.viewer.session_status());

        let mut settings_clicked   = false;
        let mut screenshot_clicked = false;

        // ── Footer ────────────────────────────────────────────────────────
        egui::TopBottomPanel::bottom("footer")
            .frame(Frame::none().fill(BG_DISPLAY).inner_margin(Margin::symmetric(5.0, 2.0)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&self.fps_text)
                            .font(FontId::new(13.0, FontFamily::Proportional))
                            .color(TEXT_FPS),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(format!("● {}", phase.label()))
                            .font(FontId::new(11.5, FontFamily::Proportional))
                            .color(phase.color()),
                    );
                    if let Some(notice) = &self.notice {
                        ui.add_space(10.0);
                        ui.label(
                            RichText::new(&notice.text)
                                .font(FontId::new(11.5, FontFamily::Proportional))
                                .color(if notice.is_error { TEXT_ERROR } else { TEXT_DIM }),
                        );
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.spacing_mut().item_spacing.x = 10.0;
                        ui.add_enabled_ui(self.dialog.is_none(), |ui| {
                            settings_clicked   = icon_button(ui, self.icons.settings.as_ref(), "⚙", "Settings");
                            screenshot_clicked = icon_button(ui, self.icons.screenshot.as_ref(), "📷", "Save screenshot");
                        });
                    });
                });
            });

        // ── Display surface ───────────────────────────────────────────────
        egui::CentralPanel::default()
            .frame(Frame::none().fill(BG_DISPLAY))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                match &self.texture {
                    Some(texture) => {
                        ui.centered_and_justified(|ui| {
                            ui.add(egui::Image::new(texture).fit_to_exact_size(area.size()));
                        });
                    }
                    None => {
                        if phase == FeedPhase::NoFeed {
                            ui.centered_and_justified(|ui| {
                                ui.label(RichText::new(phase.label()).color(phase.color()));
                            });
                        }
                    }
                }

                if let Some(remaining) = self.flash.remaining(now) {
                    ui.painter().rect_filled(area, 0.0, Color32::WHITE);
                    ctx.request_repaint_after(remaining);
                }
            });

        if screenshot_clicked {
            self.take_screenshot();
        }
        if settings_clicked {
            self.open_settings();
        }

        self.poll_dialog(ctx);

        if self.viewer.is_ticking() {
            ctx.request_repaint_after(self.config.tick_interval());
        }
    }
}

// ── Utilities ─────────────────────────────────────────────────────────────────

fn icon_button(ui: &mut egui::Ui, icon: Option<&TextureHandle>, glyph: &str, tooltip: &str) -> bool {
    let size = Vec2::splat(ICON_SIZE);
    let response = match icon {
        Some(texture) => ui.add_sized(
            size,
            egui::ImageButton::new(egui::Image::new(texture).fit_to_exact_size(size * 0.75))
                .frame(false),
        ),
        None => ui.add_sized(
            size,
            egui::Button::new(RichText::new(glyph).size(18.0).color(TEXT_FPS)).frame(false),
        ),
    };
    response.on_hover_text(tooltip).clicked()
}
