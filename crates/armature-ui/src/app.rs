use std::time::{Duration, Instant};

use armature_core::{
    arm_enabled, ArmSimulation, ArmatureConfig, ClockTime, Debouncer, DeviceProfile, FrameLoop,
    HudReadout, InputEvent, Interval, ProjectCatalog, ProjectRecord, Typewriter, Vec2,
};
use armature_core::input::format_coordinate;
use armature_platform::{DisplaySurface, WallClock};
use tracing::{info, warn};

use crate::canvas;
use crate::host::{DesktopOrientation, LocalClock, MemoryHistory, ScreenHost};
use crate::page::{toggle_fullscreen, Accordion, GyroToggle, MobileNav, ModalController, RevealTracker};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xf3, 0xff);

pub struct ArmatureApp {
    config: ArmatureConfig,
    catalog: ProjectCatalog,
    started: Instant,
    sim: Option<ArmSimulation>,
    /// Set once the device gate has been evaluated for the current gyro mode.
    arm_decided: bool,
    frames: FrameLoop,
    resize: Debouncer<Vec2>,
    last_size: Option<Vec2>,
    typewriter: Typewriter,
    next_keystroke: Duration,
    clock: Interval,
    hud: HudReadout,
    history: MemoryHistory,
    wall_clock: LocalClock,
    orientation: DesktopOrientation,
    modal: ModalController,
    nav: MobileNav,
    accordion: Accordion,
    reveal: RevealTracker,
    gyro: GyroToggle,
}

impl ArmatureApp {
    pub fn new(config: ArmatureConfig, catalog: ProjectCatalog, fragment: Option<&str>) -> Self {
        let typewriter = Typewriter::new(config.typewriter.clone());
        let mut reveal = RevealTracker::new(config.page.reveal_threshold);
        for record in catalog.iter().filter(|record| is_project_card(record)) {
            reveal.observe(&record.id);
        }
        let mut history = MemoryHistory::new(fragment);
        let mut modal = ModalController::new(Duration::from_millis(config.page.modal_close_delay_ms));
        if modal.open_from_fragment(&catalog, &mut history) {
            info!("opened deep-linked project {}", history.location());
        }

        Self {
            next_keystroke: typewriter.start_delay(),
            clock: Interval::new(
                Duration::from_millis(config.page.clock_interval_ms),
                Duration::ZERO,
            ),
            resize: Debouncer::new(Duration::from_millis(config.input.resize_debounce_ms)),
            typewriter,
            reveal,
            history,
            modal,
            config,
            catalog,
            started: Instant::now(),
            sim: None,
            arm_decided: false,
            frames: FrameLoop::new(),
            last_size: None,
            hud: HudReadout::new(),
            wall_clock: LocalClock,
            orientation: DesktopOrientation,
            nav: MobileNav::new(),
            accordion: Accordion::new(),
            gyro: GyroToggle::default(),
        }
    }

    fn update_arm(&mut self, ctx: &egui::Context, now: Duration) {
        let Some(viewport) = ScreenHost::new(ctx).viewport() else {
            return;
        };
        let size = Vec2::new(viewport.width, viewport.height);

        if !self.arm_decided {
            self.arm_decided = true;
            let profile = DeviceProfile {
                width: viewport.width,
                touch: viewport.touch,
            };
            if arm_enabled(&profile, &self.config.arm, self.gyro.is_enabled()) {
                match ArmSimulation::from_entropy(&self.config, size) {
                    Ok(mut sim) => {
                        sim.set_gyro_enabled(self.gyro.is_enabled());
                        self.sim = Some(sim);
                        self.last_size = Some(size);
                    }
                    Err(err) => warn!("arm disabled: {err}"),
                }
            } else {
                info!(width = viewport.width, touch = viewport.touch, "arm skipped for this device");
            }
        }

        let Some(sim) = self.sim.as_mut() else {
            return;
        };

        if self.last_size != Some(size) {
            self.last_size = Some(size);
            self.resize.schedule(now, size);
        }
        if let Some(size) = self.resize.poll(now) {
            if let Err(err) = sim.reinit(size) {
                warn!("failed to reinitialise arm: {err}");
            }
        }

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerMoved(position) => {
                    sim.handle_input(InputEvent::PointerMove(Vec2::new(position.x, position.y)), now);
                }
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let event = if pressed {
                        InputEvent::PointerDown
                    } else {
                        InputEvent::PointerUp
                    };
                    sim.handle_input(event, now);
                }
                _ => {}
            }
        }

        if let Some(commands) = self.frames.advance(sim, now) {
            let painter = ctx.layer_painter(egui::LayerId::background());
            canvas::paint(&painter, egui::Pos2::ZERO, &commands);
        }
        let (x, y) = sim.cursor_readout();
        self.hud.cursor_x = x;
        self.hud.cursor_y = y;
    }

    fn update_hud(&mut self, ctx: &egui::Context, now: Duration) {
        if now >= self.next_keystroke {
            let step = self.typewriter.step();
            self.hud.role = step.text;
            self.next_keystroke = now + step.delay;
        }
        if self.clock.poll(now) {
            let (hours, minutes, seconds) = self.wall_clock.local_time();
            self.hud.clock = ClockTime::new(hours, minutes, seconds).to_string();
        }
        if self.sim.is_none() {
            if let Some(position) = ctx.input(|i| i.pointer.latest_pos()) {
                self.hud.cursor_x = format_coordinate(position.x);
                self.hud.cursor_y = format_coordinate(position.y);
            }
        }
    }

    fn hud_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button("☰")
                    .on_hover_text(format!("aria-expanded={}", self.nav.aria_expanded()))
                    .clicked()
                {
                    self.nav.toggle();
                }
                ui.monospace(format!("> {}_", self.hud.role));
                ui.separator();
                ui.monospace(format!("T {}", self.hud.clock));
                ui.monospace(format!("X {} Y {}", self.hud.cursor_x, self.hud.cursor_y));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⛶ FULLSCREEN").clicked() {
                        toggle_fullscreen(&mut ScreenHost::new(ctx));
                    }
                    let label = if self.gyro.is_enabled() { "GYRO: ON" } else { "GYRO: OFF" };
                    if ui.selectable_label(self.gyro.is_enabled(), label).clicked() {
                        self.gyro.toggle(&mut self.orientation);
                        if let Some(sim) = self.sim.as_mut() {
                            sim.set_gyro_enabled(self.gyro.is_enabled());
                        } else if self.gyro.is_enabled() {
                            self.arm_decided = false;
                        }
                    }
                });
            });
        });
    }

    fn nav_panel(&mut self, ctx: &egui::Context) {
        if !self.nav.is_open() {
            return;
        }
        egui::SidePanel::left("mobile-nav").show(ctx, |ui| {
            for link in ["PROJECTS", "EXPERIENCE", "CONTACT"] {
                if ui.link(link).clicked() {
                    self.nav.link_clicked();
                }
            }
        });
    }

    fn content(&mut self, ctx: &egui::Context, now: Duration) {
        let mut open_request = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("// PROJECTS");
                    ui.horizontal_wrapped(|ui| {
                        for record in self.catalog.iter().filter(|r| is_project_card(r)) {
                            if project_card(ui, ctx, &mut self.reveal, record) {
                                open_request = Some(record.id.clone());
                            }
                        }
                    });
                    ui.add_space(24.0);
                    ui.heading("// EXPERIENCE");
                    for record in self.catalog.iter().filter(|r| !is_project_card(r)) {
                        let open = self.accordion.is_open(&record.id);
                        let marker = if open { "▾" } else { "▸" };
                        if ui.button(format!("{marker} {}", record.title)).clicked() {
                            self.accordion.toggle(&record.id);
                        }
                        if open {
                            ui.indent(&record.id, |ui| {
                                ui.label(&record.desc);
                                if ui.link("DETAILS").clicked() {
                                    open_request = Some(record.id.clone());
                                }
                            });
                        }
                    }
                });
            });

        if let Some(id) = open_request {
            self.modal.open(&id, &self.catalog, &mut self.history);
        }
        self.modal_window(ctx, now);
    }

    fn modal_window(&mut self, ctx: &egui::Context, now: Duration) {
        if !self.modal.backdrop_open() {
            return;
        }
        let Some(view) = self.modal.element().cloned() else {
            return;
        };
        let mut close = false;
        let response = egui::Modal::new(egui::Id::new("project-modal")).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("[ {} ]", view.title));
                if ui.button("✕").on_hover_text("Close").clicked() {
                    close = true;
                }
            });
            if !view.desc.is_empty() {
                ui.label(format!("> {}", view.desc));
            }
            if !view.achievement.is_empty() {
                ui.colored_label(ACCENT, format!("✔ {}", view.achievement));
            }
            if let Some(link) = &view.link {
                ui.hyperlink_to(&link.label, &link.url);
            }
            for image in &view.images {
                ui.weak(format!("[{}] {}", image.alt, image.src));
            }
        });
        if close {
            self.modal.close(now, &mut self.history);
        } else {
            self.modal
                .backdrop_clicked(response.should_close(), now, &mut self.history);
        }
    }
}

/// Projects render as fading cards; everything else sits in the experience accordion.
fn is_project_card(record: &ProjectRecord) -> bool {
    record.id.starts_with("proj")
}

/// Draws one project card with its fade-in; returns whether it was clicked.
fn project_card(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    reveal: &mut RevealTracker,
    record: &ProjectRecord,
) -> bool {
    let visible = reveal.is_visible(&record.id);
    let opacity = ctx.animate_bool_with_time(egui::Id::new(("reveal", &record.id)), visible, 0.6);
    let inner = ui.scope(|ui| {
        ui.set_opacity(opacity.max(0.05));
        egui::Frame::group(ui.style())
            .show(ui, |ui| {
                ui.set_width(260.0);
                ui.strong(&record.title);
                ui.small(&record.achievement);
            })
            .response
            .interact(egui::Sense::click())
    });
    let rect = inner.inner.rect;
    let shown = rect.intersect(ui.clip_rect());
    let ratio = if rect.area() > 0.0 && shown.is_positive() {
        shown.area() / rect.area()
    } else {
        0.0
    };
    reveal.report(&record.id, ratio);
    inner.inner.clicked()
}

impl eframe::App for ArmatureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        if close_requested {
            self.frames.stop();
        }

        let now = self.started.elapsed();
        self.update_arm(ctx, now);
        self.update_hud(ctx, now);
        self.modal.poll(now);

        self.hud_bar(ctx);
        self.nav_panel(ctx);
        self.content(ctx, now);

        if self.frames.is_running() && self.sim.is_some() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(self.config.typewriter.delete_ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_project_cards_wait_for_a_reveal() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let app = ArmatureApp::new(ArmatureConfig::default(), catalog, None);
        assert!(app.reveal.is_observed("proj1"));
        assert!(app.reveal.is_observed("proj5"));
        assert!(!app.reveal.is_observed("intern1"));
        assert!(!app.reveal.is_observed("intern4"));
    }
}
