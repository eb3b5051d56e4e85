//! Top-level application: owns the store, settings, navigation state,
//! recorder and memo book, and wires them into the egui frame loop.

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::{Duration, Local};
use egui::{ComboBox, DragValue, RichText, ScrollArea};

use crate::models::settings::{Settings, ViewMode};
use crate::services::navigation::ViewState;
use crate::services::persistence::{self, MemoBook, EVENTS_FILE, MEMOS_FILE, SETTINGS_FILE};
use crate::services::recorder::{Recorder, COUNTDOWN_PRESETS};
use crate::services::settings::SettingsService;
use crate::services::store::ScheduleStore;
use crate::ui::event_dialog::{DialogAction, EventDialog};
use crate::ui::grid::{self, GridResponse};

/// How often the frame loop wakes up for the clock line and the recorder.
const TICK_INTERVAL: StdDuration = StdDuration::from_millis(500);

pub struct TimelaneApp {
    store: ScheduleStore,
    settings: Settings,
    settings_service: SettingsService,
    view: ViewState,
    recorder: Recorder,
    record_title: String,
    countdown_minutes: i64,
    memos: MemoBook,
    memo_draft: String,
    dialog: Option<EventDialog>,
    events_path: PathBuf,
    memos_path: PathBuf,
}

impl TimelaneApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let data_dir = persistence::data_dir();
        log::info!("data directory: {}", data_dir.display());

        let events_path = data_dir.join(EVENTS_FILE);
        let memos_path = data_dir.join(MEMOS_FILE);
        let settings_service = SettingsService::new(data_dir.join(SETTINGS_FILE));

        let settings = settings_service.load();
        let store = ScheduleStore::from_events(persistence::load_events(&events_path));
        let memos = persistence::load_memos(&memos_path);
        let view = ViewState::new(settings.view_mode, Local::now().date_naive());
        let memo_draft = memos.get(&view.week_start()).cloned().unwrap_or_default();

        Self {
            store,
            settings,
            settings_service,
            view,
            recorder: Recorder::default(),
            record_title: String::new(),
            countdown_minutes: 0,
            memos,
            memo_draft,
            dialog: None,
            events_path,
            memos_path,
        }
    }

    fn save_events(&self) {
        if let Err(err) = persistence::save_events(&self.events_path, self.store.events()) {
            log::error!("failed to save events: {:#}", err);
        }
    }

    /// Write the memo draft into the book for the current week and save.
    /// An empty draft deletes the week's entry.
    fn commit_memo(&mut self) {
        let week = self.view.week_start();
        let stored = self.memos.get(&week).map(String::as_str).unwrap_or("");
        if stored == self.memo_draft {
            return;
        }
        if self.memo_draft.trim().is_empty() {
            self.memos.remove(&week);
        } else {
            self.memos.insert(week, self.memo_draft.clone());
        }
        if let Err(err) = persistence::save_memos(&self.memos_path, &self.memos) {
            log::error!("failed to save memos: {:#}", err);
        }
    }

    /// Commit the outgoing week's memo, run the navigation transition,
    /// then load the draft for the week now in view.
    fn navigate(&mut self, transition: impl FnOnce(&mut ViewState)) {
        self.commit_memo();
        transition(&mut self.view);
        self.memo_draft = self
            .memos
            .get(&self.view.week_start())
            .cloned()
            .unwrap_or_default();
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        if self.settings.view_mode == mode {
            return;
        }
        self.navigate(|view| view.set_mode(mode));
        self.settings.view_mode = mode;
        self.settings_service.mark_dirty();
    }

    fn append_recorded(&mut self, event: crate::models::event::Event) {
        let (_, affected) = self.store.add(event);
        self.store.relayout(&affected);
        self.save_events();
    }

    fn apply_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::Save(event) => {
                let affected = if event.id.is_some() {
                    match self.store.update(event) {
                        Ok(affected) => affected,
                        Err(err) => {
                            log::error!("failed to update event: {}", err);
                            return;
                        }
                    }
                } else {
                    self.store.add(event).1
                };
                self.store.relayout(&affected);
                self.save_events();
            }
            DialogAction::Delete(id) => match self.store.remove(id) {
                Ok((removed, affected)) => {
                    log::info!("deleted event {:?}", removed.title);
                    self.store.relayout(&affected);
                    self.save_events();
                }
                Err(err) => log::error!("failed to delete event: {}", err),
            },
            DialogAction::Cancel => {}
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.navigate(|view| view.previous());
            }
            if ui.button("Today").clicked() {
                let today = Local::now().date_naive();
                self.navigate(|view| view.today(today));
            }
            if ui.button("▶").clicked() {
                self.navigate(|view| view.next());
            }

            ui.label(RichText::new(self.view.heading()).strong().size(16.0));

            ui.separator();
            let mut mode = self.view.mode;
            ui.selectable_value(&mut mode, ViewMode::Day, "Day");
            ui.selectable_value(&mut mode, ViewMode::Week, "Week");
            self.set_view_mode(mode);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .toggle_value(&mut self.settings.show_side_panel, "Notes")
                    .changed()
                {
                    self.commit_memo();
                    self.settings_service.mark_dirty();
                }
                if ui
                    .toggle_value(&mut self.settings.edit_mode, "Edit")
                    .changed()
                {
                    self.settings_service.mark_dirty();
                }
                if self.settings.edit_mode && ui.button("+ New").clicked() {
                    self.dialog = Some(EventDialog::create(self.view.anchor));
                }
            });
        });
    }

    fn record_bar(&mut self, ui: &mut egui::Ui) {
        let now = Local::now();
        ui.horizontal(|ui| {
            if self.recorder.is_recording() {
                if ui.button("⏹ Stop").clicked() {
                    if let Some(event) = self.recorder.stop(now) {
                        self.append_recorded(event);
                    }
                }
                if let Some(remaining) = self.recorder.remaining(now) {
                    ui.label(
                        RichText::new(format!("⏳ {}", format_clock(remaining)))
                            .color(egui::Color32::from_rgb(255, 140, 0)),
                    );
                } else if let Some(elapsed) = self.recorder.elapsed(now) {
                    ui.label(
                        RichText::new(format!("⏱ {}", format_clock(elapsed)))
                            .color(egui::Color32::from_rgb(255, 140, 0)),
                    );
                }
            } else {
                if ui.button("⏺ Record").clicked() {
                    self.recorder
                        .start(&self.record_title, Some(self.countdown_minutes), now);
                    self.record_title.clear();
                }
                ui.add(
                    egui::TextEdit::singleline(&mut self.record_title)
                        .hint_text("What are you working on?")
                        .desired_width(180.0),
                );
                ComboBox::from_id_source("countdown")
                    .selected_text(countdown_label(self.countdown_minutes))
                    .show_ui(ui, |ui| {
                        for minutes in COUNTDOWN_PRESETS {
                            ui.selectable_value(
                                &mut self.countdown_minutes,
                                *minutes,
                                countdown_label(*minutes),
                            );
                        }
                    });
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut end = self.settings.display_end_hour;
                if ui.add(DragValue::new(&mut end).range(1..=24)).changed() {
                    self.settings.set_display_end_hour(end);
                    self.settings_service.mark_dirty();
                }
                ui.label("to");
                let mut start = self.settings.display_start_hour;
                if ui.add(DragValue::new(&mut start).range(0..=23)).changed() {
                    self.settings.set_display_start_hour(start);
                    self.settings_service.mark_dirty();
                }
                ui.label("Hours");
            });
        });
    }

    fn memo_panel(&mut self, ui: &mut egui::Ui) {
        let start = self.view.week_start();
        let end = start + Duration::days(6);
        ui.heading("Week notes");
        ui.label(format!(
            "{} - {}",
            start.format("%b %-d"),
            end.format("%b %-d")
        ));
        ui.separator();

        if self.settings.edit_mode {
            ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.memo_draft)
                        .desired_width(f32::INFINITY)
                        .desired_rows(20),
                );
            });
        } else {
            ScrollArea::vertical().show(ui, |ui| {
                if self.memo_draft.is_empty() {
                    ui.weak("No notes for this week.");
                } else {
                    ui.label(&self.memo_draft);
                }
            });
        }
    }

    fn schedule_surface(&mut self, ui: &mut egui::Ui) {
        let surface_width = (ui.available_width() - grid::TIME_LABEL_WIDTH).max(100.0);

        let mut response = GridResponse::default();
        grid::draw_day_headers(ui, &self.view, surface_width);
        response.merge(grid::draw_all_day_ribbon(
            ui,
            self.store.events(),
            &self.view,
            surface_width,
            self.store.all_day_panel_height(),
        ));
        ui.separator();

        ScrollArea::vertical().show(ui, |ui| {
            response.merge(grid::draw_time_grid(
                ui,
                self.store.events(),
                &self.view,
                &self.settings,
                surface_width,
            ));
        });

        if let Some(id) = response.edit_event {
            if self.settings.edit_mode && self.dialog.is_none() {
                if let Some(event) = self.store.get(id) {
                    self.dialog = Some(EventDialog::edit(event));
                }
            }
        }
    }
}

impl eframe::App for TimelaneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(TICK_INTERVAL);

        if let Some(event) = self.recorder.tick(Local::now()) {
            self.append_recorded(event);
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.top_bar(ui);
            self.record_bar(ui);
            ui.add_space(4.0);
        });

        if self.settings.show_side_panel {
            egui::SidePanel::right("memo_panel")
                .default_width(240.0)
                .show(ctx, |ui| self.memo_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.schedule_surface(ui));

        if let Some(dialog) = &mut self.dialog {
            if let Some(action) = dialog.show(ctx) {
                self.dialog = None;
                self.apply_dialog_action(action);
            }
        }

        self.settings_service.flush_if_due(&self.settings);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(event) = self.recorder.stop(Local::now()) {
            let (_, affected) = self.store.add(event);
            self.store.relayout(&affected);
        }
        self.commit_memo();
        self.settings_service.flush(&self.settings);
        self.save_events();
        log::info!("shutdown complete");
    }
}

fn format_clock(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

fn countdown_label(minutes: i64) -> String {
    if minutes == 0 {
        "Stopwatch".to_string()
    } else {
        format!("{} min", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::seconds(0)), "00:00:00");
        assert_eq!(format_clock(Duration::seconds(75)), "00:01:15");
        assert_eq!(format_clock(Duration::hours(2) + Duration::seconds(61)), "02:01:01");
    }

    #[test]
    fn test_countdown_labels() {
        assert_eq!(countdown_label(0), "Stopwatch");
        assert_eq!(countdown_label(25), "25 min");
    }
}
