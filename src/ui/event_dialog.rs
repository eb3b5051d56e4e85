//! Modal add/edit dialog for events.
//!
//! The dialog holds draft fields and only builds an `Event` when the user
//! saves; invalid drafts (empty title, end before start, bad color) keep
//! the dialog open with an error line instead.

use chrono::{DateTime, Local, NaiveDate, Timelike};
use egui::{Align2, Color32, DragValue};
use egui_extras::DatePickerButton;

use crate::models::event::Event;

/// What the caller should do after `show` returns.
pub enum DialogAction {
    Save(Event),
    Delete(i64),
    Cancel,
}

pub struct EventDialog {
    id: Option<i64>,
    title: String,
    content: String,
    date: NaiveDate,
    start_hour: u32,
    start_minute: u32,
    end_hour: u32,
    end_minute: u32,
    all_day: bool,
    color: String,
    error: Option<String>,
}

impl EventDialog {
    /// Empty draft for a new event on the given day.
    pub fn create(date: NaiveDate) -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            date,
            start_hour: 9,
            start_minute: 0,
            end_hour: 10,
            end_minute: 0,
            all_day: false,
            color: String::new(),
            error: None,
        }
    }

    /// Draft pre-filled from an existing event.
    pub fn edit(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            content: event.content.clone(),
            date: event.day(),
            start_hour: event.start.hour(),
            start_minute: event.start.minute(),
            end_hour: event.end.hour(),
            end_minute: event.end.minute(),
            all_day: event.all_day,
            color: event.color.clone().unwrap_or_default(),
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    fn time_on_date(&self, hour: u32, minute: u32) -> Option<DateTime<Local>> {
        self.date
            .and_hms_opt(hour, minute, 0)?
            .and_local_timezone(Local)
            .single()
    }

    fn build_event(&self) -> Result<Event, String> {
        let start = self
            .time_on_date(self.start_hour, self.start_minute)
            .ok_or("Start time is not valid on this date")?;
        let end = self
            .time_on_date(self.end_hour, self.end_minute)
            .ok_or("End time is not valid on this date")?;

        let mut event = Event::new(self.title.trim(), start, end)?;
        event.id = self.id;
        event.content = self.content.trim().to_string();
        event.all_day = self.all_day;
        if !self.color.trim().is_empty() {
            event.color = Some(self.color.trim().to_string());
        }
        event.validate()?;
        Ok(event)
    }

    /// Render the dialog. Returns an action once the user commits.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogAction> {
        let mut action = None;
        let heading = if self.is_editing() {
            "Edit event"
        } else {
            "New event"
        };

        egui::Window::new(heading)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("event_fields")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut self.title);
                        ui.end_row();

                        ui.label("Notes");
                        ui.text_edit_multiline(&mut self.content);
                        ui.end_row();

                        ui.label("Date");
                        ui.add(DatePickerButton::new(&mut self.date).id_source("event_date"));
                        ui.end_row();

                        ui.label("Start");
                        ui.horizontal(|ui| {
                            ui.add_enabled(
                                !self.all_day,
                                DragValue::new(&mut self.start_hour).range(0..=23),
                            );
                            ui.label(":");
                            ui.add_enabled(
                                !self.all_day,
                                DragValue::new(&mut self.start_minute).range(0..=59),
                            );
                        });
                        ui.end_row();

                        ui.label("End");
                        ui.horizontal(|ui| {
                            ui.add_enabled(
                                !self.all_day,
                                DragValue::new(&mut self.end_hour).range(0..=23),
                            );
                            ui.label(":");
                            ui.add_enabled(
                                !self.all_day,
                                DragValue::new(&mut self.end_minute).range(0..=59),
                            );
                        });
                        ui.end_row();

                        ui.label("All day");
                        ui.checkbox(&mut self.all_day, "");
                        ui.end_row();

                        ui.label("Color");
                        ui.text_edit_singleline(&mut self.color)
                            .on_hover_text("#RRGGBB, blank for the default");
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.colored_label(Color32::from_rgb(220, 80, 80), error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        match self.build_event() {
                            Ok(event) => action = Some(DialogAction::Save(event)),
                            Err(reason) => self.error = Some(reason),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(DialogAction::Cancel);
                    }
                    if let Some(id) = self.id {
                        if ui.button("Delete").clicked() {
                            action = Some(DialogAction::Delete(id));
                        }
                    }
                });
            });

        action
    }
}
