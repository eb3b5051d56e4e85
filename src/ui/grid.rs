//! Painter-based rendering of the all-day ribbon and the time grid.
//!
//! All placement comes from the layout engine and the projection module;
//! this file only turns spans into rectangles and handles clicks.

use chrono::{DateTime, Local};
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::services::layout::geometry::{l_shape_outline, CUT_HEIGHT, LEG_WIDTH};
use crate::services::layout::projection::{
    self, grid_height, horizontal_span, vertical_span, PIXELS_PER_HOUR,
};
use crate::services::layout::ALL_DAY_ROW_PITCH;
use crate::services::navigation::ViewState;
use crate::utils::date::is_weekend;

pub const TIME_LABEL_WIDTH: f32 = 50.0;
const DEFAULT_EVENT_COLOR: Color32 = Color32::from_rgb(100, 150, 200);

/// Clicks collected while drawing a frame.
#[derive(Default)]
pub struct GridResponse {
    /// Event the user double-clicked for editing.
    pub edit_event: Option<i64>,
}

impl GridResponse {
    pub fn merge(&mut self, other: GridResponse) {
        if other.edit_event.is_some() {
            self.edit_event = other.edit_event;
        }
    }
}

/// Parse a `#RRGGBB` color tag.
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

fn event_color(event: &Event, now: DateTime<Local>) -> Color32 {
    let base = event
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(DEFAULT_EVENT_COLOR);
    if event.end < now {
        // Dim past events
        Color32::from_rgba_unmultiplied(
            (base.r() as f32 * 0.4) as u8,
            (base.g() as f32 * 0.4) as u8,
            (base.b() as f32 * 0.4) as u8,
            140,
        )
    } else {
        base
    }
}

/// Day-of-week headers above the grid columns.
pub fn draw_day_headers(ui: &mut egui::Ui, view: &ViewState, surface_width: f32) {
    let days = view.visible_days();
    let col_width = surface_width / days.len() as f32;
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(TIME_LABEL_WIDTH + surface_width, 22.0),
        Sense::hover(),
    );
    let painter = ui.painter();
    let today = Local::now().date_naive();

    for (idx, day) in days.iter().enumerate() {
        let x = rect.left() + TIME_LABEL_WIDTH + idx as f32 * col_width;
        let color = if *day == today {
            Color32::from_rgb(255, 150, 100)
        } else if is_weekend(*day) {
            Color32::from_rgb(170, 170, 200)
        } else {
            Color32::GRAY
        };
        painter.text(
            Pos2::new(x + col_width / 2.0, rect.center().y),
            Align2::CENTER_CENTER,
            day.format("%a %-m/%-d").to_string(),
            FontId::proportional(13.0),
            color,
        );
    }
}

/// The full-width stacked ribbon for all-day events.
pub fn draw_all_day_ribbon(
    ui: &mut egui::Ui,
    events: &[Event],
    view: &ViewState,
    surface_width: f32,
    panel_height: f32,
) -> GridResponse {
    let mut response = GridResponse::default();
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(TIME_LABEL_WIDTH + surface_width, panel_height),
        Sense::hover(),
    );
    let now = Local::now();

    ui.painter().rect_filled(
        rect,
        0.0,
        ui.visuals().faint_bg_color,
    );

    for event in events.iter().filter(|e| e.all_day) {
        let span = horizontal_span(event, view.mode, view.anchor, surface_width);
        if span.width <= 0.0 {
            continue;
        }
        let top = rect.top() + 2.0 + event.column_index as f32 * ALL_DAY_ROW_PITCH;
        let card = Rect::from_min_size(
            Pos2::new(rect.left() + TIME_LABEL_WIDTH + span.x + 1.0, top),
            Vec2::new(span.width - 2.0, ALL_DAY_ROW_PITCH - 2.0),
        );
        if !rect.intersects(card) {
            continue;
        }

        ui.painter()
            .rect_filled(card, 4.0, event_color(event, now));
        ui.painter().text(
            Pos2::new(card.left() + 6.0, card.center().y),
            Align2::LEFT_CENTER,
            &event.title,
            FontId::proportional(11.0),
            Color32::WHITE,
        );

        let id = ui.id().with(("all_day", event.id));
        if ui.interact(card, id, Sense::click()).double_clicked() {
            response.edit_event = event.id;
        }
    }

    response
}

/// The hour-scaled time grid with one column per visible day and one lane
/// per overlap column.
pub fn draw_time_grid(
    ui: &mut egui::Ui,
    events: &[Event],
    view: &ViewState,
    settings: &Settings,
    surface_width: f32,
) -> GridResponse {
    let mut response = GridResponse::default();
    let height = grid_height(
        settings.display_start_hour,
        settings.display_end_hour,
        PIXELS_PER_HOUR,
    );
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(TIME_LABEL_WIDTH + surface_width, height + 1.0),
        Sense::hover(),
    );
    let grid_left = rect.left() + TIME_LABEL_WIDTH;
    let now = Local::now();

    // Hour lines and labels
    let labels = projection::hour_labels(settings.display_start_hour, settings.display_end_hour);
    for (idx, label) in labels.iter().enumerate() {
        let y = rect.top() + idx as f32 * PIXELS_PER_HOUR;
        ui.painter().line_segment(
            [Pos2::new(grid_left, y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
        ui.painter().text(
            Pos2::new(grid_left - 6.0, y),
            Align2::RIGHT_CENTER,
            label,
            FontId::proportional(11.0),
            Color32::GRAY,
        );
    }

    // Day column separators
    let days = view.visible_days();
    let col_width = surface_width / days.len() as f32;
    for idx in 0..=days.len() {
        let x = grid_left + idx as f32 * col_width;
        ui.painter().line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.top() + height)],
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
    }

    // Event cards
    for event in events.iter().filter(|e| !e.all_day) {
        let span = horizontal_span(event, view.mode, view.anchor, surface_width);
        if span.width <= 0.0 {
            continue;
        }
        let v = vertical_span(
            event.start,
            event.duration_hours(),
            settings.display_start_hour,
            PIXELS_PER_HOUR,
        );
        let card = Rect::from_min_size(
            Pos2::new(grid_left + span.x + 1.0, rect.top() + v.top),
            Vec2::new((span.width - 2.0).max(1.0), v.height.max(4.0)),
        );
        let visible_card = card.intersect(rect);
        if !visible_card.is_positive() {
            continue;
        }

        draw_event_card(ui, card, rect, event, now);

        let id = ui.id().with(("event", event.id));
        if ui
            .interact(visible_card, id, Sense::click())
            .double_clicked()
        {
            response.edit_event = event.id;
        }
    }

    // Current time indicator across today's column
    if let Some(day_idx) = days.iter().position(|d| *d == now.date_naive()) {
        let y = rect.top()
            + vertical_span(now, 0.0, settings.display_start_hour, PIXELS_PER_HOUR).top;
        if y >= rect.top() && y <= rect.top() + height {
            let x_start = grid_left + day_idx as f32 * col_width;
            let line_color = Color32::from_rgb(255, 100, 100);
            ui.painter().circle_filled(Pos2::new(x_start - 4.0, y), 3.0, line_color);
            ui.painter().line_segment(
                [Pos2::new(x_start, y), Pos2::new(x_start + col_width, y)],
                Stroke::new(2.0, line_color),
            );
        }
    }

    response
}

/// Paint one timed event card, using the L-shaped outline when the card
/// is big enough for the cutout.
fn draw_event_card(
    ui: &egui::Ui,
    card: Rect,
    clip: Rect,
    event: &Event,
    now: DateTime<Local>,
) {
    let painter = ui.painter_at(clip);
    let color = event_color(event, now);

    let outline = l_shape_outline(card.width(), card.height());
    if outline.len() == 6 {
        // Body above the cut plus the right-hand leg.
        let body = Rect::from_min_size(
            card.min,
            Vec2::new(card.width(), card.height() - CUT_HEIGHT),
        );
        let leg = Rect::from_min_size(
            Pos2::new(card.right() - LEG_WIDTH, card.bottom() - CUT_HEIGHT),
            Vec2::new(LEG_WIDTH, CUT_HEIGHT),
        );
        painter.rect_filled(body, 2.0, color);
        painter.rect_filled(leg, 0.0, color);
    } else {
        painter.rect_filled(card, 2.0, color);
    }

    let text_color = if event.end < now {
        Color32::from_rgba_unmultiplied(255, 255, 255, 180)
    } else {
        Color32::WHITE
    };
    painter.text(
        Pos2::new(card.left() + 4.0, card.top() + 3.0),
        Align2::LEFT_TOP,
        &event.title,
        FontId::proportional(11.0),
        text_color,
    );
}
