use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, RichText};
use vidembed_core::ContentType;

const TOAST_DURATION: f32 = 4.0; // seconds
const TOAST_FADE_OUT: f32 = 1.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ToastType {
    Success,
    Error,
}

pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self { message: message.into(), toast_type, created_at: Instant::now() }
    }
}

/// Colored label for a content type in the history list.
pub fn colored_text_by_type(text: &str, content_type: ContentType, dark: bool) -> RichText {
    let color = match (content_type, dark) {
        (ContentType::Movie, true) => Color32::LIGHT_GREEN,
        (ContentType::Movie, false) => Color32::DARK_GREEN,
        (ContentType::Series, true) => Color32::YELLOW,
        (ContentType::Series, false) => Color32::from_rgb(150, 110, 0),
    };
    RichText::new(text).color(color)
}

/// Draws the stacked toasts in the top-right corner and drops expired ones.
pub fn render_toasts(ctx: &egui::Context, toasts: &mut Vec<Toast>) {
    let now = Instant::now();
    toasts.retain(|toast| now.duration_since(toast.created_at).as_secs_f32() < TOAST_DURATION + TOAST_FADE_OUT);
    if toasts.is_empty() {
        return;
    }

    let screen_rect = ctx.screen_rect();
    let toast_width = 340.0;
    let margin = 16.0;

    for (i, toast) in toasts.iter().enumerate() {
        let elapsed = now.duration_since(toast.created_at).as_secs_f32();
        let alpha = if elapsed > TOAST_DURATION { 1.0 - (elapsed - TOAST_DURATION) / TOAST_FADE_OUT } else { 1.0 };
        let bg = match toast.toast_type {
            ToastType::Success => (60, 160, 80),
            ToastType::Error => (200, 60, 60),
        };
        let bg_color = Color32::from_rgba_unmultiplied(bg.0, bg.1, bg.2, (220.0 * alpha) as u8);
        let text_color = Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8);
        let pos = egui::pos2(screen_rect.right() - toast_width - margin, screen_rect.top() + margin + i as f32 * 54.0);

        egui::Area::new(egui::Id::new(("toast", i)))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(bg_color)
                    .rounding(8.0)
                    .inner_margin(egui::Margin::symmetric(14.0, 10.0))
                    .show(ui, |ui| {
                        ui.set_max_width(toast_width - 28.0);
                        ui.label(RichText::new(&toast.message).color(text_color));
                    });
            });
    }

    ctx.request_repaint_after(Duration::from_millis(100));
}
