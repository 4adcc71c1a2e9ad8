use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};
use log::LevelFilter;
use vidembed_core::metadata::build_client;
use vidembed_core::{ContentType, Error as CoreError, FileStore, PlayOutcome, PlayRequest, Session, Theme, TmdbClient};

mod app_state;
mod config;
mod i18n;
mod icon;
mod logger;
mod models;
mod player;
mod storage;
mod ui_helpers;

use app_state::{Msg, PendingConfirm, PlayForm};
use config::{read_config, save_config};
use i18n::{content_type_label, entry_details, t};
use models::{Config, Language};
use player::open_embed;
use ui_helpers::{Toast, ToastType, colored_text_by_type, render_toasts};

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    logger::init(LevelFilter::Info);
    let config = read_config();
    logger::set_level(config.log_level);
    log::info!("VidEmbed {} starting, log file {}", env!("CARGO_PKG_VERSION"), logger::log_path().display());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([880.0, 620.0])
        .with_min_inner_size([560.0, 420.0])
        .with_icon(icon::generate_icon(256));
    let options = eframe::NativeOptions { viewport, ..Default::default() };
    eframe::run_native("VidEmbed", options, Box::new(move |_cc| Box::new(VidEmbedApp::new(config))))
}

enum HistoryAction {
    Play(usize),
    Delete(usize),
}

struct VidEmbedApp {
    config: Config,
    session: Session<FileStore>,
    tmdb: TmdbClient,
    form: PlayForm,
    api_key_draft: String,
    last_url: Option<String>,
    pending_lookups: usize,
    confirm: Option<PendingConfirm>,
    theme_applied: bool,

    // Async messaging
    tx: Sender<Msg>,
    rx: Receiver<Msg>,

    toasts: Vec<Toast>,
}

impl VidEmbedApp {
    fn new(config: Config) -> Self {
        let session = Session::with_embed_base(storage::open_store(), config.embed_base_url.clone());
        let http = build_client(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .connect_timeout(Duration::from_secs(config.request_timeout_secs.min(5)))
                .user_agent(concat!("VidEmbed/", env!("CARGO_PKG_VERSION"))),
        );
        let tmdb = TmdbClient::with_client(http, config.metadata_base_url.clone(), config.metadata_language.clone());
        let (tx, rx) = mpsc::channel();
        let api_key_draft = session.api_key().to_string();
        Self {
            config,
            session,
            tmdb,
            form: PlayForm::default(),
            api_key_draft,
            last_url: None,
            pending_lookups: 0,
            confirm: None,
            theme_applied: false,
            tx,
            rx,
            toasts: Vec::new(),
        }
    }

    fn lang(&self) -> Language {
        self.config.ui_language
    }

    fn add_toast(&mut self, message: String, toast_type: ToastType) {
        self.toasts.push(Toast::new(message, toast_type));
    }

    fn report_error(&mut self, key: &str, e: &dyn std::error::Error) {
        log::error!("{}: {}", key, e);
        let message = format!("{}: {}", t(key, self.lang()), e);
        self.add_toast(message, ToastType::Error);
    }

    /// Opens the embed URL right away and starts the title lookup; the
    /// history entry is written once the lookup comes back.
    fn play(&mut self, request: PlayRequest, ctx: &egui::Context) {
        let ticket = match self.session.begin_play(&request) {
            Ok(ticket) => ticket,
            Err(CoreError::EmptyContentId) => {
                self.add_toast(t("invalid_id", self.lang()), ToastType::Error);
                return;
            }
            Err(e) => {
                self.report_error("open_failed", &e);
                return;
            }
        };

        self.form.fill_from(&ticket.request);
        if let Err(e) = open_embed(&self.config, &ticket.url) {
            self.session.abandon(&ticket);
            self.report_error("open_failed", &e);
            return;
        }
        self.last_url = Some(ticket.url.clone());

        let tmdb = self.tmdb.clone();
        let api_key = self.session.api_key().to_string();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.pending_lookups += 1;
        tokio::spawn(async move {
            let title = tmdb.lookup_title(&ticket.request.id, ticket.request.content_type, &api_key).await;
            let _ = tx.send(Msg::TitleResolved { ticket, title });
            ctx.request_repaint();
        });
    }

    fn handle_msg(&mut self, msg: Msg) {
        match msg {
            Msg::TitleResolved { ticket, title } => {
                self.pending_lookups = self.pending_lookups.saturating_sub(1);
                let seq = ticket.seq;
                match self.session.complete_play(ticket, title) {
                    Ok(PlayOutcome::Recorded) => log::debug!("play #{} recorded", seq),
                    Ok(PlayOutcome::Superseded) => {}
                    Err(e) => self.report_error("storage_error", &e),
                }
            }
        }
    }

    fn save_api_key(&mut self) {
        if self.api_key_draft.trim() == self.session.api_key() {
            return;
        }
        match self.session.set_api_key(&self.api_key_draft) {
            Ok(()) => {
                self.api_key_draft = self.session.api_key().to_string();
                self.add_toast(t("api_key_saved", self.lang()), ToastType::Success);
            }
            Err(e) => self.report_error("storage_error", &e),
        }
    }

    fn toggle_theme(&mut self) {
        match self.session.toggle_theme() {
            Ok(_) => self.theme_applied = false,
            Err(e) => self.report_error("storage_error", &e),
        }
    }

    fn set_language(&mut self, lang: Language) {
        if self.config.ui_language == lang {
            return;
        }
        self.config.ui_language = lang;
        if let Err(e) = save_config(&self.config) {
            log::warn!("could not persist ui language: {}", e);
        }
    }

    fn apply_history_action(&mut self, action: HistoryAction, ctx: &egui::Context) {
        match action {
            HistoryAction::Play(index) => {
                if let Some(entry) = self.session.history().get(index).cloned() {
                    self.play(PlayRequest::from_entry(&entry), ctx);
                }
            }
            HistoryAction::Delete(index) => match self.session.delete_entry(index) {
                Ok(removed) => log::info!("removed {} {} from history", removed.content_type.as_str(), removed.id),
                Err(CoreError::Store(e)) => self.report_error("storage_error", &e),
                Err(e) => log::warn!("history delete ignored: {}", e),
            },
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let lang = self.lang();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(t("app_title", lang));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // the button offers the theme you would switch to
                    let label = match self.session.theme() {
                        Theme::Dark => t("theme_light", lang),
                        Theme::Light => t("theme_dark", lang),
                    };
                    if ui.button(label).clicked() {
                        self.toggle_theme();
                    }
                    let mut selected = lang;
                    egui::ComboBox::from_id_source("ui_language")
                        .selected_text(selected.code().to_uppercase())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut selected, Language::English, "English");
                            ui.selectable_value(&mut selected, Language::Spanish, "Español");
                        });
                    self.set_language(selected);
                    ui.label(t("language", lang));
                });
            });
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let lang = self.lang();
        let mut play_clicked = false;

        ui.horizontal(|ui| {
            ui.label(t("content_type", lang));
            egui::ComboBox::from_id_source("content_type")
                .selected_text(content_type_label(self.form.content_type, lang))
                .show_ui(ui, |ui| {
                    for ct in [ContentType::Movie, ContentType::Series] {
                        ui.selectable_value(&mut self.form.content_type, ct, content_type_label(ct, lang));
                    }
                });

            let id_edit = ui.add(
                egui::TextEdit::singleline(&mut self.form.id)
                    .hint_text(t("content_id", lang))
                    .desired_width(200.0),
            );
            if id_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                play_clicked = true;
            }

            if self.form.shows_episode_fields() {
                ui.label(t("season", lang));
                ui.add(egui::DragValue::new(&mut self.form.season).clamp_range(1..=999));
                ui.label(t("episode", lang));
                ui.add(egui::DragValue::new(&mut self.form.episode).clamp_range(1..=9999));
            }

            if ui.button(RichText::new(t("play", lang)).strong()).clicked() {
                play_clicked = true;
            }
        });

        ui.horizontal(|ui| {
            ui.label(t("api_key", lang));
            let key_edit = ui.add(
                egui::TextEdit::singleline(&mut self.api_key_draft)
                    .password(true)
                    .desired_width(280.0),
            );
            if key_edit.lost_focus() {
                self.save_api_key();
            }
            ui.label(RichText::new(t("api_key_hint", lang)).weak().small());
        });

        ui.horizontal(|ui| {
            if self.pending_lookups > 0 {
                ui.spinner();
                ui.label(t("looking_up_title", lang));
            }
            if let Some(url) = &self.last_url {
                ui.label(t("last_url", lang));
                ui.hyperlink_to(url.as_str(), url.as_str());
            }
        });

        if play_clicked {
            let request = self.form.to_request();
            self.play(request, ctx);
        }
    }

    fn render_history(&mut self, ui: &mut egui::Ui) -> Option<HistoryAction> {
        let lang = self.lang();
        let dark = self.session.theme() == Theme::Dark;
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading(t("history", lang));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let enabled = !self.session.history().is_empty();
                if ui.add_enabled(enabled, egui::Button::new(t("clear_history", lang))).clicked() {
                    self.confirm = Some(PendingConfirm::ClearHistory);
                }
            });
        });

        let history = self.session.history();
        if history.is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new(t("no_history", lang)).weak().italics());
            return None;
        }

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(220.0))
            .column(Column::initial(110.0))
            .column(Column::auto())
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong(t("title", lang));
                });
                header.col(|ui| {
                    ui.strong(t("details", lang));
                });
                header.col(|_ui| {});
            })
            .body(|body| {
                body.rows(28.0, history.len(), |i, mut row| {
                    let entry = &history[i];
                    row.col(|ui| {
                        if ui.link(entry.label()).clicked() {
                            action = Some(HistoryAction::Play(i));
                        }
                    });
                    row.col(|ui| {
                        ui.label(colored_text_by_type(&entry_details(entry, lang), entry.content_type, dark));
                    });
                    row.col(|ui| {
                        if ui.small_button("▶").clicked() {
                            action = Some(HistoryAction::Play(i));
                        }
                        if ui.small_button("🗑").on_hover_text(t("delete", lang)).clicked() {
                            action = Some(HistoryAction::Delete(i));
                        }
                    });
                });
            });

        action
    }

    fn render_confirm(&mut self, ctx: &egui::Context) {
        let Some(PendingConfirm::ClearHistory) = self.confirm else {
            return;
        };
        let lang = self.lang();
        let mut answer = None;
        egui::Window::new(t("clear_history", lang))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(t("confirm_clear", lang));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(t("yes", lang)).clicked() {
                        answer = Some(true);
                    }
                    if ui.button(t("cancel", lang)).clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => {
                self.confirm = None;
                match self.session.clear_history() {
                    Ok(()) => log::info!("history cleared"),
                    Err(e) => self.report_error("storage_error", &e),
                }
            }
            Some(false) => self.confirm = None,
            None => {}
        }
    }
}

impl eframe::App for VidEmbedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_msg(msg);
        }

        if !self.theme_applied {
            match self.session.theme() {
                Theme::Light => ctx.set_visuals(egui::Visuals::light()),
                Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
            }
            self.theme_applied = true;
        }

        self.render_top_bar(ctx);

        let mut history_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_form(ui, ctx);
            ui.separator();
            history_action = self.render_history(ui);
        });
        if let Some(action) = history_action {
            self.apply_history_action(action, ctx);
        }

        self.render_confirm(ctx);
        render_toasts(ctx, &mut self.toasts);
    }
}
