// src/gui/app.rs
//
// Operator panel: store the apiKey, browse the backend's user directory.
// Pure presentation: every decision (validate, compare, dispatch) stays in
// the runner, which ticks on its own background thread.

use std::{
    error::Error,
    sync::{mpsc, Arc, Mutex},
    thread,
    time::Duration,
};

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::{
    backend::{self, FetchError},
    config::options::WatchOptions,
    data::UserEntry,
    progress::Progress,
    runner::{self, Outcome},
    store,
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Kraland Watcher",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(WatchOptions::default())))),
    )?;
    Ok(())
}

type FetchResult = Result<Vec<UserEntry>, FetchError>;

pub struct App {
    api_key_text: String,
    feedback: String,

    users: Vec<UserEntry>,
    fetch_error: Option<FetchError>,
    fetching: bool,
    rx: Option<mpsc::Receiver<FetchResult>>,

    // last watch-cycle outcome (watcher thread writes here)
    status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(options: WatchOptions) -> Self {
        let status = Arc::new(Mutex::new(s!("Idle")));

        // the watcher lives for the whole process; one immediate cycle,
        // then fixed ticks
        {
            let status = Arc::clone(&status);
            thread::spawn(move || {
                let mut progress = StatusProgress { status };
                if let Err(e) = runner::run(&options, Some(&mut progress)) {
                    loge!("Watcher thread stopped: {e}");
                }
            });
        }

        let mut app = Self {
            api_key_text: store::load_api_key().unwrap_or_default(),
            feedback: s!(),
            users: Vec::new(),
            fetch_error: None,
            fetching: false,
            rx: None,
            status,
        };
        app.refresh();
        app
    }

    fn refresh(&mut self) {
        if self.fetching {
            return;
        }
        let key = store::load_api_key();
        let (tx, rx) = mpsc::channel::<FetchResult>();
        self.rx = Some(rx);
        self.fetching = true;
        thread::spawn(move || {
            let _ = tx.send(backend::fetch_users(key.as_deref()));
        });
    }

    fn poll_fetch(&mut self) {
        let Some(rx) = &self.rx else { return };
        match rx.try_recv() {
            Ok(Ok(users)) => {
                logf!("Directory: loaded {} user(s)", users.len());
                self.users = users;
                self.fetch_error = None;
                self.fetching = false;
                self.rx = None;
            }
            Ok(Err(e)) => {
                loge!("Directory: fetch failed ({e})");
                self.users.clear();
                self.fetch_error = Some(e);
                self.fetching = false;
                self.rx = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.fetching = false;
                self.rx = None;
            }
        }
    }

    fn draw_directory(&self, ui: &mut egui::Ui) {
        if let Some(e) = &self.fetch_error {
            // body is already escaped and truncated by the backend client
            ui.colored_label(
                egui::Color32::RED,
                format!("Erreur lors du chargement ({e})"),
            );
            return;
        }
        if self.fetching {
            ui.label("Chargement…");
            return;
        }
        if self.users.is_empty() {
            ui.label("Aucun utilisateur enregistré.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder())
            .column(Column::auto())
            .header(18.0, |mut header| {
                header.col(|ui| { ui.strong("Nom"); });
                header.col(|ui| { ui.strong("PP"); });
            })
            .body(|mut body| {
                for u in &self.users {
                    body.row(16.0, |mut row| {
                        row.col(|ui| { ui.label(u.name.as_str()); });
                        row.col(|ui| {
                            let pp = u.pp.map_or_else(|| s!("n/a"), |v| v.to_string());
                            ui.label(pp);
                        });
                    });
                }
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_fetch();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let status = self.status.lock().map(|s| s.clone()).unwrap_or_default();
            ui.label(status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("apiKey:");
                ui.text_edit_singleline(&mut self.api_key_text);
                if ui.button("Save apiKey").clicked() {
                    match store::save_api_key(&self.api_key_text) {
                        Ok(()) => self.feedback = s!("apiKey saved"),
                        Err(e) => {
                            loge!("Failed to save apiKey: {e}");
                            self.feedback = s!("save failed");
                        }
                    }
                }
                if ui.button("Rafraîchir").clicked() {
                    self.refresh();
                }
            });
            if !self.feedback.is_empty() {
                ui.small(self.feedback.as_str());
            }

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_directory(ui);
            });
        });

        // keep polling the fetch channel and the watcher status
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

struct StatusProgress {
    status: Arc<Mutex<String>>,
}

impl Progress for StatusProgress {
    fn log(&mut self, msg: &str) {
        if let Ok(mut s) = self.status.lock() {
            *s = s!(msg);
        }
    }
    fn cycle_done(&mut self, outcome: &Outcome) {
        let line = match outcome {
            Outcome::Skipped => s!("Cycle: skipped (mobile context)"),
            Outcome::FetchFailed(e) => format!("Cycle: fetch failed: {e}"),
            Outcome::Rejected(r) => format!("Cycle: rejected ({r})"),
            Outcome::Unchanged => s!("Cycle: unchanged"),
            Outcome::Dispatched => s!("Cycle: dispatched"),
        };
        if let Ok(mut s) = self.status.lock() {
            *s = line;
        }
    }
}
