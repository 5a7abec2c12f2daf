use chrono::Local;
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_textarea::TextArea;

use crate::backend;

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    DriverName,
    Situation,
}

/// Settlement of a submission, sent from the network task back to the UI
/// loop. Exactly one is sent per submission, whatever the outcome.
#[derive(Debug)]
pub enum BackendMessage {
    Completed { token: u64, exchange: String },
    Failed { token: u64, message: String },
}

pub struct AppState {
    pub driver_name: TextArea<'static>,
    pub situation: TextArea<'static>,
    pub focus: Focus,
    pub loading: bool,
    pub error: Option<String>,
    pub exchange: Option<String>,
    pub received_at: Option<String>,
    pub scroll_offset: u16,
    pub backend_url: String,
    // Sequence number of the latest submission; settlements carrying an
    // older token are stale and dropped.
    submission: u64,
    client: Client,
    result_tx: mpsc::Sender<BackendMessage>,
    result_rx: mpsc::Receiver<BackendMessage>,
}

impl AppState {
    pub fn new(backend_url: String) -> Self {
        let mut driver_name = TextArea::default();
        driver_name.set_placeholder_text("e.g. Lewis Hamilton, Max Verstappen, Fernando Alonso");

        let mut situation = TextArea::default();
        situation.set_placeholder_text("e.g. tyres overheating, safety car restart, final lap battle");

        let (result_tx, result_rx) = mpsc::channel(16);

        Self {
            driver_name,
            situation,
            focus: Focus::DriverName,
            loading: false,
            error: None,
            exchange: None,
            received_at: None,
            scroll_offset: 0,
            backend_url,
            submission: 0,
            client: Client::new(),
            result_tx,
            result_rx,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut TextArea<'static> {
        match self.focus {
            Focus::DriverName => &mut self.driver_name,
            Focus::Situation => &mut self.situation,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Focus::DriverName => Focus::Situation,
            Focus::Situation => Focus::DriverName,
        };
    }

    pub fn driver_name_value(&self) -> String {
        self.driver_name.lines().join("\n").trim().to_string()
    }

    pub fn situation_value(&self) -> String {
        self.situation.lines().join("\n").trim().to_string()
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// Validate and fire a submission.
    ///
    /// A field that trims to empty sets the matching error and stops before
    /// any network activity. Otherwise prior error and exchange are cleared,
    /// the loading flag goes up, and the request runs on its own task; the
    /// settlement comes back through `process_backend_messages`.
    pub fn submit(&mut self) {
        let driver_name = self.driver_name_value();
        if driver_name.is_empty() {
            self.error = Some("Please enter a driver name".to_string());
            return;
        }

        let situation = self.situation_value();
        if situation.is_empty() {
            self.error = Some("Please enter a situation".to_string());
            return;
        }

        self.loading = true;
        self.error = None;
        self.exchange = None;
        self.submission += 1;

        let token = self.submission;
        let client = self.client.clone();
        let backend_url = self.backend_url.clone();
        let tx = self.result_tx.clone();

        info!(token, %driver_name, %situation, "Submitting exchange request");

        tokio::spawn(async move {
            let message =
                match backend::generate_exchange(&client, &backend_url, &driver_name, &situation)
                    .await
                {
                    Ok(exchange) => BackendMessage::Completed { token, exchange },
                    Err(err) => BackendMessage::Failed {
                        token,
                        message: err.user_message(),
                    },
                };
            // The receiver only goes away on shutdown.
            let _ = tx.send(message).await;
        });
    }

    /// Drain settlements from the network task. The loading flag clears on
    /// the current submission's settlement, success or failure; a stale
    /// token means an older request finished after a newer one started and
    /// its result is dropped.
    pub fn process_backend_messages(&mut self) {
        while let Ok(message) = self.result_rx.try_recv() {
            match message {
                BackendMessage::Completed { token, exchange } => {
                    if token != self.submission {
                        debug!(token, current = self.submission, "Dropping stale completion");
                        continue;
                    }
                    self.exchange = Some(exchange);
                    self.received_at = Some(Local::now().format("%H:%M:%S").to_string());
                    self.error = None;
                    self.scroll_offset = 0;
                    self.loading = false;
                }
                BackendMessage::Failed { token, message } => {
                    if token != self.submission {
                        debug!(token, current = self.submission, "Dropping stale failure");
                        continue;
                    }
                    self.error = Some(message);
                    self.exchange = None;
                    self.loading = false;
                }
            }
        }
    }
}
