use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::ApiClient;
use crate::app::{App, Message, Model, update};

use super::effects::{ApiDispatcher, Dispatcher};

/// Longest time the loop sleeps in `poll` while idle, so service responses
/// and timers are picked up promptly.
const IDLE_POLL_MS: u64 = 100;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Apply one message and hand any queued requests to the dispatcher.
pub(super) fn apply(model: &mut Model, msg: Message, dispatcher: &dyn Dispatcher) {
    *model = update(std::mem::take(model), msg);
    flush_requests(model, dispatcher);
}

fn flush_requests(model: &mut Model, dispatcher: &dyn Dispatcher) {
    for request in model.take_requests() {
        tracing::debug!(?request, "dispatch");
        dispatcher.dispatch(request);
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or async runtime cannot be built,
    /// or the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("blogcraft-io")
            .build()
            .context("Failed to start async runtime")?;
        let client = ApiClient::new(&self.settings.api_url, self.settings.timeout)
            .context("Failed to build HTTP client")?;
        tracing::info!(api = client.base_url(), "starting");
        let (sender, mut results) = mpsc::unbounded_channel();
        let dispatcher = ApiDispatcher::new(runtime.handle().clone(), client, sender);

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - blogcraft requires an interactive terminal")?;
        let size = terminal.size()?;
        let _ = execute!(std::io::stdout(), EnableBracketedPaste);

        let mut model = Model::new(
            (size.width, size.height),
            self.settings.theme,
            self.settings.autosave,
        );
        model.api_url.clone_from(&self.settings.api_url);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        apply(&mut model, Message::Navigate(self.initial_route), &dispatcher);

        let result = Self::event_loop(&mut terminal, &mut model, &dispatcher, &mut results);

        let _ = execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        // In-flight requests are abandoned on exit.
        runtime.shutdown_timeout(Duration::from_millis(200));

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        dispatcher: &dyn Dispatcher,
        results: &mut UnboundedReceiver<Message>,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = elapsed_ms(start);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize");
                apply(model, Message::Resize(width, height), dispatcher);
                needs_render = true;
            }

            while let Ok(msg) = results.try_recv() {
                apply(model, msg, dispatcher);
                needs_render = true;
            }

            let saved_before = model.editor().and_then(|e| e.state.last_saved_at());
            apply(model, Message::Tick(now_ms), dispatcher);
            if model.editor().and_then(|e| e.state.last_saved_at()) != saved_before {
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so debouncers use accurate times.
                let event_ms = elapsed_ms(start);
                if let Some(msg) =
                    Self::handle_event(event::read()?, model, event_ms, &mut resize_debouncer)
                {
                    apply(model, msg, dispatcher);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = elapsed_ms(start);
                    if let Some(msg) =
                        Self::handle_event(event::read()?, model, drain_ms, &mut resize_debouncer)
                    {
                        apply(model, msg, dispatcher);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
