//! # Application Controller
//!
//! Runs the event loop: reads key events, turns them into command events,
//! advances the ViewModel's clock and redraws what changed.

use crate::app::{
    commands::{CommandContext, CommandEvent, CommandRegistry},
    events::{ModelEvent, NotificationKind, ViewEvent},
    io::{EventStream, RenderStream},
    models::ContentCatalog,
    services::{local_hour, JsonFileStore, StaticVerification, ThemeManager},
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use crate::{cmd_args::CommandLineArgs, config};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

/// Longest the loop waits for input when no deferred task is queued
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Token the terminal front end answers the verification challenge with
const TERMINAL_VERIFICATION_TOKEN: &str = "terminal-session";

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Build the ViewModel from command line arguments and start it
    pub fn with_io_streams(
        cmd_args: CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let storage_path = config::expand_path(
            cmd_args
                .storage()
                .map_or_else(config::get_storage_path, str::to_string)
                .as_str(),
        );
        let store = JsonFileStore::open(&storage_path)
            .with_context(|| format!("Cannot open storage at {}", storage_path.display()))?;

        let mut theme = ThemeManager::init(Box::new(store), local_hour())?;
        if let Some(forced) = cmd_args.theme() {
            theme.override_session(forced);
        }

        let catalog = ContentCatalog::seeded()?;
        let mut view_model = ViewModel::new(catalog, theme, config::AppConfig::default());
        view_model.set_verification(Box::new(StaticVerification::solved(
            TERMINAL_VERIFICATION_TOKEN,
        )));

        Self::with_view_model(view_model, cmd_args.start(), event_stream, render_stream)
    }

    /// Wrap an already configured ViewModel and show `start_route`
    pub fn with_view_model(
        mut view_model: ViewModel,
        start_route: &str,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        view_model.start(start_route);

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;

        // the first frame covers everything start() produced
        self.view_model.collect_pending_view_events();
        self.view_renderer.render_full(&self.view_model)?;

        let mut last_tick = Instant::now();
        while !self.should_quit {
            let timeout = self
                .view_model
                .time_until_next_task()
                .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
            let ready = self.event_stream.poll(timeout)?;

            // a poll that timed out waited at least `timeout`
            let mut elapsed = last_tick.elapsed();
            if !ready {
                elapsed = elapsed.max(timeout);
            }
            last_tick = Instant::now();
            self.view_model.tick(elapsed);

            if ready {
                match self.event_stream.read()? {
                    Event::Key(key_event) => self.process_key_event(key_event)?,
                    Event::Resize(width, height) => {
                        self.view_renderer.update_size(width, height);
                        self.view_renderer.render_full(&self.view_model)?;
                    }
                    _ => {}
                }
            }

            let model_events = self.view_model.collect_pending_model_events();
            Self::log_model_events(&model_events);

            if !self.should_quit {
                let view_events = self.view_model.collect_pending_view_events();
                self.process_view_events(view_events)?;
            }
        }

        self.view_renderer.cleanup()?;
        Ok(())
    }

    /// Map one key press through the command registry and apply the result
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(());
        }
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::from_view_model(&self.view_model);
        match self.command_registry.process_event(key_event, &context) {
            Ok(events) => {
                for event in events {
                    self.apply_command_event(event);
                }
            }
            Err(e) => tracing::warn!("key event {:?} failed: {}", key_event.code, e),
        }
        Ok(())
    }

    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::CharInsertRequested(ch) => self.view_model.insert_command_char(ch),
            CommandEvent::CharDeleteRequested => self.view_model.delete_command_char(),
            CommandEvent::LineClearRequested => self.view_model.clear_command_line(),
            CommandEvent::ActionRequested(action) => {
                if let Err(e) = self.view_model.dispatch(action) {
                    tracing::error!("action failed: {:#}", e);
                    self.view_model
                        .notify(format!("操作失败: {e}"), NotificationKind::Error);
                }
            }
            CommandEvent::UnknownCommand(message) => {
                self.view_model.notify(message, NotificationKind::Warning);
            }
            CommandEvent::QuitRequested => {
                tracing::info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Whether the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get reference to view model (for testing)
    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    /// Get mutable reference to view model (for testing)
    pub fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    /// Model events only feed the log; the views react to view events
    fn log_model_events(model_events: &[ModelEvent]) {
        for event in model_events {
            match event {
                ModelEvent::SessionStarted { email } => tracing::info!(%email, "session started"),
                ModelEvent::SessionEnded => tracing::info!("session ended"),
                ModelEvent::UserRegistered { email } => tracing::info!(%email, "user registered"),
                other => tracing::debug!(event = ?other, "model event"),
            }
        }
    }

    /// Redraw each invalidated area once
    fn process_view_events(&mut self, view_events: Vec<ViewEvent>) -> Result<()> {
        if view_events.is_empty() {
            return Ok(());
        }
        if view_events.iter().any(|e| {
            matches!(
                e,
                ViewEvent::FullRedrawRequired | ViewEvent::ThemeUpdateRequired
            )
        }) {
            return self.view_renderer.render_full(&self.view_model);
        }

        let mut handled: Vec<ViewEvent> = Vec::with_capacity(view_events.len());
        for event in view_events {
            // content, overlay and suggestion updates share one redraw
            let key = match event {
                ViewEvent::OverlayUpdateRequired | ViewEvent::SuggestionsUpdateRequired => {
                    ViewEvent::ContentReplaced
                }
                other => other,
            };
            if handled.contains(&key) {
                continue;
            }
            self.view_renderer
                .handle_view_event(&key, &self.view_model)?;
            handled.push(key);
        }
        Ok(())
    }
}
