//! # Mock I/O for Testing
//!
//! Scripted input and recorded output for driving the controller without a
//! terminal.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum ScriptStep {
    Event(Event),
    /// One poll that times out with nothing to read
    Idle,
}

/// Event stream replaying a script of key events and idle polls
#[derive(Debug, Default)]
pub struct MockEventStream {
    script: VecDeque<ScriptStep>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            script: events.into_iter().map(ScriptStep::Event).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: Event) {
        self.script.push_back(ScriptStep::Event(event));
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.push_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    /// Queue each character of `text` followed by Enter
    pub fn push_line(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_key(KeyCode::Char(ch));
        }
        self.push_key(KeyCode::Enter);
    }

    /// Queue a poll that times out, letting the full timeout elapse
    pub fn push_idle(&mut self) {
        self.script.push_back(ScriptStep::Idle);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        match self.script.front() {
            Some(ScriptStep::Event(_)) => Ok(true),
            Some(ScriptStep::Idle) => {
                self.script.pop_front();
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn read(&mut self) -> Result<Event> {
        match self.script.pop_front() {
            Some(ScriptStep::Event(event)) => Ok(event),
            _ => Err(anyhow::anyhow!("No events available")),
        }
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine(u16),
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    SetForeground(Color),
    ResetColor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

#[derive(Debug, Default)]
struct LogState {
    commands: Vec<RenderCommand>,
    text: String,
    raw_mode: bool,
    alternate_screen: bool,
    cursor_visible: bool,
}

/// Shared handle on everything a [`MockRenderStream`] received.
/// Stays readable after the stream moved into a controller.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    state: Arc<Mutex<LogState>>,
}

impl RenderLog {
    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.lock().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().commands.contains(command)
    }

    /// Text written since the last full clear
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lock().text.contains(needle)
    }

    pub fn clear_commands(&self) {
        self.lock().commands.clear();
    }

    pub fn raw_mode(&self) -> bool {
        self.lock().raw_mode
    }

    pub fn alternate_screen(&self) -> bool {
        self.lock().alternate_screen
    }

    pub fn cursor_visible(&self) -> bool {
        self.lock().cursor_visible
    }

    fn record(&self, command: RenderCommand) {
        let mut state = self.lock();
        match &command {
            RenderCommand::ClearScreen => state.text.clear(),
            RenderCommand::Write(text) => state.text.push_str(text),
            RenderCommand::HideCursor => state.cursor_visible = false,
            RenderCommand::ShowCursor => state.cursor_visible = true,
            RenderCommand::EnableRawMode => state.raw_mode = true,
            RenderCommand::DisableRawMode => state.raw_mode = false,
            RenderCommand::EnterAlternateScreen => state.alternate_screen = true,
            RenderCommand::LeaveAlternateScreen => state.alternate_screen = false,
            _ => {}
        }
        state.commands.push(command);
    }
}

/// Render stream recording every operation into a [`RenderLog`]
pub struct MockRenderStream {
    log: RenderLog,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        let log = RenderLog::default();
        log.lock().cursor_visible = true;
        Self {
            log,
            terminal_size: size,
        }
    }

    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log.record(RenderCommand::Write(
            String::from_utf8_lossy(buf).into_owned(),
        ));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.log.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ClearScreen);
        Ok(())
    }

    fn clear_line(&mut self, y: u16) -> Result<()> {
        self.log.record(RenderCommand::ClearLine(y));
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.log.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.log.record(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ShowCursor);
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.log.record(RenderCommand::SetForeground(color));
        Ok(())
    }

    fn reset_color(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ResetColor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::EnterAlternateScreen);
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::LeaveAlternateScreen);
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.log.record(RenderCommand::EnableRawMode);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.log.record(RenderCommand::DisableRawMode);
        Ok(())
    }
}
