//! # Terminal Renderer
//!
//! Presents the document on a character grid:
//!
//! ```text
//! row 0        header: route, theme, transition, announcement
//! rows 1..     plain-text projection of the main container;
//!              the suggestion dropdown draws over its top rows
//! height - 4   latest notification or alert
//! height - 3   auth form state (profile page only)
//! height - 2   navigation bar
//! height - 1   command line
//! ```

use anyhow::Result;
use crossterm::style::Color;
use unicode_width::UnicodeWidthChar;

use super::document::ANNOUNCEMENT_ID;
use super::markup::to_plain_text;
use crate::app::events::{NotificationKind, ViewEvent};
use crate::app::io::{RenderStream, TerminalSize};
use crate::app::utils::PasswordRules;
use crate::app::view_models::{AuthBinding, TransitionState, ViewModel};

const FOOTER_ROWS: u16 = 4;

/// View renderer trait for different rendering backends
pub trait ViewRenderer {
    /// Initialize the terminal for rendering
    fn initialize(&mut self) -> Result<()>;

    /// Render the full application state
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Header and main container
    fn render_content(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_nav_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_auth_form(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_suggestions(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_notifications(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_command_line(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Redraw whatever `event` invalidated
    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()>;

    /// Cleanup terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Columns a character occupies; control characters take none
fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Cut `text` to at most `width` columns
fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += char_width(*c);
            used <= width
        })
        .collect()
}

/// Break `text` into rows of at most `width` columns
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > width {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(c);
        used += w;
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
        NotificationKind::Info => Color::Blue,
        NotificationKind::Warning => Color::Yellow,
    }
}

fn mark(ok: bool) -> char {
    if ok {
        '✓'
    } else {
        '✗'
    }
}

/// Terminal renderer over any [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: TerminalSize,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn terminal_size(&self) -> TerminalSize {
        self.terminal_size
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    fn width(&self) -> usize {
        usize::from(self.terminal_size.0)
    }

    fn footer_row(&self, offset_from_bottom: u16) -> u16 {
        self.terminal_size.1.saturating_sub(offset_from_bottom)
    }

    /// Last row the main container may use
    fn content_bottom(&self) -> u16 {
        self.terminal_size.1.saturating_sub(FOOTER_ROWS + 1)
    }

    fn write_row(&mut self, y: u16, text: &str) -> Result<()> {
        self.render_stream.clear_line(y)?;
        self.render_stream.move_cursor(0, y)?;
        let line = truncate(text, self.width());
        self.render_stream.write_all(line.as_bytes())?;
        Ok(())
    }

    fn write_colored_row(&mut self, y: u16, text: &str, color: Color) -> Result<()> {
        self.render_stream.set_foreground(color)?;
        self.write_row(y, text)?;
        self.render_stream.reset_color()?;
        Ok(())
    }

    fn header_text(view_model: &ViewModel) -> String {
        let document = view_model.document();
        let mut header = format!(
            "niypher | {} | {} ({})",
            view_model.context().router.current().name,
            document.theme(),
            document.theme_icon()
        );
        if matches!(view_model.transition_state(), TransitionState::Transitioning { .. }) {
            header.push_str(" | 切换中");
        }
        if document.is_overlay_visible(ANNOUNCEMENT_ID) {
            header.push_str(" | [公告] 输入 close 关闭");
        }
        header
    }

    fn auth_form_text(view_model: &ViewModel) -> Option<String> {
        let form = view_model.auth_form();
        match view_model.auth_flow().binding() {
            AuthBinding::Unbound => None,
            AuthBinding::EmailStep => {
                let status = match &form.email_error {
                    Some(err) => err.to_string(),
                    None if form.next_enabled => "可以继续".to_string(),
                    None => String::new(),
                };
                Some(format!(
                    "邮箱: {} {} [下一步{}]",
                    form.email_input,
                    status,
                    if form.next_enabled { "" } else { " 不可用" }
                ))
            }
            AuthBinding::CredentialStep => {
                let mut text = format!("密码: {}", "*".repeat(form.password.chars().count()));
                if !view_model.context().auth.is_registered() {
                    let rules = [
                        (PasswordRules::LENGTH, "长度"),
                        (PasswordRules::UPPER, "大写"),
                        (PasswordRules::LOWER, "小写"),
                        (PasswordRules::DIGIT, "数字"),
                        (PasswordRules::SPECIAL, "特殊"),
                    ];
                    text.push_str(&format!(
                        " 确认: {}",
                        "*".repeat(form.confirm.chars().count())
                    ));
                    for (rule, label) in rules {
                        text.push_str(&format!(" {}{}", mark(form.checks.satisfies(rule)), label));
                    }
                    if form.mismatch_visible {
                        text.push_str(" 两次密码不一致");
                    }
                }
                text.push_str(&format!(
                    " [{}{}]",
                    form.action_label,
                    if form.action_enabled { "" } else { " 不可用" }
                ));
                Some(text)
            }
        }
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_content(view_model)?;
        self.render_suggestions(view_model)?;
        self.render_notifications(view_model)?;
        self.render_auth_form(view_model)?;
        self.render_nav_bar(view_model)?;
        self.render_command_line(view_model)?;
        Ok(())
    }

    fn render_content(&mut self, view_model: &ViewModel) -> Result<()> {
        self.write_row(0, &Self::header_text(view_model))?;

        let text = to_plain_text(view_model.document().content());
        let rows = wrap(&text, self.width());
        let bottom = self.content_bottom();
        for y in 1..=bottom {
            let row = rows.get(usize::from(y - 1)).map_or("", String::as_str);
            self.write_row(y, row)?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_nav_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let entries: Vec<String> = view_model
            .document()
            .nav_items()
            .iter()
            .map(|item| {
                let label = item.label.as_deref().unwrap_or(&item.target);
                if item.active {
                    format!("[{label}]")
                } else {
                    format!(" {label} ")
                }
            })
            .collect();
        let y = self.footer_row(2);
        self.write_row(y, &entries.join(" "))?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_auth_form(&mut self, view_model: &ViewModel) -> Result<()> {
        let y = self.footer_row(3);
        let text = Self::auth_form_text(view_model).unwrap_or_default();
        self.write_row(y, &text)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_suggestions(&mut self, view_model: &ViewModel) -> Result<()> {
        let search = view_model.search_box();
        if !search.is_visible() {
            return Ok(());
        }
        let bottom = self.content_bottom();
        for (index, suggestion) in search.suggestions().iter().enumerate() {
            let Ok(offset) = u16::try_from(index + 1) else {
                break;
            };
            if offset > bottom {
                break;
            }
            let pointer = if search.selected() == Some(index) { '>' } else { ' ' };
            let row = format!("{pointer} {}. {}", index + 1, suggestion.text);
            if search.selected() == Some(index) {
                self.write_colored_row(offset, &row, Color::Cyan)?;
            } else {
                self.write_row(offset, &row)?;
            }
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_notifications(&mut self, view_model: &ViewModel) -> Result<()> {
        let y = self.footer_row(4);
        let document = view_model.document();
        if let Some(latest) = document.notifications().last() {
            let text = latest.message.clone();
            self.write_colored_row(y, &text, notification_color(latest.kind))?;
        } else if let Some(alert) = document.last_alert() {
            let text = format!("提示: {alert}");
            self.write_row(y, &text)?;
        } else {
            self.write_row(y, "")?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_command_line(&mut self, view_model: &ViewModel) -> Result<()> {
        let y = self.footer_row(1);
        let text = format!("> {}", view_model.command_line());
        self.write_row(y, &text)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired | ViewEvent::ThemeUpdateRequired => {
                self.render_full(view_model)
            }
            ViewEvent::ContentReplaced
            | ViewEvent::OverlayUpdateRequired
            | ViewEvent::SuggestionsUpdateRequired => {
                // the dropdown draws over the content rows
                self.render_content(view_model)?;
                self.render_suggestions(view_model)
            }
            ViewEvent::NavBarUpdateRequired => self.render_nav_bar(view_model),
            ViewEvent::AuthFormUpdateRequired => self.render_auth_form(view_model),
            ViewEvent::NotificationsUpdateRequired => self.render_notifications(view_model),
            ViewEvent::CommandLineUpdateRequired => self.render_command_line(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.flush()?;
        Ok(())
    }
}
