//! # Action Dispatching
//!
//! Applies user interactions to the ViewModel: auth card inputs and buttons,
//! announcement and theme controls, search input and the command line.

use anyhow::Result;

use super::auth_flow::{AuthOutcome, NextStep};
use super::core::ViewModel;
use super::scheduler::DeferredTask;
use super::search_box::SearchKeyOutcome;
use crate::app::commands::UserAction;
use crate::app::events::{ModelEvent, ViewEvent};
use crate::app::models::RouteParams;
use crate::app::services::icon_class_for;
use crate::app::views::{
    category_alert, ANNOUNCEMENT_ID, COMMENT_ALERT, DOWNLOAD_ALERT, FEEDBACK_ALERT,
    GAL_SEARCH_ALERT, REPORT_INVALID_ALERT, UPLOAD_ALERT,
};

impl ViewModel {
    /// Perform one user interaction
    pub fn dispatch(&mut self, action: UserAction) -> Result<()> {
        tracing::debug!("dispatching {:?}", action);
        match action {
            UserAction::Navigate { route, params } => self.push(route, params),
            UserAction::InputEmail(text) => {
                if self.document.has_element("auth-email") {
                    self.auth_flow.input_email(&text);
                    self.emit_view_event(ViewEvent::AuthFormUpdateRequired);
                }
            }
            UserAction::InputPassword(text) => {
                if self.document.has_element("auth-pwd1") {
                    self.auth_flow.input_password(&self.ctx.auth, &text);
                    self.emit_view_event(ViewEvent::AuthFormUpdateRequired);
                }
            }
            UserAction::InputConfirm(text) => {
                if self.document.has_element("auth-pwd2") {
                    self.auth_flow.input_confirm(&self.ctx.auth, &text);
                    self.emit_view_event(ViewEvent::AuthFormUpdateRequired);
                }
            }
            UserAction::SubmitEmail => {
                // a disabled button swallows the click
                if self.auth_flow.form().next_enabled {
                    let outcome = self.auth_flow.submit_email(&mut self.ctx);
                    self.apply_auth_outcome(outcome);
                }
            }
            UserAction::SubmitCredentials => {
                if self.auth_flow.form().action_enabled {
                    let outcome = self
                        .auth_flow
                        .submit_credentials(&mut self.ctx, self.verification.as_deref());
                    self.apply_auth_outcome(outcome);
                }
            }
            UserAction::BackToEmail => {
                let outcome = self.auth_flow.back(&mut self.ctx);
                self.apply_auth_outcome(outcome);
            }
            UserAction::Logout => {
                if self.ctx.catalog.is_logged_in() {
                    let outcome = self.auth_flow.logout(&mut self.ctx);
                    self.apply_auth_outcome(outcome);
                }
            }
            UserAction::CloseAnnouncement => self.close_announcement(),
            UserAction::ToggleTheme => self.toggle_theme()?,
            UserAction::SearchInput(text) => {
                let generation = self.search_box.set_input(&text);
                self.scheduler.schedule(
                    self.config.search_debounce,
                    DeferredTask::SearchDebounce { generation },
                );
            }
            UserAction::SearchKey(code) => match self.search_box.handle_key(code) {
                SearchKeyOutcome::Ignored => {}
                SearchKeyOutcome::Updated => {
                    self.emit_view_event(ViewEvent::SuggestionsUpdateRequired)
                }
                SearchKeyOutcome::Search(text) => self.perform_search(text),
            },
            UserAction::PickSuggestion(index) => {
                if let Some(text) = self.search_box.select(index) {
                    self.perform_search(text);
                }
            }
            UserAction::ClickOutside => {
                if self.search_box.click_outside() {
                    self.emit_view_event(ViewEvent::SuggestionsUpdateRequired);
                }
            }
            UserAction::GalSearch => {
                if self.document.has_element("gal-search") {
                    self.backend_alert(GAL_SEARCH_ALERT);
                }
            }
            UserAction::OpenCategory(name) => {
                if self.document.has_attribute("data-category", &name) {
                    self.backend_alert(category_alert(&name));
                }
            }
            UserAction::Download(index) => self.version_alert(index, DOWNLOAD_ALERT),
            UserAction::ReportInvalid(index) => self.version_alert(index, REPORT_INVALID_ALERT),
            UserAction::Feedback(index) => self.version_alert(index, FEEDBACK_ALERT),
            UserAction::UploadVersion => {
                if self.document.has_element("upload-drop") {
                    self.backend_alert(UPLOAD_ALERT);
                }
            }
            UserAction::SendComment(text) => {
                if self.document.has_element("comment-send") {
                    tracing::debug!("comment typed: '{}'", text);
                    self.backend_alert(COMMENT_ALERT);
                }
            }
            UserAction::AccountSetting(setting) => {
                if self.document.has_attribute("data-setting", setting.as_str()) {
                    self.backend_alert(setting.alert());
                }
            }
        }
        Ok(())
    }

    /// Controls without a backend only announce the call they would make
    fn backend_alert(&mut self, message: impl Into<String>) {
        self.document.alert(message);
        self.emit_view_event(ViewEvent::NotificationsUpdateRequired);
    }

    /// Version rows only exist for logged-in users
    fn version_alert(&mut self, index: usize, message: &str) {
        if self.document.has_attribute("data-version", &index.to_string()) {
            self.backend_alert(message);
        }
    }

    fn apply_auth_outcome(&mut self, outcome: AuthOutcome) {
        for event in outcome.events {
            self.emit_model_event(event);
        }
        if let Some(notice) = outcome.notice {
            self.show_notice(notice);
        }
        match outcome.next {
            NextStep::Stay => self.emit_view_event(ViewEvent::AuthFormUpdateRequired),
            NextStep::Rerender => self.rerender(),
            NextStep::Navigate(route) => self.push(route, RouteParams::new()),
        }
    }

    fn close_announcement(&mut self) {
        if !self.document.has_element(ANNOUNCEMENT_ID) {
            return;
        }
        self.document.hide_overlay(ANNOUNCEMENT_ID);
        if self.ctx.catalog.announcement().show {
            self.ctx.catalog.dismiss_announcement();
            tracing::info!("announcement dismissed for this session");
            self.emit_model_event(ModelEvent::AnnouncementDismissed);
        }
        self.emit_view_event(ViewEvent::OverlayUpdateRequired);
    }

    fn toggle_theme(&mut self) -> Result<()> {
        let theme = self.theme.toggle()?;
        self.document.set_theme(theme, icon_class_for(theme));
        self.emit_model_event(ModelEvent::ThemeChanged { theme });
        self.emit_view_event(ViewEvent::ThemeUpdateRequired);
        Ok(())
    }

    fn perform_search(&mut self, text: String) {
        tracing::info!("search submitted: '{}'", text);
        self.document.alert(format!("正在搜索: {text}"));
        self.emit_model_event(ModelEvent::SearchPerformed { query: text });
        self.emit_view_event(ViewEvent::SuggestionsUpdateRequired);
        self.emit_view_event(ViewEvent::NotificationsUpdateRequired);
    }

    /// Text typed on the terminal command line
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn insert_command_char(&mut self, ch: char) {
        self.command_line.push(ch);
        self.emit_view_event(ViewEvent::CommandLineUpdateRequired);
    }

    pub fn delete_command_char(&mut self) {
        if self.command_line.pop().is_some() {
            self.emit_view_event(ViewEvent::CommandLineUpdateRequired);
        }
    }

    pub fn clear_command_line(&mut self) {
        if !self.command_line.is_empty() {
            self.command_line.clear();
            self.emit_view_event(ViewEvent::CommandLineUpdateRequired);
        }
    }
}
