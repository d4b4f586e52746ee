//! # Auth Flow Controller
//!
//! Two-step sign-in state machine plus the live form state of the auth card.
//!
//! ```text
//! EmailEntry ──submit_email(ok)──▶ CredentialEntry{login | register}
//!     ▲                                   │
//!     └──────────────back─────────────────┘
//! CredentialEntry ──submit_credentials(ok)──▶ navigate home
//! any ──logout──▶ EmailEntry (reset), navigate profile
//! ```
//!
//! Markup is regenerated on every render, so the form is reset whenever the
//! auth card is redrawn and live validation only runs once [`bind`] has
//! attached to the elements of the current step.
//!
//! [`bind`]: AuthFlowController::bind

use super::core::AppContext;
use crate::app::events::{AuthStep, ModelEvent, NotificationKind, RouteName};
use crate::app::models::{AuthFlowState, SessionUser, UserRecord};
use crate::app::services::HumanVerification;
use crate::app::utils::{check_password, validate_email, EmailError, PasswordCheck};
use crate::app::views::Document;

pub const MSG_VERIFICATION_REQUIRED: &str = "请完成人机验证";
pub const MSG_WRONG_PASSWORD: &str = "密码错误";
pub const MSG_REGISTRATION_INVALID: &str = "请检查注册密码是否满足强度要求或重复密码是否一致。";
pub const MSG_REGISTERED: &str = "注册成功！已自动登录。";
pub const MSG_DUPLICATE_EMAIL: &str = "该邮箱已注册，请直接登录";
pub const MSG_LOGGED_OUT: &str = "已退出登录";

pub const LABEL_PROCESSING: &str = "处理中...";
pub const LABEL_LOGIN: &str = "登录";
pub const LABEL_REGISTER: &str = "注册";

/// A banner to raise on behalf of the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notice {
    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// What the view model should do after an auth operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    Stay,
    /// Redraw the auth card in place
    Rerender,
    Navigate(RouteName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub notice: Option<Notice>,
    pub next: NextStep,
    pub events: Vec<ModelEvent>,
}

impl AuthOutcome {
    fn stay() -> Self {
        Self {
            notice: None,
            next: NextStep::Stay,
            events: Vec::new(),
        }
    }

    fn with_notice(mut self, message: impl Into<String>, kind: NotificationKind) -> Self {
        self.notice = Some(Notice::new(message, kind));
        self
    }
}

/// Which element set live validation is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthBinding {
    #[default]
    Unbound,
    EmailStep,
    CredentialStep,
}

/// Live state of the inputs and controls on the auth card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    pub email_input: String,
    /// Visible inline email error
    pub email_error: Option<EmailError>,
    pub next_enabled: bool,
    pub password: String,
    pub confirm: String,
    pub checks: PasswordCheck,
    pub mismatch_visible: bool,
    pub action_enabled: bool,
    pub action_label: String,
}

impl AuthForm {
    /// The controls as freshly rendered for `state`
    fn rendered(state: &AuthFlowState) -> Self {
        Self {
            email_input: state.email().to_string(),
            email_error: None,
            next_enabled: false,
            password: String::new(),
            confirm: String::new(),
            checks: PasswordCheck::default(),
            mismatch_visible: false,
            action_enabled: false,
            action_label: action_label(state.is_registered()).to_string(),
        }
    }
}

fn action_label(is_registered: bool) -> &'static str {
    if is_registered {
        LABEL_LOGIN
    } else {
        LABEL_REGISTER
    }
}

#[derive(Debug)]
pub struct AuthFlowController {
    form: AuthForm,
    binding: AuthBinding,
}

impl AuthFlowController {
    pub fn new() -> Self {
        Self {
            form: AuthForm::rendered(&AuthFlowState::new()),
            binding: AuthBinding::Unbound,
        }
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn binding(&self) -> AuthBinding {
        self.binding
    }

    /// The auth card was redrawn; drop listeners and take the fresh controls
    pub fn reset_form(&mut self, state: &AuthFlowState) {
        self.form = AuthForm::rendered(state);
        self.binding = AuthBinding::Unbound;
    }

    /// Attach live validation to the elements of the current step.
    ///
    /// No-op when those elements are not in the document.
    pub fn bind(&mut self, state: &AuthFlowState, document: &Document) -> AuthBinding {
        self.binding = match state.step() {
            AuthStep::EmailEntry
                if document.has_element("auth-email") && document.has_element("email-next-btn") =>
            {
                AuthBinding::EmailStep
            }
            AuthStep::CredentialEntry
                if document.has_element("auth-pwd1")
                    && document.has_element("auth-action-btn") =>
            {
                AuthBinding::CredentialStep
            }
            _ => AuthBinding::Unbound,
        };
        match self.binding {
            AuthBinding::EmailStep => self.validate_email_live(),
            AuthBinding::CredentialStep => self.validate_credentials_live(state),
            AuthBinding::Unbound => {
                tracing::debug!("auth elements absent, nothing to bind");
            }
        }
        self.binding
    }

    pub fn input_email(&mut self, text: &str) {
        self.form.email_input = text.to_string();
        if self.binding == AuthBinding::EmailStep {
            self.validate_email_live();
        }
    }

    pub fn input_password(&mut self, state: &AuthFlowState, text: &str) {
        self.form.password = text.to_string();
        if self.binding == AuthBinding::CredentialStep {
            self.validate_credentials_live(state);
        }
    }

    pub fn input_confirm(&mut self, state: &AuthFlowState, text: &str) {
        self.form.confirm = text.to_string();
        if self.binding == AuthBinding::CredentialStep {
            self.validate_credentials_live(state);
        }
    }

    fn validate_email_live(&mut self) {
        match validate_email(&self.form.email_input) {
            Ok(_) => {
                self.form.email_error = None;
                self.form.next_enabled = true;
            }
            Err(EmailError::Empty) => {
                self.form.email_error = None;
                self.form.next_enabled = false;
            }
            Err(err) => {
                self.form.email_error = Some(err);
                self.form.next_enabled = false;
            }
        }
    }

    fn validate_credentials_live(&mut self, state: &AuthFlowState) {
        let form = &mut self.form;
        if state.is_registered() {
            form.action_enabled = !form.password.is_empty();
            return;
        }
        form.checks = check_password(&form.password);
        let matches = form.password == form.confirm;
        form.mismatch_visible = !form.password.is_empty() && !form.confirm.is_empty() && !matches;
        form.action_enabled = form.checks.all_valid() && matches;
    }

    /// Step 1 submit: validate, look the email up, move to step 2
    pub fn submit_email(&mut self, ctx: &mut AppContext) -> AuthOutcome {
        if ctx.auth.step() != AuthStep::EmailEntry {
            return AuthOutcome::stay();
        }
        let email = match validate_email(&self.form.email_input) {
            Ok(email) => email,
            Err(err) => {
                let err = match err {
                    EmailError::Empty => EmailError::InvalidFormat,
                    other => other,
                };
                tracing::debug!("email rejected: {}", err);
                self.form.email_error = Some(err);
                return AuthOutcome::stay();
            }
        };

        let is_registered = ctx.catalog.find_user(email.as_str()).is_some();
        tracing::info!(
            "email step passed for '{}' (registered: {})",
            email.as_str(),
            is_registered
        );
        let old_step = ctx.auth.step();
        ctx.auth.advance(email, is_registered);
        AuthOutcome {
            notice: None,
            next: NextStep::Rerender,
            events: vec![ModelEvent::AuthStepChanged {
                old_step,
                new_step: ctx.auth.step(),
            }],
        }
    }

    /// Step 2 submit: login or registration depending on the looked-up email
    pub fn submit_credentials(
        &mut self,
        ctx: &mut AppContext,
        verification: Option<&dyn HumanVerification>,
    ) -> AuthOutcome {
        if ctx.auth.step() != AuthStep::CredentialEntry {
            return AuthOutcome::stay();
        }
        if let Some(widget) = verification {
            if widget.response().is_none() {
                return AuthOutcome::stay()
                    .with_notice(MSG_VERIFICATION_REQUIRED, NotificationKind::Error);
            }
        }

        self.form.action_label = LABEL_PROCESSING.to_string();
        self.form.action_enabled = false;

        if ctx.auth.is_registered() {
            self.login(ctx)
        } else {
            self.register(ctx)
        }
    }

    fn login(&mut self, ctx: &mut AppContext) -> AuthOutcome {
        let matched = ctx
            .catalog
            .find_user(ctx.auth.email())
            .filter(|user| user.password == self.form.password)
            .map(SessionUser::from);

        let Some(user) = matched else {
            tracing::info!("login failed for '{}'", ctx.auth.email());
            self.restore_action(LABEL_LOGIN);
            return AuthOutcome::stay().with_notice(MSG_WRONG_PASSWORD, NotificationKind::Error);
        };

        tracing::info!("login succeeded for '{}'", user.email);
        let message = format!("登录成功: 欢迎回来，{}", user.name);
        let email = user.email.clone();
        ctx.catalog.set_session(Some(user));
        AuthOutcome {
            notice: Some(Notice::new(message, NotificationKind::Success)),
            next: NextStep::Navigate(RouteName::Home),
            events: vec![ModelEvent::SessionStarted { email }],
        }
    }

    fn register(&mut self, ctx: &mut AppContext) -> AuthOutcome {
        let checks = check_password(&self.form.password);
        if !checks.all_valid() || self.form.password != self.form.confirm {
            tracing::debug!("registration blocked, failed rules: {:?}", checks.failed());
            self.restore_action(LABEL_REGISTER);
            return AuthOutcome::stay()
                .with_notice(MSG_REGISTRATION_INVALID, NotificationKind::Error);
        }

        let email = ctx.auth.email().to_string();
        let nickname = email.split('@').next().unwrap_or_default().to_string();
        let record = UserRecord {
            email: email.clone(),
            password: self.form.password.clone(),
            nickname,
        };
        let session = SessionUser::from(&record);

        if let Err(err) = ctx.catalog.register_user(record) {
            tracing::warn!("registration rejected: {}", err);
            self.restore_action(LABEL_REGISTER);
            return AuthOutcome::stay().with_notice(MSG_DUPLICATE_EMAIL, NotificationKind::Error);
        }

        ctx.catalog.set_session(Some(session));
        AuthOutcome {
            notice: Some(Notice::new(MSG_REGISTERED, NotificationKind::Success)),
            next: NextStep::Navigate(RouteName::Home),
            events: vec![
                ModelEvent::UserRegistered {
                    email: email.clone(),
                },
                ModelEvent::SessionStarted { email },
            ],
        }
    }

    fn restore_action(&mut self, label: &str) {
        self.form.action_label = label.to_string();
        self.form.action_enabled = true;
    }

    /// Return to step 1 keeping the typed email
    pub fn back(&mut self, ctx: &mut AppContext) -> AuthOutcome {
        if ctx.auth.step() != AuthStep::CredentialEntry {
            return AuthOutcome::stay();
        }
        ctx.auth.return_to_email();
        AuthOutcome {
            notice: None,
            next: NextStep::Rerender,
            events: vec![ModelEvent::AuthStepChanged {
                old_step: AuthStep::CredentialEntry,
                new_step: AuthStep::EmailEntry,
            }],
        }
    }

    pub fn logout(&mut self, ctx: &mut AppContext) -> AuthOutcome {
        if let Some(user) = ctx.catalog.session() {
            tracing::info!("'{}' logged out", user.email);
        }
        ctx.catalog.set_session(None);
        ctx.auth.reset();
        AuthOutcome {
            notice: Some(Notice::new(MSG_LOGGED_OUT, NotificationKind::Info)),
            next: NextStep::Navigate(RouteName::Profile),
            events: vec![ModelEvent::SessionEnded],
        }
    }
}

impl Default for AuthFlowController {
    fn default() -> Self {
        Self::new()
    }
}
