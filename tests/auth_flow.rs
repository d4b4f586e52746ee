mod common;

use common::{
    act, enter_email, go, latest_notification, profile_label, started, view_model, SEEDED_EMAIL,
    SEEDED_PASSWORD,
};
use niypher::app::commands::UserAction;
use niypher::app::events::{AuthStep, ModelEvent, NotificationKind, RouteName, Theme};
use niypher::app::services::{HumanVerification, StaticVerification};
use niypher::app::utils::{EmailError, PasswordRules};
use niypher::app::view_models::auth_flow::{
    MSG_LOGGED_OUT, MSG_REGISTERED, MSG_REGISTRATION_INVALID, MSG_VERIFICATION_REQUIRED,
    MSG_WRONG_PASSWORD,
};
use niypher::app::view_models::{AuthBinding, PROFILE_LABEL_GUEST};
use std::sync::{Arc, Mutex};

/// Widget that records the theme of every render
struct RecordingVerification {
    renders: Arc<Mutex<Vec<Theme>>>,
}

impl HumanVerification for RecordingVerification {
    fn render(&mut self, _container: &str, _site_key: &str, theme: Theme) -> anyhow::Result<()> {
        self.renders.lock().unwrap().push(theme);
        Ok(())
    }

    fn response(&self) -> Option<String> {
        Some("solved".to_string())
    }
}

#[test]
fn unknown_email_should_lead_to_registration() {
    let mut vm = started("profile");
    enter_email(&mut vm, "a@qq.com");

    let auth = &vm.context().auth;
    assert_eq!(auth.step(), AuthStep::CredentialEntry);
    assert_eq!(auth.email(), "a@qq.com");
    assert!(!auth.is_registered());
    assert!(vm.document().has_element("auth-pwd2"));
    assert_eq!(vm.auth_flow().binding(), AuthBinding::CredentialStep);
}

#[test]
fn known_email_should_lead_to_login() {
    let mut vm = started("profile");
    enter_email(&mut vm, SEEDED_EMAIL);

    let auth = &vm.context().auth;
    assert_eq!(auth.step(), AuthStep::CredentialEntry);
    assert!(auth.is_registered());
    assert!(!vm.document().has_element("auth-pwd2"));
    assert_eq!(vm.auth_form().action_label, "登录");
}

#[test]
fn unsupported_domain_should_block_next() {
    let mut vm = started("profile");
    act(&mut vm, UserAction::InputEmail("someone@foo.org".to_string()));

    assert_eq!(
        vm.auth_form().email_error,
        Some(EmailError::UnsupportedDomain)
    );
    assert!(!vm.auth_form().next_enabled);

    act(&mut vm, UserAction::SubmitEmail);
    assert_eq!(vm.context().auth.step(), AuthStep::EmailEntry);
}

#[test]
fn malformed_email_should_show_format_error() {
    let mut vm = started("profile");
    act(&mut vm, UserAction::InputEmail("not-an-email".to_string()));
    assert_eq!(vm.auth_form().email_error, Some(EmailError::InvalidFormat));
    assert_eq!(
        vm.auth_form().email_error.map(|e| e.to_string()).as_deref(),
        Some("请正确输入邮箱格式")
    );
}

#[test]
fn weak_password_should_report_each_failed_rule() {
    let mut vm = started("profile");
    enter_email(&mut vm, "a@qq.com");
    act(&mut vm, UserAction::InputPassword("password".to_string()));

    let checks = vm.auth_form().checks;
    assert!(checks.satisfies(PasswordRules::LENGTH));
    assert!(checks.satisfies(PasswordRules::LOWER));
    assert!(!checks.satisfies(PasswordRules::UPPER));
    assert!(!checks.satisfies(PasswordRules::DIGIT));
    assert!(!checks.satisfies(PasswordRules::SPECIAL));
    assert!(!vm.auth_form().action_enabled);
}

#[test]
fn mismatched_confirmation_should_block_registration() {
    let mut vm = started("profile");
    enter_email(&mut vm, "a@qq.com");
    act(&mut vm, UserAction::InputPassword("Password1!".to_string()));
    act(&mut vm, UserAction::InputConfirm("Password2!".to_string()));

    assert!(vm.auth_form().checks.all_valid());
    assert!(vm.auth_form().mismatch_visible);
    assert!(!vm.auth_form().action_enabled);

    // the disabled button swallows the click
    act(&mut vm, UserAction::SubmitCredentials);
    assert!(!vm.context().catalog.is_logged_in());
    assert_ne!(
        latest_notification(&vm).as_deref(),
        Some(MSG_REGISTRATION_INVALID)
    );
}

#[test]
fn seeded_user_should_log_in() {
    let mut vm = started("profile");
    vm.collect_pending_model_events();
    enter_email(&mut vm, SEEDED_EMAIL);
    act(&mut vm, UserAction::InputPassword(SEEDED_PASSWORD.to_string()));
    act(&mut vm, UserAction::SubmitCredentials);

    assert!(vm.context().catalog.is_logged_in());
    assert_eq!(vm.context().router.current().name, RouteName::Home);
    assert_eq!(
        latest_notification(&vm).as_deref(),
        Some("登录成功: 欢迎回来，AdminUser")
    );
    let events = vm.collect_pending_model_events();
    assert!(events.contains(&ModelEvent::SessionStarted {
        email: SEEDED_EMAIL.to_string()
    }));
}

#[test]
fn wrong_password_should_keep_state() {
    let mut vm = started("profile");
    enter_email(&mut vm, SEEDED_EMAIL);
    act(&mut vm, UserAction::InputPassword("nope".to_string()));
    act(&mut vm, UserAction::SubmitCredentials);

    assert!(!vm.context().catalog.is_logged_in());
    assert_eq!(vm.context().auth.step(), AuthStep::CredentialEntry);
    assert_eq!(vm.context().router.current().name, RouteName::Profile);

    let latest = vm.document().notifications().last().cloned().unwrap();
    assert_eq!(latest.message, MSG_WRONG_PASSWORD);
    assert_eq!(latest.kind, NotificationKind::Error);
    assert!(vm.auth_form().action_enabled);
    assert_eq!(vm.auth_form().action_label, "登录");
}

#[test]
fn registration_should_sign_in_new_user() {
    let mut vm = started("profile");
    enter_email(&mut vm, "newbie@gmail.com");
    act(&mut vm, UserAction::InputPassword("Secret#123".to_string()));
    act(&mut vm, UserAction::InputConfirm("Secret#123".to_string()));
    assert!(vm.auth_form().action_enabled);

    act(&mut vm, UserAction::SubmitCredentials);

    let catalog = &vm.context().catalog;
    assert!(catalog.find_user("newbie@gmail.com").is_some());
    assert_eq!(catalog.registered_users().len(), 2);
    assert_eq!(
        catalog.session().map(|s| s.name.as_str()),
        Some("newbie")
    );
    assert_eq!(latest_notification(&vm).as_deref(), Some(MSG_REGISTERED));
    assert_eq!(vm.context().router.current().name, RouteName::Home);
}

#[test]
fn back_should_keep_typed_email() {
    let mut vm = started("profile");
    enter_email(&mut vm, "a@qq.com");
    act(&mut vm, UserAction::BackToEmail);

    assert_eq!(vm.context().auth.step(), AuthStep::EmailEntry);
    assert!(vm.document().content().contains(r#"value="a@qq.com""#));
    assert_eq!(vm.auth_form().email_input, "a@qq.com");
    assert_eq!(vm.auth_flow().binding(), AuthBinding::EmailStep);
    assert!(vm.auth_form().next_enabled);
}

#[test]
fn logout_should_reset_flow() {
    let mut vm = started("profile");
    enter_email(&mut vm, SEEDED_EMAIL);
    act(&mut vm, UserAction::InputPassword(SEEDED_PASSWORD.to_string()));
    act(&mut vm, UserAction::SubmitCredentials);
    go(&mut vm, "profile");
    assert!(vm.document().has_element("logout-btn"));

    act(&mut vm, UserAction::Logout);

    assert!(!vm.context().catalog.is_logged_in());
    assert_eq!(vm.context().auth.step(), AuthStep::EmailEntry);
    assert_eq!(vm.context().auth.email(), "");
    assert!(vm.document().has_element("auth-email"));
    assert_eq!(latest_notification(&vm).as_deref(), Some(MSG_LOGGED_OUT));
    assert_eq!(profile_label(&vm).as_deref(), Some(PROFILE_LABEL_GUEST));
}

#[test]
fn logged_out_logout_should_do_nothing() {
    let mut vm = started("profile");
    act(&mut vm, UserAction::Logout);
    assert!(vm.document().notifications().is_empty());
}

#[test]
fn unsolved_verification_should_block_credentials() {
    let mut vm = view_model();
    vm.set_verification(Box::new(StaticVerification::unsolved()));
    vm.start("profile");
    common::settle(&mut vm);

    enter_email(&mut vm, SEEDED_EMAIL);
    act(&mut vm, UserAction::InputPassword(SEEDED_PASSWORD.to_string()));
    act(&mut vm, UserAction::SubmitCredentials);

    assert!(!vm.context().catalog.is_logged_in());
    assert_eq!(latest_notification(&vm).as_deref(), Some(MSG_VERIFICATION_REQUIRED));
}

#[test]
fn verification_widget_should_render_with_current_theme() {
    let renders = Arc::new(Mutex::new(Vec::new()));
    let mut vm = view_model();
    vm.set_verification(Box::new(RecordingVerification {
        renders: Arc::clone(&renders),
    }));
    vm.start("profile");
    common::settle(&mut vm);
    // step 1 holds no widget container
    assert!(renders.lock().unwrap().is_empty());

    act(&mut vm, UserAction::ToggleTheme);
    enter_email(&mut vm, "a@qq.com");
    assert_eq!(*renders.lock().unwrap(), vec![Theme::Dark]);
}
