//! The sign-in and password-recovery flow.
//!
//! [`AuthFlow`] is a state machine over four screens. Input events are
//! applied synchronously; a valid submit puts the flow into a pending
//! state and hands a [`PendingAction`] to the host, which runs it through
//! an [`AuthBackend`] and reports back with [`AuthEvent::Resolved`].
//! While an action is pending no further submit or navigation is
//! accepted.

mod backend;
mod forms;

use thiserror::Error;
use tracing::{debug, info, warn};

pub use backend::{AuthBackend, SIMULATED_LATENCY, SimulatedBackend};
pub use forms::{
    LoginForm, NewPasswordForm, OTP_LENGTH, OtpForm, PhoneForm, RESEND_COUNTDOWN_SECS, mask_phone,
};

/// Code the simulated verification accepts.
pub const EXPECTED_OTP: &str = "1234";

pub const PASSWORD_CHANGED_NOTICE: &str =
    "Password changed successfully! Please log in with your new password.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScreen {
    #[default]
    Login,
    EnterPhone,
    EnterOtp,
    SetNewPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    LogIn,
    SendOtp { phone: String },
    VerifyOtp,
    ChangePassword,
}

impl PendingAction {
    /// Label for the submit button while this action runs.
    pub fn progress_label(&self) -> &'static str {
        match self {
            PendingAction::LogIn => "Logging In...",
            PendingAction::SendOtp { .. } => "Sending OTP...",
            PendingAction::VerifyOtp => "Verifying...",
            PendingAction::ChangePassword => "Changing Password...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please enter both email and password.")]
    MissingCredentials,
    #[error("Please enter your phone number.")]
    MissingPhone,
    #[error("Invalid OTP. Please try again.")]
    InvalidOtp,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("New password cannot be empty.")]
    EmptyPassword,
    #[error("A request is already in progress.")]
    Busy,
    #[error("Sign-in has already completed.")]
    Finished,
}

impl AuthError {
    /// Errors the user caused by what they typed, shown next to the form.
    pub fn is_validation(&self) -> bool {
        !matches!(self, AuthError::Busy | AuthError::Finished)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    EmailChanged(String),
    PasswordChanged(String),
    TogglePasswordVisibility,
    ForgotPassword,
    PhoneChanged(String),
    OtpDigitChanged { index: usize, value: String },
    ResendOtp,
    /// One second elapsed.
    Tick,
    NewPasswordChanged(String),
    ConfirmPasswordChanged(String),
    ToggleNewPasswordVisibility,
    ToggleConfirmPasswordVisibility,
    Submit,
    Back,
    Resolved(PendingAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEffect {
    None,
    /// The host must run this action and report back.
    Pending(PendingAction),
    /// Sign-in succeeded; the flow is finished.
    Authenticated,
}

#[derive(Debug, Clone, Default)]
pub struct AuthFlow {
    screen: AuthScreen,
    login: LoginForm,
    phone: PhoneForm,
    otp: OtpForm,
    new_password: NewPasswordForm,
    pending_phone: Option<String>,
    pending: Option<PendingAction>,
    error: Option<AuthError>,
    notice: Option<&'static str>,
    finished: bool,
}

impl AuthFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> AuthScreen {
        self.screen
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn phone_form(&self) -> &PhoneForm {
        &self.phone
    }

    pub fn otp_form(&self) -> &OtpForm {
        &self.otp
    }

    pub fn new_password_form(&self) -> &NewPasswordForm {
        &self.new_password
    }

    pub fn pending_phone(&self) -> Option<&str> {
        self.pending_phone.as_deref()
    }

    /// The carried phone number as shown on the verification screen.
    pub fn masked_phone(&self) -> String {
        mask_phone(self.pending_phone.as_deref().unwrap_or_default())
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Applies one event. Validation failures are returned and also kept
    /// for display until the next submit or screen change.
    pub fn handle(&mut self, event: AuthEvent) -> Result<AuthEffect, AuthError> {
        if self.finished {
            return Err(AuthError::Finished);
        }

        match event {
            AuthEvent::EmailChanged(email) => self.login.email = email,
            AuthEvent::PasswordChanged(password) => self.login.password = password,
            AuthEvent::TogglePasswordVisibility => {
                self.login.show_password = !self.login.show_password
            }
            AuthEvent::PhoneChanged(phone) => self.phone.phone = phone,
            AuthEvent::OtpDigitChanged { index, value } => {
                if !self.otp.input(index, &value) {
                    debug!(index, value = %value, "rejected OTP input");
                }
            }
            AuthEvent::NewPasswordChanged(password) => self.new_password.new_password = password,
            AuthEvent::ConfirmPasswordChanged(password) => {
                self.new_password.confirm_password = password
            }
            AuthEvent::ToggleNewPasswordVisibility => {
                self.new_password.show_new_password = !self.new_password.show_new_password
            }
            AuthEvent::ToggleConfirmPasswordVisibility => {
                self.new_password.show_confirm_password =
                    !self.new_password.show_confirm_password
            }
            AuthEvent::Tick => {
                if self.screen == AuthScreen::EnterOtp {
                    self.otp.tick();
                }
            }
            AuthEvent::ResendOtp => self.resend_otp(),
            AuthEvent::ForgotPassword => {
                if self.screen == AuthScreen::Login && !self.is_pending() {
                    self.go_to(AuthScreen::EnterPhone);
                }
            }
            AuthEvent::Back => {
                if !self.is_pending() {
                    self.back();
                }
            }
            AuthEvent::Submit => return self.submit(),
            AuthEvent::Resolved(action) => return Ok(self.resolve(action)),
        }
        Ok(AuthEffect::None)
    }

    /// Applies `event` and, if it starts a request, runs it on `backend`
    /// and applies the outcome.
    pub async fn drive<B: AuthBackend>(
        &mut self,
        backend: &B,
        event: AuthEvent,
    ) -> Result<AuthEffect, AuthError> {
        match self.handle(event)? {
            AuthEffect::Pending(action) => {
                backend.perform(&action).await;
                self.handle(AuthEvent::Resolved(action))
            }
            effect => Ok(effect),
        }
    }

    fn submit(&mut self) -> Result<AuthEffect, AuthError> {
        if self.is_pending() {
            return Err(AuthError::Busy);
        }
        self.error = None;
        self.notice = None;

        let action = match self.validate() {
            Ok(action) => action,
            Err(e) => {
                debug!(screen = ?self.screen, error = %e, "submit rejected");
                self.error = Some(e.clone());
                return Err(e);
            }
        };
        debug!(screen = ?self.screen, ?action, "submit accepted");
        self.pending = Some(action.clone());
        Ok(AuthEffect::Pending(action))
    }

    fn validate(&self) -> Result<PendingAction, AuthError> {
        match self.screen {
            AuthScreen::Login => {
                if self.login.is_complete() {
                    Ok(PendingAction::LogIn)
                } else {
                    Err(AuthError::MissingCredentials)
                }
            }
            AuthScreen::EnterPhone => {
                if self.phone.phone.is_empty() {
                    Err(AuthError::MissingPhone)
                } else {
                    Ok(PendingAction::SendOtp {
                        phone: self.phone.phone.clone(),
                    })
                }
            }
            AuthScreen::EnterOtp => {
                let code = self.otp.code();
                if code.len() == OTP_LENGTH && code == EXPECTED_OTP {
                    Ok(PendingAction::VerifyOtp)
                } else {
                    Err(AuthError::InvalidOtp)
                }
            }
            AuthScreen::SetNewPassword => {
                let form = &self.new_password;
                if form.new_password != form.confirm_password {
                    Err(AuthError::PasswordMismatch)
                } else if form.new_password.is_empty() {
                    Err(AuthError::EmptyPassword)
                } else {
                    Ok(PendingAction::ChangePassword)
                }
            }
        }
    }

    fn resolve(&mut self, action: PendingAction) -> AuthEffect {
        if self.pending.as_ref() != Some(&action) {
            warn!(?action, pending = ?self.pending, "ignoring stale resolution");
            return AuthEffect::None;
        }
        self.pending = None;

        match action {
            PendingAction::LogIn => {
                info!("authenticated");
                self.finished = true;
                AuthEffect::Authenticated
            }
            PendingAction::SendOtp { phone } => {
                debug!("verification code sent");
                self.pending_phone = Some(phone);
                self.go_to(AuthScreen::EnterOtp);
                AuthEffect::None
            }
            PendingAction::VerifyOtp => {
                self.go_to(AuthScreen::SetNewPassword);
                AuthEffect::None
            }
            PendingAction::ChangePassword => {
                info!("password changed");
                self.go_to(AuthScreen::Login);
                self.notice = Some(PASSWORD_CHANGED_NOTICE);
                AuthEffect::None
            }
        }
    }

    fn resend_otp(&mut self) {
        if self.screen != AuthScreen::EnterOtp || !self.otp.can_resend() || self.is_pending() {
            return;
        }
        debug!("resending verification code");
        self.otp.reset();
        self.error = None;
    }

    fn back(&mut self) {
        let target = match self.screen {
            AuthScreen::Login => return,
            AuthScreen::EnterPhone => AuthScreen::Login,
            AuthScreen::EnterOtp => AuthScreen::EnterPhone,
            AuthScreen::SetNewPassword => AuthScreen::EnterOtp,
        };
        self.go_to(target);
    }

    /// Switches screens; each screen starts from a fresh form.
    fn go_to(&mut self, screen: AuthScreen) {
        info!(from = ?self.screen, to = ?screen, "auth screen changed");
        self.screen = screen;
        self.error = None;
        self.notice = None;
        match screen {
            AuthScreen::Login => {
                self.pending_phone = None;
                self.login = LoginForm::default();
            }
            AuthScreen::EnterPhone => self.phone = PhoneForm::default(),
            AuthScreen::EnterOtp => self.otp.reset(),
            AuthScreen::SetNewPassword => self.new_password = NewPasswordForm::default(),
        }
    }
}
