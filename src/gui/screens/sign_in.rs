use std::time::Duration;

use iced::{
    Alignment::Center,
    Element, Length, Subscription, Task,
    widget::{button, column, row, text, text_input},
};
use tracing::debug;

use crate::{
    core::auth::{AuthBackend, AuthEffect, AuthEvent, AuthFlow, AuthScreen, OTP_LENGTH},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{auth_layout, error_text, notice_text},
    },
};

#[derive(Debug, Clone, Default)]
pub struct SignInScreen {
    flow: AuthFlow,
}

#[derive(Debug, Clone)]
pub enum SignInParentMessage {
    Authenticated,
}

fn event(event: AuthEvent) -> ScreenMessage<SignInScreen> {
    ScreenMessage::ScreenMessage(event)
}

impl SignInScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn submit_button(&self, label: &'static str) -> Element<'_, ScreenMessage<Self>> {
        let label = self
            .flow
            .pending()
            .map_or(label, |action| action.progress_label());
        button(text(label))
            .on_press_maybe((!self.flow.is_pending()).then(|| event(AuthEvent::Submit)))
            .width(Length::Fill)
            .into()
    }

    fn back_button(&self) -> Element<'_, ScreenMessage<Self>> {
        button("Back")
            .style(button::secondary)
            .on_press_maybe((!self.flow.is_pending()).then(|| event(AuthEvent::Back)))
            .into()
    }

    fn feedback(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut col = column![];
        if let Some(e) = self.flow.error() {
            col = col.push(error_text(e));
        }
        if let Some(notice) = self.flow.notice() {
            col = col.push(notice_text(notice));
        }
        col.into()
    }

    fn login_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let form = self.flow.login_form();
        let body = column![
            text_input("Email", &form.email)
                .on_input(|value| event(AuthEvent::EmailChanged(value)))
                .on_submit(event(AuthEvent::Submit))
                .padding(8),
            row![
                text_input("Password", &form.password)
                    .secure(!form.show_password)
                    .on_input(|value| event(AuthEvent::PasswordChanged(value)))
                    .on_submit(event(AuthEvent::Submit))
                    .padding(8),
                button(if form.show_password { "Hide" } else { "Show" })
                    .style(button::text)
                    .on_press(event(AuthEvent::TogglePasswordVisibility)),
            ]
            .align_y(Center),
            self.feedback(),
            self.submit_button("Log In"),
            button("Forgot password?")
                .style(button::text)
                .on_press_maybe(
                    (!self.flow.is_pending()).then(|| event(AuthEvent::ForgotPassword))
                ),
        ]
        .spacing(12);

        auth_layout("Welcome back", "Sign in to the admin dashboard", body)
    }

    fn phone_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let body = column![
            text_input("Phone number", &self.flow.phone_form().phone)
                .on_input(|value| event(AuthEvent::PhoneChanged(value)))
                .on_submit(event(AuthEvent::Submit))
                .padding(8),
            self.feedback(),
            self.submit_button("Send OTP"),
            self.back_button(),
        ]
        .spacing(12);

        auth_layout(
            "Forgot password",
            "Enter the phone number linked to your account",
            body,
        )
    }

    fn otp_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let otp = self.flow.otp_form();
        let slots = (0..OTP_LENGTH).fold(row![].spacing(8), |slots, index| {
            let value = otp.digit(index).map(String::from).unwrap_or_default();
            slots.push(
                text_input("", &value)
                    .on_input(move |value| event(AuthEvent::OtpDigitChanged { index, value }))
                    .on_submit(event(AuthEvent::Submit))
                    .width(Length::Fixed(48.0))
                    .padding(8),
            )
        });

        let resend: Element<'_, ScreenMessage<Self>> = if otp.can_resend() {
            button("Resend OTP")
                .style(button::text)
                .on_press(event(AuthEvent::ResendOtp))
                .into()
        } else {
            text(format!("Resend OTP in {}s", otp.remaining_secs()))
                .size(14)
                .into()
        };

        let body = column![
            slots,
            self.feedback(),
            self.submit_button("Verify"),
            resend,
            self.back_button(),
        ]
        .spacing(12);

        auth_layout(
            "Verify OTP",
            format!("Enter the code sent to {}", self.flow.masked_phone()),
            body,
        )
    }

    fn new_password_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let form = self.flow.new_password_form();
        let body = column![
            row![
                text_input("New password", &form.new_password)
                    .secure(!form.show_new_password)
                    .on_input(|value| event(AuthEvent::NewPasswordChanged(value)))
                    .padding(8),
                button(if form.show_new_password { "Hide" } else { "Show" })
                    .style(button::text)
                    .on_press(event(AuthEvent::ToggleNewPasswordVisibility)),
            ]
            .align_y(Center),
            row![
                text_input("Confirm password", &form.confirm_password)
                    .secure(!form.show_confirm_password)
                    .on_input(|value| event(AuthEvent::ConfirmPasswordChanged(value)))
                    .on_submit(event(AuthEvent::Submit))
                    .padding(8),
                button(if form.show_confirm_password { "Hide" } else { "Show" })
                    .style(button::text)
                    .on_press(event(AuthEvent::ToggleConfirmPasswordVisibility)),
            ]
            .align_y(Center),
            self.feedback(),
            self.submit_button("Change Password"),
            self.back_button(),
        ]
        .spacing(12);

        auth_layout("Set new password", "Choose a new password", body)
    }
}

impl Screen for SignInScreen {
    type Message = AuthEvent;
    type ParentMessage = SignInParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self.flow.screen() {
            AuthScreen::Login => self.login_view(),
            AuthScreen::EnterPhone => self.phone_view(),
            AuthScreen::EnterOtp => self.otp_view(),
            AuthScreen::SetNewPassword => self.new_password_view(),
        }
    }

    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<ScreenMessage<Self>> {
        match self.flow.handle(message) {
            Ok(AuthEffect::None) => Task::none(),
            Ok(AuthEffect::Pending(action)) => {
                let backend = state.backend.clone();
                Task::perform(
                    async move {
                        backend.perform(&action).await;
                        action
                    },
                    |action| event(AuthEvent::Resolved(action)),
                )
            }
            Ok(AuthEffect::Authenticated) => Task::done(ScreenMessage::ParentMessage(
                SignInParentMessage::Authenticated,
            )),
            // Validation errors are already on the flow and rendered inline.
            Err(e) if e.is_validation() => Task::none(),
            Err(e) => {
                debug!(error = %e, "auth event dropped");
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        if self.flow.screen() == AuthScreen::EnterOtp && !self.flow.otp_form().can_resend() {
            iced::time::every(Duration::from_secs(1))
                .map(|_| ScreenMessage::ScreenMessage(AuthEvent::Tick))
        } else {
            Subscription::none()
        }
    }
}
