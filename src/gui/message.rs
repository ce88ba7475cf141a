use crate::gui::screens::{ScreenMessage, dashboard::DashboardScreen, sign_in::SignInScreen};

#[derive(Debug, Clone)]
pub enum Message {
    SignIn(ScreenMessage<SignInScreen>),
    Dashboard(ScreenMessage<DashboardScreen>),
}
