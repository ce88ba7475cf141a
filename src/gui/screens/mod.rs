pub mod dashboard;
pub mod sign_in;

use iced::{Element, Subscription, Task};
use tracing::error;

use crate::gui::{AppState, Message};

pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

impl<S: Screen> Clone for ScreenMessage<S> {
    fn clone(&self) -> Self {
        match self {
            ScreenMessage::ScreenMessage(msg) => ScreenMessage::ScreenMessage(msg.clone()),
            ScreenMessage::ParentMessage(msg) => ScreenMessage::ParentMessage(msg.clone()),
        }
    }
}

impl<S: Screen> std::fmt::Debug for ScreenMessage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenMessage::ScreenMessage(msg) => f.debug_tuple("ScreenMessage").field(msg).finish(),
            ScreenMessage::ParentMessage(msg) => f.debug_tuple("ParentMessage").field(msg).finish(),
        }
    }
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        Subscription::none()
    }
}

pub enum ScreenData {
    SignIn(sign_in::SignInScreen),
    Dashboard(dashboard::DashboardScreen),
}

impl ScreenData {
    /// The screen the application opens on.
    pub fn initial(state: &AppState) -> (Self, Task<Message>) {
        if state.config.skip_auth {
            if let Some(opened) = Self::open_dashboard(state) {
                return opened;
            }
        }
        (
            ScreenData::SignIn(sign_in::SignInScreen::new()),
            Task::none(),
        )
    }

    fn open_dashboard(state: &AppState) -> Option<(Self, Task<Message>)> {
        match dashboard::DashboardScreen::new(state) {
            Ok((screen, task)) => Some((
                ScreenData::Dashboard(screen),
                task.map(ScreenMessage::ScreenMessage)
                    .map(Message::Dashboard),
            )),
            Err(e) => {
                error!("Failed to open dashboard: {e:#}");
                None
            }
        }
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::SignIn(screen) => screen.view().map(Message::SignIn),
            ScreenData::Dashboard(screen) => screen.view().map(Message::Dashboard),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            Message::SignIn(ScreenMessage::ParentMessage(
                sign_in::SignInParentMessage::Authenticated,
            )) => match ScreenData::open_dashboard(state) {
                Some((screen, task)) => {
                    *self = screen;
                    task.map(ScreenMessage::ScreenMessage)
                }
                None => Task::none(),
            },
            Message::Dashboard(ScreenMessage::ParentMessage(
                dashboard::DashboardParentMessage::GoBack,
            )) => {
                *self = ScreenData::SignIn(sign_in::SignInScreen::new());
                Task::none()
            }
            Message::SignIn(ScreenMessage::ScreenMessage(msg)) => match self {
                ScreenData::SignIn(page) => page
                    .update(msg, state)
                    .map(Message::SignIn)
                    .map(ScreenMessage::ScreenMessage),
                // Late message for a screen that is no longer shown.
                _ => Task::none(),
            },
            Message::Dashboard(ScreenMessage::ScreenMessage(msg)) => match self {
                ScreenData::Dashboard(page) => page
                    .update(msg, state)
                    .map(Message::Dashboard)
                    .map(ScreenMessage::ScreenMessage),
                _ => Task::none(),
            },
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        match self {
            ScreenData::SignIn(screen) => screen
                .subscription()
                .map(Message::SignIn)
                .map(ScreenMessage::ScreenMessage),
            ScreenData::Dashboard(_) => Subscription::none(),
        }
    }
}
