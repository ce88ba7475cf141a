use iced::{Element, Subscription, Task};
use tracing::info;

use crate::{
    config::AppConfig,
    gui::{
        AppState, Message,
        screens::{Screen, ScreenData, ScreenMessage},
    },
};

pub struct PatrolboardApp {
    screen: ScreenData,
    state: AppState,
}

/// The root screen has no parent, so every message it emits is its own.
fn unwrap_root(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

impl PatrolboardApp {
    pub fn new(config: AppConfig) -> (Self, Task<Message>) {
        let state = AppState::new(config);
        let (screen, task) = ScreenData::initial(&state);
        (Self { screen, state }, task)
    }

    pub fn title(&self) -> String {
        match self.screen {
            ScreenData::SignIn(_) => "Patrolboard - Sign In".to_string(),
            ScreenData::Dashboard(_) => "Patrolboard - Admin Dashboard".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen
            .update(message, &mut self.state)
            .map(unwrap_root)
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(unwrap_root)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        self.screen.subscription().map(unwrap_root)
    }
}

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        skip_auth = config.skip_auth,
        allow_back = config.allow_back,
        "starting dashboard window"
    );
    iced::application(
        move || PatrolboardApp::new(config.clone()),
        PatrolboardApp::update,
        PatrolboardApp::view,
    )
    .title(PatrolboardApp::title)
    .subscription(PatrolboardApp::subscription)
    .run()?;
    Ok(())
}
