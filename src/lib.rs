pub mod config;
pub mod core;

pub use config::AppConfig;
pub use crate::core::auth::{AuthEffect, AuthError, AuthEvent, AuthFlow, AuthScreen};
pub use crate::core::map::{MapSurface, MapView, Scene};
pub use crate::core::model::{Coordinate, Id};
pub use crate::core::seed::Seed;
pub use crate::core::store::{DashboardStore, StoreError};

#[cfg(feature = "gui")]
pub mod gui;
