pub mod auth;
pub mod avatar;
pub mod forms;
pub mod geo;
pub mod map;
pub mod model;
pub mod seed;
pub mod store;
