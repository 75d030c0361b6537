pub mod rest;

pub use rest::{AppState, RestApi};
