//! Ratatui front end. Everything in this module is a consumer of the
//! view-state controller: it renders derived views and translates keys into
//! the controller's named operations, never touching filter, favorites, or
//! routing logic directly.

mod app;
mod helpers;
mod screens;
mod share;
mod terminal;

pub use app::App;
pub use terminal::run_app;
