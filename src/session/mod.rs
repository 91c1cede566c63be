//! Game session: screens, the round lifecycle, and stats views.

mod controller;
mod screen;
mod view;

pub use controller::Session;
pub use screen::Screen;
pub use view::{Banner, GameOutcome, StatsView};
