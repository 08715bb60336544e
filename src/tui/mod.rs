//! Terminal UI: setup/teardown and rendering

mod terminal;
mod ui;

pub use terminal::Tui;
pub use ui::render;
