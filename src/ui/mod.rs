mod common;
mod quality_menu;

pub use quality_menu::render_quality_menu;
