pub mod app;
pub mod catalog_panel;
pub mod message_overlay;
pub mod radar_chart;
pub mod theme;
pub mod top_bar;

pub use app::ZukanApp;
