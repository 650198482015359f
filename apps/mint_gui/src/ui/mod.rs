//! UI layer: app shell, mint panel view model, and theme.

pub mod app;
pub mod theme;
pub mod view_model;

pub use app::MintGuiApp;
