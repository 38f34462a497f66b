pub mod core;
pub mod dialogs;
pub mod navigation;
pub mod views;
pub mod weather;
