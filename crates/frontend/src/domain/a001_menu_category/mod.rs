pub mod api;
pub mod nav;
pub mod ui;
