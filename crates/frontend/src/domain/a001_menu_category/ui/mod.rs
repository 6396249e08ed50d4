pub mod accordion;
pub mod desktop_tabs;
pub mod mobile_sheet;
pub mod mobile_tabs;
pub mod nav_button;
pub mod navigator;
pub mod page;

pub use page::MenuPage;
