//! Navigation engine for the menu: pure state machines plus the controller
//! that binds them to the DOM.

pub mod active_tracker;
pub mod config;
pub mod controller;
pub mod registry;
pub mod scroll;
pub mod state;
pub mod tab_overflow;
pub mod url;

pub use config::NavConfig;
pub use controller::{use_nav_controller, MenuNavController, TabStripNodes};
pub use registry::NavSurface;
pub use state::{NavEvent, NavState};
pub use tab_overflow::TabLayoutState;
