//! Page behaviour outside the arm: modals, navigation, reveals, toggles.

pub mod controls;
pub mod modal;
pub mod nav;
pub mod reveal;

pub use controls::{toggle_fullscreen, GyroToggle};
pub use modal::{ModalController, ModalImage, ModalView};
pub use nav::{Accordion, MobileNav};
pub use reveal::RevealTracker;
