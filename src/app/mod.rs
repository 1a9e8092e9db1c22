// Presentation layer: interactive menu driving the inventory store.

pub mod menu;

pub use menu::MenuApp;
