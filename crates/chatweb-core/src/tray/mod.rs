mod backend;
mod manager;
mod menu;

pub use {
    backend::TrayBackend,
    manager::{TrayHandle, TrayManager},
    menu::{MenuAction, MenuEntry, MenuSpec, build_menu},
};
