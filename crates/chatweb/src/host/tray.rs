use super::NativeHost;
use crate::{AppError, AppResult, icons};

use chatweb_core::{CoreError, CoreResult, IconRequest, MenuEntry, MenuSpec, TrayBackend};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};
use tray_icon::{
    TrayIcon, TrayIconBuilder,
    menu::{IconMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
};

#[track_caller]
fn tray_error(profile_id: &str, reason: impl Into<String>) -> CoreError {
    CoreError::TrayBackend {
        profile_id: profile_id.to_string(),
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn tray_id(tray: &TrayIcon) -> String {
    tray.id().0.clone()
}

/// Turn a [`MenuSpec`] into a native menu. Item ids are the action's menu id,
/// so clicks parse straight back into actions.
#[track_caller]
pub fn native_menu(spec: &MenuSpec) -> AppResult<Menu> {
    let menu = Menu::new();
    for entry in &spec.entries {
        let appended = match entry {
            MenuEntry::Item { label, action, icon } => match icon {
                Some(icon) => menu.append(&icon_item(label, &action.menu_id(), icon)),
                None => menu.append(&MenuItem::with_id(action.menu_id(), label, true, None)),
            },
            MenuEntry::Submenu { label, entries } => menu.append(&native_submenu(label, entries)?),
            MenuEntry::Separator => menu.append(&PredefinedMenuItem::separator()),
        };
        appended.map_err(|e| AppError::Menu {
            reason: format!("Failed to add menu entry: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }
    Ok(menu)
}

#[track_caller]
fn native_submenu(label: &str, entries: &[MenuEntry]) -> AppResult<Submenu> {
    let submenu = Submenu::new(label, true);
    for entry in entries {
        let appended = match entry {
            MenuEntry::Item { label, action, icon } => match icon {
                Some(icon) => submenu.append(&icon_item(label, &action.menu_id(), icon)),
                None => submenu.append(&MenuItem::with_id(action.menu_id(), label, true, None)),
            },
            MenuEntry::Submenu { label, entries } => {
                submenu.append(&native_submenu(label, entries)?)
            }
            MenuEntry::Separator => submenu.append(&PredefinedMenuItem::separator()),
        };
        appended.map_err(|e| AppError::Menu {
            reason: format!("Failed to add submenu entry: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }
    Ok(submenu)
}

fn icon_item(label: &str, id: &str, icon: &IconRequest) -> IconMenuItem {
    let icon = match icons::menu_icon(icon) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!(error = %e, "Menu icon unavailable");
            None
        }
    };
    IconMenuItem::with_id(id, label, true, icon, None)
}

impl TrayBackend for NativeHost<'_> {
    type Tray = TrayIcon;

    #[instrument(skip(self, icon))]
    fn create_tray(
        &mut self,
        profile_id: &str,
        tooltip: &str,
        icon: &IconRequest,
    ) -> CoreResult<TrayIcon> {
        let icon = icons::tray_icon(icon).map_err(|e| tray_error(profile_id, e.to_string()))?;

        let tray = TrayIconBuilder::new()
            .with_id(profile_id)
            .with_tooltip(tooltip)
            .with_icon(icon)
            .with_menu_on_left_click(false)
            .build()
            .map_err(|e| tray_error(profile_id, format!("Failed to create tray icon: {}", e)))?;

        info!("System tray icon initialized");
        Ok(tray)
    }

    fn set_tray_icon(&mut self, tray: &TrayIcon, icon: &IconRequest) -> CoreResult<()> {
        let id = tray_id(tray);
        let icon = icons::tray_icon(icon).map_err(|e| tray_error(&id, e.to_string()))?;
        tray.set_icon(Some(icon))
            .map_err(|e| tray_error(&id, format!("Failed to update icon: {}", e)))
    }

    fn set_tray_tooltip(&mut self, tray: &TrayIcon, tooltip: &str) -> CoreResult<()> {
        tray.set_tooltip(Some(tooltip))
            .map_err(|e| tray_error(&tray_id(tray), format!("Failed to update tooltip: {}", e)))
    }

    fn set_tray_menu(&mut self, tray: &TrayIcon, menu: &MenuSpec) -> CoreResult<()> {
        let menu = native_menu(menu).map_err(|e| tray_error(&tray_id(tray), e.to_string()))?;
        tray.set_menu(Some(Box::new(menu)));
        Ok(())
    }

    fn destroy_tray(&mut self, tray: TrayIcon) {
        // Dropping the icon removes it from the system tray.
        drop(tray);
    }
}
