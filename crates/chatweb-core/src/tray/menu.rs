//! Tray context menus as plain data.
//!
//! Menus are rebuilt from the registry every time they are applied; the host
//! turns a [`MenuSpec`] into native items and reports clicks back as
//! [`MenuAction`]s parsed from the item id.

use crate::{IconPurpose, IconRequest, IconVariant, Profile, resolve_icon};

/// What a menu item does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Show this profile's window.
    Show(String),
    /// Hide this profile's window.
    Hide(String),
    /// Reload this profile's window.
    Reload(String),
    /// Show another profile's window and make sure its tray exists.
    SwitchTo(String),
    /// Show every window.
    ShowAll,
    /// Hide every window.
    HideAll,
    /// Open the configuration surface.
    Configure,
    /// Destroy everything and exit.
    QuitAll,
    /// Destroy only this profile's window and tray.
    QuitProfile(String),
}

impl MenuAction {
    /// Stable native menu item id.
    pub fn menu_id(&self) -> String {
        match self {
            MenuAction::Show(id) => format!("show::{id}"),
            MenuAction::Hide(id) => format!("hide::{id}"),
            MenuAction::Reload(id) => format!("reload::{id}"),
            MenuAction::SwitchTo(id) => format!("switch::{id}"),
            MenuAction::ShowAll => "__show_all__".to_string(),
            MenuAction::HideAll => "__hide_all__".to_string(),
            MenuAction::Configure => "__configure__".to_string(),
            MenuAction::QuitAll => "__quit_all__".to_string(),
            MenuAction::QuitProfile(id) => format!("quit::{id}"),
        }
    }

    /// Inverse of [`menu_id`](Self::menu_id).
    pub fn parse(menu_id: &str) -> Option<Self> {
        match menu_id {
            "__show_all__" => return Some(MenuAction::ShowAll),
            "__hide_all__" => return Some(MenuAction::HideAll),
            "__configure__" => return Some(MenuAction::Configure),
            "__quit_all__" => return Some(MenuAction::QuitAll),
            _ => {}
        }

        let (verb, id) = menu_id.split_once("::")?;
        if id.is_empty() {
            return None;
        }
        let id = id.to_string();
        match verb {
            "show" => Some(MenuAction::Show(id)),
            "hide" => Some(MenuAction::Hide(id)),
            "reload" => Some(MenuAction::Reload(id)),
            "switch" => Some(MenuAction::SwitchTo(id)),
            "quit" => Some(MenuAction::QuitProfile(id)),
            _ => None,
        }
    }
}

/// One context menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Clickable item.
    Item {
        /// Visible text.
        label: String,
        /// Click action.
        action: MenuAction,
        /// Optional leading icon.
        icon: Option<IconRequest>,
    },
    /// Nested menu.
    Submenu {
        /// Visible text.
        label: String,
        /// Nested rows.
        entries: Vec<MenuEntry>,
    },
    /// Divider.
    Separator,
}

/// A full context menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSpec {
    /// Top-level rows.
    pub entries: Vec<MenuEntry>,
}

impl MenuSpec {
    /// Every action reachable from this menu, depth first.
    pub fn actions(&self) -> Vec<&MenuAction> {
        fn walk<'a>(entries: &'a [MenuEntry], out: &mut Vec<&'a MenuAction>) {
            for entry in entries {
                match entry {
                    MenuEntry::Item { action, .. } => out.push(action),
                    MenuEntry::Submenu { entries, .. } => walk(entries, out),
                    MenuEntry::Separator => {}
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.entries, &mut out);
        out
    }
}

fn item(label: impl Into<String>, action: MenuAction) -> MenuEntry {
    MenuEntry::Item {
        label: label.into(),
        action,
        icon: None,
    }
}

/// Context menu for `profile`'s tray.
pub fn build_menu(profile: &Profile, all_profiles: &[Profile]) -> MenuSpec {
    let label = profile.menu_label();
    let id = &profile.id;

    let mut entries = vec![
        item(format!("Show {label}"), MenuAction::Show(id.clone())),
        item(format!("Hide {label}"), MenuAction::Hide(id.clone())),
        item(format!("Reload {label}"), MenuAction::Reload(id.clone())),
        MenuEntry::Separator,
    ];

    let others: Vec<MenuEntry> = all_profiles
        .iter()
        .filter(|p| p.id != profile.id)
        .map(|p| MenuEntry::Item {
            label: p.menu_label().to_string(),
            action: MenuAction::SwitchTo(p.id.clone()),
            icon: Some(resolve_icon(Some(p), IconVariant::Idle, IconPurpose::Tray)),
        })
        .collect();

    if !others.is_empty() {
        entries.push(MenuEntry::Submenu {
            label: "Other Profiles".to_string(),
            entries: others,
        });
        entries.push(MenuEntry::Separator);
    }

    entries.extend([
        item("Show All", MenuAction::ShowAll),
        item("Hide All", MenuAction::HideAll),
        MenuEntry::Separator,
        item("Configure Profiles…", MenuAction::Configure),
        MenuEntry::Separator,
        item("Quit All", MenuAction::QuitAll),
        item("Quit This Profile", MenuAction::QuitProfile(id.clone())),
    ]);

    MenuSpec { entries }
}
