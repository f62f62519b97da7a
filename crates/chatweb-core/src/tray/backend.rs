use crate::{CoreResult, IconRequest, MenuSpec};

/// Native tray operations.
pub trait TrayBackend {
    /// Native tray resource.
    type Tray;

    /// Create a tray icon for `profile_id`. Clicks on it must be reported
    /// back with the same id.
    fn create_tray(
        &mut self,
        profile_id: &str,
        tooltip: &str,
        icon: &IconRequest,
    ) -> CoreResult<Self::Tray>;

    /// Replace the tray image.
    fn set_tray_icon(&mut self, tray: &Self::Tray, icon: &IconRequest) -> CoreResult<()>;

    /// Replace the hover text.
    fn set_tray_tooltip(&mut self, tray: &Self::Tray, tooltip: &str) -> CoreResult<()>;

    /// Replace the context menu.
    fn set_tray_menu(&mut self, tray: &Self::Tray, menu: &MenuSpec) -> CoreResult<()>;

    /// Remove the tray icon.
    fn destroy_tray(&mut self, tray: Self::Tray);
}
