//! Script injected into profile pages and the messages it posts back.

use serde::Deserialize;
use tracing::debug;

/// Runs before any page script. Exposes `window.chatWeb.openConfig()` /
/// `clearConfig()` for the placeholder page and reports every page
/// `Notification` so services that never badge their title still count.
pub const INIT_SCRIPT: &str = r#"
(function () {
  const post = (message) => {
    try { window.ipc.postMessage(JSON.stringify(message)); } catch (e) {}
  };

  try {
    if (!window.chatWeb) window.chatWeb = {};
    window.chatWeb.openConfig = () => post({ type: 'openConfig' });
    window.chatWeb.clearConfig = () => post({ type: 'clearConfig' });
  } catch (e) {}

  try {
    const NativeNotification = window.Notification;
    if (!NativeNotification) return;
    const Wrapped = function (title, options) {
      const instance = new NativeNotification(title, options);
      post({
        type: 'notification',
        title: String(title || ''),
        url: (window.location && window.location.href) || ''
      });
      return instance;
    };
    Wrapped.prototype = NativeNotification.prototype;
    Object.setPrototypeOf(Wrapped, NativeNotification);
    if (NativeNotification.requestPermission) {
      Wrapped.requestPermission = NativeNotification.requestPermission.bind(NativeNotification);
    }
    window.Notification = Wrapped;
  } catch (e) {}
})();
"#;

/// A message posted by a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageMessage {
    /// The page constructed a `Notification`.
    Notification {
        /// Notification title.
        #[serde(default)]
        title: String,
        /// Page URL at the time.
        #[serde(default)]
        url: String,
    },
    /// Placeholder button: open the configuration surface.
    OpenConfig,
    /// Placeholder button: clear the configuration.
    ClearConfig,
}

impl PageMessage {
    /// Parse a raw IPC body. Anything unrecognized is dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!(error = %e, "Ignoring unknown page message");
                None
            }
        }
    }
}
