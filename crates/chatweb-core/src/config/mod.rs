mod document;
mod service;
mod store;

pub use {
    document::ConfigDocument,
    service::ConfigService,
    store::{ConfigStore, JsonConfigStore, MemoryConfigStore},
};

/// File name of the persisted document inside the user data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Environment variable that redirects the user data directory.
pub const USER_DATA_ENV: &str = "CHAT_WEB_USER_DATA";
