mod config;
mod registry;
mod support;
mod unread;
mod window;
