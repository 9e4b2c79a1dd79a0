pub mod cache;
pub mod cms;
pub mod config;
pub mod contact;
pub mod i18n;
pub mod menu;
pub mod render;
pub mod retry;
pub mod scheduler;
pub mod security;
pub mod server;
