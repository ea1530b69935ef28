pub mod api;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod list;
pub mod logging;
pub mod mvi;
pub mod request;
pub mod slices;
pub mod store;
