pub mod classify;
pub mod config;
pub mod fetch_head;
pub mod header_map;
pub mod logging;
pub mod registry;
pub mod render;
pub mod scan;
pub mod target;
