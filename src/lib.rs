pub mod build_config;
pub mod config;
pub mod error;
pub mod loader;
pub mod page;
pub mod site;
pub mod templates;
pub mod utils;

pub use config::{CONFIG_FILE, INCLUDES_DIR, IN_DIR, OUT_DIR, TEMPLATE_DIR};
