/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE, find_config, load_config, parse_config};
pub use types::{HandlersSection, PagekitConfig, PagesSection, RoutesSection, TypesSection};
