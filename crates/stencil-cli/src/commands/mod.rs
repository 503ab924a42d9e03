//! CLI command implementations

mod add;
mod config;
mod create;
mod info;
mod list;
mod remove;
mod validate;

pub use add::add_template;
pub use config::{handle_config_command, ConfigAction};
pub use create::create_project;
pub use info::show_template_info;
pub use list::list_templates;
pub use remove::remove_template;
pub use validate::validate_template;
