//! CLI domain: parse, route, output, and presentation only.
//! One route table dispatches each command to the library services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_admin_config, format_list_result, format_login_result, format_whoami,
};
pub use route::RunContext;
