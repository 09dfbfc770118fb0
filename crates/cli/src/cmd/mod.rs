mod env;
mod info;
mod ls;
mod path;

pub use env::cmd_env;
pub use info::cmd_info;
pub use ls::cmd_ls;
pub use path::cmd_path;
