mod cmd;
mod logging;
mod render;
mod terraform;

pub use cmd::{run_generic_command, CommandResult};
pub use logging::setup_logging;
pub use render::{store_tf_vars, tf_var_environment, tf_var_flags, tf_vars_file_contents};
pub use terraform::run_terraform_command;
