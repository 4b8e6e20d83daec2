//! Command handler modules for the fivedraw CLI.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) passed in, so tests can capture them
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod paytable;
pub mod play;
pub mod rng;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use paytable::handle_paytable_command;
pub use play::{PlayOptions, handle_play_command};
pub use rng::handle_rng_command;
