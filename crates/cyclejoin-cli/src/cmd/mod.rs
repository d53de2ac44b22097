/// Command module for the `cyclejoin` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod count;
pub mod inspect;
pub mod segments;
