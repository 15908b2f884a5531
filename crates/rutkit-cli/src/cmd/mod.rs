/// Command module for the `rutkit` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod bmi;
pub mod check_digit;
pub mod format;
pub mod generate;
pub mod normalize;
pub mod split;
pub mod validate;
