//! `profiles` and `profile` command implementations.

use std::io::Write;

use clap::Parser;
use ppr_core::ProfileCatalog;
use serde::Serialize;

use crate::CliError;

/// CLI arguments for the `profile` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Print a search profile in the service's JSON shape")]
pub(crate) struct ProfileArgs {
    /// Catalog key, as listed by `ppr profiles`.
    #[arg(value_name = "key")]
    pub(crate) key: String,
}

pub(crate) fn run_profiles(writer: &mut dyn Write) -> Result<(), CliError> {
    for entry in &ProfileCatalog::standard() {
        writeln!(writer, "{}\t{}", entry.key, entry.name).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

pub(crate) fn run_profile(args: &ProfileArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let catalog = ProfileCatalog::standard();
    let entry = catalog.get(&args.key)?;
    write_json(writer, &entry.profile)
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
