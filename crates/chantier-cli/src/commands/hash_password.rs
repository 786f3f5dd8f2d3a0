use crate::cli::HashPasswordArgs;
use crate::output::OutputWriter;
use crate::output_types::HashOutput;
use anyhow::{Context, Result};
use chantier_store::hash_password;

pub fn execute(args: HashPasswordArgs, output: &OutputWriter) -> Result<()> {
    let hash = hash_password(&args.password).context("Failed to hash password")?;

    if output.is_json() {
        return output.result(HashOutput { hash });
    }

    // Bare hash so it can be pasted into a user record
    println!("{}", hash);
    Ok(())
}
