use ballotbox_config::BallotBoxConfig;

use crate::result::Result;

/// Prints the config every other command would run with.
pub fn exec(config: &BallotBoxConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}
