use anyhow::{Context, Result};
use hash_router::{hash_query_data, replace_hash_query_data};
use serde_json::Value;

use crate::QueryCommands;

pub fn execute(command: QueryCommands) -> Result<()> {
    match command {
        QueryCommands::Get { location, key } => {
            let data = hash_query_data(&location, &key);
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        QueryCommands::Set {
            location,
            key,
            value,
        } => {
            let value: Value = serde_json::from_str(&value)
                .with_context(|| format!("value for {} is not JSON", key))?;
            println!("{}", replace_hash_query_data(&location, &key, &value)?);
        }
    }

    Ok(())
}
