use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::Config;
use crate::error::Result;

/// Execute config command
pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("Set {} successfully.", key);
        }
        ConfigCommand::Get { key } => match Config::load()?.get(&key) {
            Some(value) => println!("{}", value),
            None => println!("{} is not set.", key),
        },
        ConfigCommand::Path => {
            println!("{}", Config::config_file_path()?.display());
        }
    }

    Ok(())
}
