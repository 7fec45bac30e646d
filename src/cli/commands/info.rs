use crate::cli::args::InfoArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::tools::{ParkingInfoRequest, ParkingTools};

/// Execute info command
pub async fn execute(args: InfoArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let tools = ParkingTools::from_config(&config)?;

    let request = ParkingInfoRequest {
        parking_name: args.name,
        address: args.address,
    };

    let response = tools.get_parking_info(&request).await;
    let rendered = output::format_info_response(&response, format)?;
    println!("{}", rendered);

    Ok(())
}
