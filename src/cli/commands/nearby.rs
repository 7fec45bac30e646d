use crate::cli::args::NearbyArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::tools::{NearbySearchRequest, ParkingTools};

/// Execute nearby command
pub async fn execute(args: NearbyArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let tools = ParkingTools::from_config(&config)?;

    let request = NearbySearchRequest {
        address: args.address,
        latitude: args.lat,
        longitude: args.lng,
        radius: args.radius,
    };

    let response = tools.search_nearby_parking(&request).await;
    let rendered = output::format_nearby_response(&response, format)?;
    println!("{}", rendered);

    Ok(())
}
