use crate::api::molit::ParkingRegistryClient;
use crate::api::ClientConfig;
use crate::cli::args::RegistryArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// Execute registry command
pub async fn execute(args: RegistryArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let client = ParkingRegistryClient::new(ClientConfig::with_key(
        config.molit_api_key().unwrap_or_default(),
    ))?;

    let mut items = client.parking_lot_list(args.page, args.size).await?;

    if let Some(query) = &args.query {
        items.retain(|item| item.name.contains(query.as_str()));
    }

    if items.is_empty() {
        println!("등록된 주차장을 찾을 수 없습니다.");
        return Ok(());
    }

    let rendered = output::format_registry_items(&items, format)?;
    println!("{}", rendered);

    Ok(())
}
