pub mod formatter;

pub use formatter::Formatter;

use crate::api::molit::RegistryItem;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::tools::{NearbySearchResponse, ParkingInfoResponse};

/// Format a nearby-search response based on the specified format
pub fn format_nearby_response(response: &NearbySearchResponse, format: OutputFormat) -> Result<String> {
    let formatter = Formatter::new(format);
    formatter.format_nearby(response)
}

/// Format a facility-detail response based on the specified format
pub fn format_info_response(response: &ParkingInfoResponse, format: OutputFormat) -> Result<String> {
    let formatter = Formatter::new(format);
    formatter.format_info(response)
}

/// Format national registry items based on the specified format
pub fn format_registry_items(items: &[RegistryItem], format: OutputFormat) -> Result<String> {
    let formatter = Formatter::new(format);
    formatter.format_registry(items)
}
