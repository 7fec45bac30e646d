use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::api::molit::RegistryItem;
use crate::cli::OutputFormat;
use crate::core::normalize::NormalizedFacility;
use crate::error::Result;
use crate::tools::{NearbySearchResponse, ParkingInfoResponse};

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format nearby-search results
    pub fn format_nearby(&self, response: &NearbySearchResponse) -> Result<String> {
        match self.format {
            OutputFormat::Table => self.format_nearby_table(response),
            OutputFormat::Json => json_pretty(response),
            OutputFormat::Markdown => self.format_nearby_markdown(response),
        }
    }

    /// Format one facility's detail
    pub fn format_info(&self, response: &ParkingInfoResponse) -> Result<String> {
        match self.format {
            OutputFormat::Table => self.format_info_text(response),
            OutputFormat::Json => json_pretty(response),
            OutputFormat::Markdown => self.format_info_markdown(response),
        }
    }

    /// Format national registry items
    pub fn format_registry(&self, items: &[RegistryItem]) -> Result<String> {
        match self.format {
            OutputFormat::Table => self.format_registry_table(items),
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = items
                    .iter()
                    .map(|item| {
                        serde_json::json!({
                            "lot_number": item.lot_number,
                            "name": item.name,
                            "kind": item.kind,
                            "road_address": item.road_address,
                            "lot_address": item.lot_address,
                            "capacity": item.capacity,
                            "charge_info": item.charge_info,
                            "phone": item.phone,
                        })
                    })
                    .collect();
                json_pretty(&rows)
            }
            OutputFormat::Markdown => self.format_registry_markdown(items),
        }
    }

    fn format_nearby_table(&self, response: &NearbySearchResponse) -> Result<String> {
        let mut result = String::new();

        if !response.success {
            result.push_str(&format!(
                "\n{} {}\n",
                "✗".red(),
                response.error.as_deref().unwrap_or("오류가 발생했습니다.")
            ));
            return Ok(result);
        }

        if let Some(message) = &response.message {
            result.push_str(&format!("\n{message}\n"));
            return Ok(result);
        }

        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("주차장명").fg(Color::Cyan),
            Cell::new("주소").fg(Color::Cyan),
            Cell::new("잔여/전체").fg(Color::Cyan),
            Cell::new("거리(m)").fg(Color::Cyan),
            Cell::new("분류").fg(Color::Cyan),
        ]);

        for parking in &response.parkings {
            table.add_row(vec![
                Cell::new(truncate_string(&parking.name, 24)),
                Cell::new(truncate_string(&parking.address, 32)),
                Cell::new(spots_cell(parking)),
                Cell::new(parking.distance.as_deref().unwrap_or("-")),
                Cell::new(truncate_string(&parking.fee, 20)),
            ]);
        }

        table.set_content_arrangement(ContentArrangement::Dynamic);

        result.push_str(&format!(
            "\n{} {}개 주차장\n\n",
            "🅿️".cyan(),
            response.count.to_string().yellow()
        ));
        result.push_str(&table.to_string());
        result.push('\n');

        if let Some(notice) = &response.notice {
            result.push_str(&format!("\n{} {}\n", "ℹ".blue(), notice));
        }

        Ok(result)
    }

    fn format_nearby_markdown(&self, response: &NearbySearchResponse) -> Result<String> {
        let mut result = String::new();

        if !response.success {
            result.push_str(&format!(
                "> {}\n",
                response.error.as_deref().unwrap_or("오류가 발생했습니다.")
            ));
            return Ok(result);
        }
        if let Some(message) = &response.message {
            result.push_str(&format!("> {message}\n"));
            return Ok(result);
        }

        result.push_str(&format!("## 주변 주차장 ({}개)\n\n", response.count));
        result.push_str("| 주차장명 | 주소 | 잔여/전체 | 거리(m) |\n");
        result.push_str("|---|---|---|---|\n");
        for parking in &response.parkings {
            result.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                parking.name,
                parking.address,
                spots_cell(parking),
                parking.distance.as_deref().unwrap_or("-"),
            ));
        }
        if let Some(notice) = &response.notice {
            result.push_str(&format!("\n> {notice}\n"));
        }

        Ok(result)
    }

    fn format_info_text(&self, response: &ParkingInfoResponse) -> Result<String> {
        let mut result = String::new();

        if !response.success {
            result.push_str(&format!(
                "\n{} {}\n",
                "✗".red(),
                response.error.as_deref().unwrap_or("오류가 발생했습니다.")
            ));
            return Ok(result);
        }

        let Some(facility) = &response.facility else {
            return Ok(result);
        };

        result.push_str(&format!("\n{} {}\n", "🅿️".cyan(), facility.name.bold()));
        result.push_str(&"=".repeat(60));
        result.push('\n');
        result.push_str(&format!("주소: {}\n", facility.address));
        result.push_str(&format!("분류: {}\n", facility.fee));
        if let Some(total) = facility.total_spots {
            result.push_str(&format!("전체 주차면: {}\n", total));
        }
        match facility.available_spots {
            Some(available) => result.push_str(&format!(
                "잔여 주차면: {}\n",
                available.to_string().green()
            )),
            None => result.push_str("잔여 주차면: 정보 없음\n"),
        }
        if let Some(update_time) = &facility.update_time {
            result.push_str(&format!("측정 시각: {}\n", update_time));
        }
        if let Some(phone) = &facility.phone {
            result.push_str(&format!("전화번호: {}\n", phone));
        }
        if let Some(operating) = &facility.operating_info {
            result.push_str("\n운영시간\n");
            result.push_str(&json_block(operating)?);
        }
        if let Some(fees) = &facility.fee_info {
            result.push_str("\n요금\n");
            result.push_str(&json_block(fees)?);
        }

        Ok(result)
    }

    fn format_info_markdown(&self, response: &ParkingInfoResponse) -> Result<String> {
        let mut result = String::new();

        if !response.success {
            result.push_str(&format!(
                "> {}\n",
                response.error.as_deref().unwrap_or("오류가 발생했습니다.")
            ));
            return Ok(result);
        }
        let Some(facility) = &response.facility else {
            return Ok(result);
        };

        result.push_str(&format!("## {}\n\n", facility.name));
        result.push_str(&format!("- 주소: {}\n", facility.address));
        result.push_str(&format!("- 분류: {}\n", facility.fee));
        if let Some(total) = facility.total_spots {
            result.push_str(&format!("- 전체 주차면: {}\n", total));
        }
        if let Some(available) = facility.available_spots {
            result.push_str(&format!("- 잔여 주차면: {}\n", available));
        }
        if let Some(update_time) = &facility.update_time {
            result.push_str(&format!("- 측정 시각: {}\n", update_time));
        }

        Ok(result)
    }

    fn format_registry_table(&self, items: &[RegistryItem]) -> Result<String> {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("주차장명").fg(Color::Cyan),
            Cell::new("구분").fg(Color::Cyan),
            Cell::new("주소").fg(Color::Cyan),
            Cell::new("주차면").fg(Color::Cyan),
            Cell::new("요금").fg(Color::Cyan),
        ]);

        for item in items {
            let address = if item.road_address.is_empty() {
                &item.lot_address
            } else {
                &item.road_address
            };
            table.add_row(vec![
                Cell::new(truncate_string(&item.name, 24)),
                Cell::new(&item.kind),
                Cell::new(truncate_string(address, 32)),
                Cell::new(
                    item.capacity
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(&item.charge_info),
            ]);
        }

        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut result = String::new();
        result.push_str(&format!(
            "\n{} {}개 등록 주차장\n\n",
            "🅿️".cyan(),
            items.len().to_string().yellow()
        ));
        result.push_str(&table.to_string());
        result.push('\n');
        Ok(result)
    }

    fn format_registry_markdown(&self, items: &[RegistryItem]) -> Result<String> {
        let mut result = String::new();
        result.push_str(&format!("## 전국주차장정보 ({}개)\n\n", items.len()));
        result.push_str("| 주차장명 | 구분 | 주소 | 주차면 |\n");
        result.push_str("|---|---|---|---|\n");
        for item in items {
            let address = if item.road_address.is_empty() {
                &item.lot_address
            } else {
                &item.road_address
            };
            result.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                item.name,
                item.kind,
                address,
                item.capacity
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }
        Ok(result)
    }
}

fn spots_cell(parking: &NormalizedFacility) -> String {
    let total = parking
        .total_spots
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());
    let available = parking
        .available_spots
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{available}/{total}")
}

fn json_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn json_block<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut block = String::new();
    let rendered = serde_json::to_value(value)?;
    if let Some(map) = rendered.as_object() {
        for (key, val) in map {
            let val = match val {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            block.push_str(&format!("  {key}: {val}\n"));
        }
    }
    Ok(block)
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
