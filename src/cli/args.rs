use clap::{Args, Subcommand};

/// Nearby-search command arguments
#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Address to search around (e.g. "서울시 중구 세종대로 110")
    pub address: Option<String>,

    /// Latitude (used when no address is given)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude (used when no address is given)
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Search radius in meters
    #[arg(short, long, default_value = "1000")]
    pub radius: f64,
}

/// Facility-detail command arguments
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Parking lot name (e.g. "시청 공영주차장")
    pub name: String,

    /// Address, recommended for a more precise match
    #[arg(short, long)]
    pub address: Option<String>,
}

/// National registry command arguments
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Filter results by name (client-side substring match)
    pub query: Option<String>,

    /// Page number
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(short = 's', long, default_value = "10")]
    pub size: u32,
}

/// Configuration command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value (e.g. kakao.key)
    Set {
        /// Configuration key (kakao.key, seoul.key, gyeonggi.key, molit.key)
        key: String,
        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show the configuration file path
    Path,
}
