use amap_weather_core::{Config, JsonMap, WeatherClient, WeatherPayload};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "amap-weather", version, about = "AMap weather CLI")]
pub struct Cli {
    /// API key to use instead of the configured one.
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Request timeout in seconds, instead of the configured one.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct WeatherArgs {
    /// "base" for current conditions, "all" for the forecast.
    #[arg(long, default_value = "base")]
    pub extent: String,

    /// "json" or "xml".
    #[arg(long, default_value = "json")]
    pub format: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and request timeout.
    Configure,

    /// Resolve a city from an IP, a coordinate or a name and show its weather.
    Live {
        /// One of "ip", "geo" or "city".
        source: String,

        /// IP address, "longitude,latitude" pair or city name.
        value: String,

        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Look up the city an IP address belongs to.
    Ip { ip: String },

    /// Reverse-geocode a "longitude,latitude" pair.
    Geo { location: String },

    /// Show weather for a city name or adcode.
    Weather {
        city: String,

        #[command(flatten)]
        weather: WeatherArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli { key, timeout, command } = self;

        match command {
            Command::Configure => configure(Config::load()?)?,
            Command::Live { source, value, weather } => {
                let client = client_from_flags(key.as_deref(), timeout)?;
                let payload = client
                    .resolve_and_fetch(&source, &value, &weather.extent, &weather.format)
                    .await?;
                print_payload(&payload)?;
            }
            Command::Ip { ip } => {
                let client = client_from_flags(key.as_deref(), timeout)?;
                print_json(&client.fetch_city_by_ip(&ip).await?)?;
            }
            Command::Geo { location } => {
                let client = client_from_flags(key.as_deref(), timeout)?;
                print_json(&client.fetch_city_by_geo(&location).await?)?;
            }
            Command::Weather { city, weather } => {
                let client = client_from_flags(key.as_deref(), timeout)?;
                let payload =
                    client.fetch_weather(&city, &weather.extent, &weather.format).await?;
                print_payload(&payload)?;
            }
        }

        Ok(())
    }
}

fn client_from_flags(key: Option<&str>, timeout: Option<u64>) -> Result<WeatherClient> {
    let config = load_config(key, Config::load)?;
    build_client(&config, key, timeout)
}

/// A config that cannot be read is only fatal when it is the sole source of the key.
fn load_config(key: Option<&str>, load: impl FnOnce() -> Result<Config>) -> Result<Config> {
    match load() {
        Ok(config) => Ok(config),
        Err(err) if key.is_some() => {
            tracing::warn!("ignoring unreadable configuration, using --key: {err:#}");
            Ok(Config::default())
        }
        Err(err) => Err(err),
    }
}

/// Pick the API key and name where it came from.
fn resolve_key<'a>(config: &'a Config, key: Option<&'a str>) -> Result<(&'a str, &'static str)> {
    match key {
        Some(key) => Ok((key, "flag")),
        None => Ok((config.api_key()?, "config")),
    }
}

fn build_client(config: &Config, key: Option<&str>, timeout: Option<u64>) -> Result<WeatherClient> {
    let (key, key_source) = resolve_key(config, key)?;
    tracing::debug!(key_source, "using API key");

    let mut transport = config.transport.clone();
    if timeout.is_some() {
        transport.timeout_secs = timeout;
    }

    let mut client = WeatherClient::new(key);
    client.set_transport_options(transport.to_options());
    Ok(client)
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("AMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut timeout_prompt = CustomType::<u64>::new("Request timeout in seconds:")
        .with_help_message("Press Esc to leave requests without a timeout")
        .with_error_message("Please type a whole number of seconds");
    if let Some(current) = config.transport.timeout_secs {
        timeout_prompt = timeout_prompt.with_default(current);
    }
    let timeout = timeout_prompt.prompt_skippable().context("Failed to read timeout")?;

    config.set_api_key(api_key);
    config.transport.timeout_secs = timeout;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn print_payload(payload: &WeatherPayload) -> Result<()> {
    match payload {
        WeatherPayload::Json(map) => print_json(map),
        WeatherPayload::Xml(body) => {
            println!("{body}");
            Ok(())
        }
    }
}

fn print_json(map: &JsonMap) -> Result<()> {
    let pretty = serde_json::to_string_pretty(map).context("Failed to format response as JSON")?;
    println!("{pretty}");
    Ok(())
}
