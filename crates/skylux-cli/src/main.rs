// SPDX-License-Identifier: MIT
// Copyright (c) 2026 SkyLux

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use skylux_core::external::{FlightTrackingClient, WeatherClient};
use skylux_core::store::AircraftCategory;
use skylux_core::{AirportCatalog, AirportRecord, CharterStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the OurAirports-style airports CSV
    #[arg(short, long, env = "SKYLUX_AIRPORTS_CSV", default_value = "data/airports.csv")]
    data: PathBuf,

    /// Emit JSON instead of human-readable lines
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked airport suggestions for a typeahead query
    Suggest {
        query: String,
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },
    /// Look up a single airport by IATA or ICAO code
    Lookup { code: String },
    /// List major airports in catalog order
    Popular {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// List available charter aircraft
    Fleet {
        /// light, midsize, heavy, or ultra
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Current weather at a coordinate
    Weather {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
    /// Live flight states from the OpenSky network
    LiveFlights {
        /// Show only the first flight whose callsign contains this text
        callsign: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();

    match &cli.command {
        Commands::Suggest { query, limit } => {
            let catalog = AirportCatalog::new(&cli.data);
            // No text yet: fall back to the popular listing, like the
            // suggestion endpoint does on first focus.
            let results = if query.trim().is_empty() {
                catalog.popular(*limit)
            } else {
                catalog.search(query, *limit)
            };
            print_airports(&results, cli.json)?;
        }
        Commands::Lookup { code } => {
            let catalog = AirportCatalog::new(&cli.data);
            match catalog.find_by_code(code) {
                Some(airport) => print_airports(&[airport], cli.json)?,
                None => bail!("No airport found for code '{}'", code),
            }
        }
        Commands::Popular { limit } => {
            let catalog = AirportCatalog::new(&cli.data);
            print_airports(&catalog.popular(*limit), cli.json)?;
        }
        Commands::Fleet { category } => {
            let store = CharterStore::new();
            let fleet = match category {
                Some(raw) => {
                    let Some(category) = AircraftCategory::parse(raw) else {
                        bail!("Unknown aircraft category '{}'", raw);
                    };
                    store.aircraft_by_category(category)
                }
                None => store.aircraft(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&fleet)?);
            } else {
                for aircraft in &fleet {
                    println!(
                        "{:<24} {:<8} {:>2} pax  {:>5} nm  ${:>8.2}/hr  {}",
                        aircraft.model,
                        aircraft.category.as_str(),
                        aircraft.passengers,
                        aircraft.range_nm,
                        aircraft.hourly_rate,
                        aircraft.manufacturer
                    );
                }
            }
        }
        Commands::Weather { lat, lon } => {
            let client = WeatherClient::new()?;
            match client.current(*lat, *lon)? {
                Some(weather) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&weather)?);
                    } else {
                        println!(
                            "{} — {:.1}°C, wind {:.1} km/h @ {:.0}°",
                            weather.description,
                            weather.temperature,
                            weather.windspeed,
                            weather.winddirection
                        );
                    }
                }
                None => bail!("Weather data not available for {}, {}", lat, lon),
            }
        }
        Commands::LiveFlights { callsign } => {
            let client = FlightTrackingClient::new()?;
            let flights = match callsign {
                Some(callsign) => match client.flight_by_callsign(callsign)? {
                    Some(flight) => vec![flight],
                    None => bail!("No live flight matching callsign '{}'", callsign),
                },
                None => client.live_flights()?,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&flights)?);
            } else {
                for flight in &flights {
                    let position = match (flight.latitude, flight.longitude) {
                        (Some(lat), Some(lon)) => format!("{:.3}, {:.3}", lat, lon),
                        _ => "position unknown".to_string(),
                    };
                    println!(
                        "{:<10} {:<18} {}  {}",
                        flight.callsign,
                        flight.origin_country,
                        position,
                        if flight.on_ground { "on ground" } else { "airborne" }
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_airports(airports: &[AirportRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(airports)?);
        return Ok(());
    }
    for airport in airports {
        let location = if airport.city.is_empty() {
            airport.country.clone()
        } else {
            format!("{}, {}", airport.city, airport.country)
        };
        println!("{:<4} {:<5} {} — {}", airport.code, airport.icao_code, airport.name, location);
    }
    Ok(())
}
