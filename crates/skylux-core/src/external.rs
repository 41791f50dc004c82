use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const OPENSKY_STATES_URL: &str = "https://opensky-network.org/api/states/all";
const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HTTP_TIMEOUT_SECS: u64 = 30;
const LIVE_FLIGHT_CAP: usize = 20;

/// One aircraft state vector from the OpenSky network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveFlight {
    pub icao24: String,
    pub callsign: String,
    pub origin_country: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub geo_altitude: Option<f64>,
}

#[derive(Deserialize)]
struct StatesResponse {
    states: Option<Vec<Vec<Value>>>,
}

/// Client for the OpenSky live flight-state feed.
pub struct FlightTrackingClient {
    client: reqwest::blocking::Client,
}

impl FlightTrackingClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches current flight states, capped at the first 20 vectors.
    pub fn live_flights(&self) -> Result<Vec<LiveFlight>> {
        let response: StatesResponse = self
            .client
            .get(OPENSKY_STATES_URL)
            .send()?
            .error_for_status()?
            .json()?;

        let states = response.states.unwrap_or_default();
        let flights: Vec<LiveFlight> = states
            .iter()
            .take(LIVE_FLIGHT_CAP)
            .filter_map(|state| decode_state_vector(state))
            .collect();

        debug!(
            "Fetched live flight states — received={} decoded={}",
            states.len(),
            flights.len()
        );
        Ok(flights)
    }

    /// First live flight whose callsign contains `callsign`, case-insensitive.
    pub fn flight_by_callsign(&self, callsign: &str) -> Result<Option<LiveFlight>> {
        let needle = callsign.to_lowercase();
        let flights = self.live_flights()?;
        Ok(flights
            .into_iter()
            .find(|f| f.callsign.to_lowercase().contains(&needle)))
    }
}

/// Decodes one OpenSky state vector. The feed is a positional JSON array:
/// 0 icao24, 1 callsign, 2 origin country, 5 lon, 6 lat, 7 baro altitude,
/// 8 on ground, 9 velocity, 10 true track, 11 vertical rate, 13 geo altitude.
fn decode_state_vector(state: &[Value]) -> Option<LiveFlight> {
    let str_at = |i: usize| {
        state
            .get(i)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
    };
    let f64_at = |i: usize| state.get(i).and_then(Value::as_f64);

    let icao24 = str_at(0)?;
    let callsign = str_at(1)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(LiveFlight {
        icao24,
        callsign,
        origin_country: str_at(2).unwrap_or_default(),
        longitude: f64_at(5),
        latitude: f64_at(6),
        baro_altitude: f64_at(7),
        on_ground: state.get(8).and_then(Value::as_bool).unwrap_or(false),
        velocity: f64_at(9),
        true_track: f64_at(10),
        vertical_rate: f64_at(11),
        geo_altitude: f64_at(13),
    })
}

/// Current conditions at a coordinate, from the Open-Meteo forecast API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: u32,
    pub description: String,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: Option<RawCurrentWeather>,
}

#[derive(Deserialize)]
struct RawCurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: u32,
}

pub struct WeatherClient {
    client: reqwest::blocking::Client,
}

impl WeatherClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Current weather at the given coordinate, or `None` when the API has
    /// no current-weather block for it.
    pub fn current(&self, lat: f64, lon: f64) -> Result<Option<CurrentWeather>> {
        let url = format!(
            "{OPEN_METEO_URL}?latitude={lat}&longitude={lon}&current_weather=true"
        );
        let response: ForecastResponse = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.current_weather.map(|raw| {
            debug!(
                "Fetched current weather — lat={} lon={} code={}",
                lat, lon, raw.weathercode
            );
            CurrentWeather {
                temperature: raw.temperature,
                windspeed: raw.windspeed,
                winddirection: raw.winddirection,
                weathercode: raw.weathercode,
                description: describe_weather_code(raw.weathercode).to_string(),
            }
        }))
    }
}

/// Human-readable description for a WMO weather interpretation code.
pub fn describe_weather_code(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        95 => "Thunderstorm",
        _ => "Unknown weather condition",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_state_vector() {
        let body = r#"{
            "time": 1730000000,
            "states": [
                ["a1b2c3", "SLX101  ", "United States", 1729999990, 1730000000,
                 -73.77, 40.64, 1200.5, false, 180.2, 92.1, -2.5, null, 1250.0, "7700", false, 0],
                ["d4e5f6", null, "France", null, null,
                 null, null, null, true, null, null, null, null, null, null, false, 0]
            ]
        }"#;

        let response: StatesResponse = serde_json::from_str(body).unwrap();
        let states = response.states.unwrap();

        let first = decode_state_vector(&states[0]).unwrap();
        assert_eq!(first.icao24, "a1b2c3");
        assert_eq!(first.callsign, "SLX101");
        assert_eq!(first.origin_country, "United States");
        assert_eq!(first.latitude, Some(40.64));
        assert_eq!(first.longitude, Some(-73.77));
        assert!(!first.on_ground);
        assert_eq!(first.geo_altitude, Some(1250.0));

        // Missing callsign falls back; grounded aircraft with no position decode too.
        let second = decode_state_vector(&states[1]).unwrap();
        assert_eq!(second.callsign, "Unknown");
        assert!(second.on_ground);
        assert_eq!(second.latitude, None);
    }

    #[test]
    fn test_decode_rejects_vector_without_icao24() {
        let state = vec![Value::Null, Value::String("SLX1".into())];
        assert!(decode_state_vector(&state).is_none());
    }

    #[test]
    fn test_missing_states_decodes_to_empty() {
        let response: StatesResponse = serde_json::from_str(r#"{"time": 0, "states": null}"#).unwrap();
        assert!(response.states.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_describe_weather_code() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(3), "Overcast");
        assert_eq!(describe_weather_code(45), "Fog");
        assert_eq!(describe_weather_code(65), "Heavy rain");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(42), "Unknown weather condition");
    }

    #[test]
    fn test_forecast_response_decode() {
        let body = r#"{
            "latitude": 40.64,
            "longitude": -73.77,
            "current_weather": {
                "temperature": 21.4,
                "windspeed": 14.2,
                "winddirection": 230.0,
                "weathercode": 2,
                "time": "2026-08-07T12:00"
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let raw = response.current_weather.unwrap();
        assert_eq!(raw.temperature, 21.4);
        assert_eq!(raw.weathercode, 2);
        assert_eq!(describe_weather_code(raw.weathercode), "Partly cloudy");

        let empty: ForecastResponse = serde_json::from_str(r#"{"latitude": 0}"#).unwrap();
        assert!(empty.current_weather.is_none());
    }
}
