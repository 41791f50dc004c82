use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// One airport row from the bulk OurAirports-style CSV.
///
/// `code` is the passenger-facing suggestion identifier: the IATA code when
/// the source has one, otherwise the GPS code, otherwise the ICAO ident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub icao_code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub continent: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub facility_type: String,
}

#[derive(Error, Debug)]
pub enum AirportDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("airports data header is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Column positions resolved from the source header row.
///
/// The upstream file is a versioned external contract; resolving by header
/// name instead of hardcoded indices means a silent schema change upstream
/// fails the load instead of misreading fields.
struct Columns {
    ident: usize,
    facility_type: usize,
    name: usize,
    latitude: usize,
    longitude: usize,
    elevation: usize,
    continent: usize,
    country: usize,
    city: usize,
    gps_code: usize,
    iata_code: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, AirportDataError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(AirportDataError::MissingColumn(name))
        };

        Ok(Columns {
            ident: find("ident")?,
            facility_type: find("type")?,
            name: find("name")?,
            latitude: find("latitude_deg")?,
            longitude: find("longitude_deg")?,
            elevation: find("elevation_ft")?,
            continent: find("continent")?,
            country: find("iso_country")?,
            city: find("municipality")?,
            gps_code: find("gps_code")?,
            iata_code: find("iata_code")?,
        })
    }
}

pub struct OurAirportsParser;

impl OurAirportsParser {
    /// Parses an OurAirports-style airports CSV and returns the retained records.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<AirportRecord>, AirportDataError> {
        let file = File::open(path)?;
        Self::parse(file)
    }

    pub fn parse<R: Read>(reader: R) -> Result<Vec<AirportRecord>, AirportDataError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let cols = Columns::resolve(rdr.headers()?)?;

        let mut airports = Vec::with_capacity(1000);
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping malformed airports row — error={}", e);
                    continue;
                }
            };

            let field = |i: usize| record.get(i).unwrap_or("").trim();

            let iata = field(cols.iata_code);
            let gps = field(cols.gps_code);
            let ident = field(cols.ident);
            let code = if !iata.is_empty() {
                iata
            } else if !gps.is_empty() {
                gps
            } else {
                ident
            };

            let name = field(cols.name);
            // A row with no usable code or no name cannot be suggested; drop it.
            if code.is_empty() || name.is_empty() {
                continue;
            }

            airports.push(AirportRecord {
                code: code.to_string(),
                icao_code: ident.to_string(),
                name: name.to_string(),
                city: field(cols.city).to_string(),
                country: field(cols.country).to_string(),
                continent: field(cols.continent).to_string(),
                latitude: field(cols.latitude).parse::<f64>().unwrap_or(0.0),
                longitude: field(cols.longitude).parse::<f64>().unwrap_or(0.0),
                elevation: field(cols.elevation).parse::<f64>().unwrap_or(0.0),
                facility_type: field(cols.facility_type).to_string(),
            });
        }

        Ok(airports)
    }
}

/// Built-in seed list of major airports, used when the bulk source is
/// unreadable so the catalog always answers queries.
pub fn fallback_airports() -> Vec<AirportRecord> {
    let apt = |code: &str,
               icao: &str,
               name: &str,
               city: &str,
               country: &str,
               continent: &str,
               lat: f64,
               lon: f64,
               elev: f64| AirportRecord {
        code: code.to_string(),
        icao_code: icao.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        continent: continent.to_string(),
        latitude: lat,
        longitude: lon,
        elevation: elev,
        facility_type: "large_airport".to_string(),
    };

    vec![
        apt(
            "JFK",
            "KJFK",
            "John F. Kennedy International Airport",
            "New York",
            "US",
            "NA",
            40.6413,
            -73.7781,
            13.0,
        ),
        apt(
            "LAX",
            "KLAX",
            "Los Angeles International Airport",
            "Los Angeles",
            "US",
            "NA",
            33.9428,
            -118.4081,
            125.0,
        ),
        apt(
            "LHR",
            "EGLL",
            "London Heathrow Airport",
            "London",
            "GB",
            "EU",
            51.4706,
            -0.4619,
            83.0,
        ),
        apt(
            "CDG",
            "LFPG",
            "Charles de Gaulle International Airport",
            "Paris",
            "FR",
            "EU",
            49.0097,
            2.5479,
            392.0,
        ),
        apt(
            "NRT",
            "RJAA",
            "Narita International Airport",
            "Narita",
            "JP",
            "AS",
            35.7647,
            140.3864,
            141.0,
        ),
        apt(
            "MIA",
            "KMIA",
            "Miami International Airport",
            "Miami",
            "US",
            "NA",
            25.7956,
            -80.2906,
            8.0,
        ),
        apt(
            "ORD",
            "KORD",
            "O'Hare International Airport",
            "Chicago",
            "US",
            "NA",
            41.9742,
            -87.9073,
            672.0,
        ),
        apt(
            "LAS",
            "KLAS",
            "Harry Reid International Airport",
            "Las Vegas",
            "US",
            "NA",
            36.0840,
            -115.1537,
            2181.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata_code,local_code";

    #[test]
    fn test_parse_retains_valid_rows() {
        let data = format!(
            "{HEADER}\n\
             3622,KJFK,large_airport,John F. Kennedy International Airport,40.6413,-73.7781,13,NA,US,US-NY,New York,yes,KJFK,JFK,JFK\n\
             4296,EGLC,medium_airport,London City Airport,51.5053,0.0553,19,EU,GB,GB-ENG,London,yes,EGLC,LCY,\n\
             12345,LL99,small_airport,Lonely Strip,31.2,34.9,not-a-number,AS,IL,IL-D,,no,LL99,,\n"
        );
        let airports = OurAirportsParser::parse(Cursor::new(data)).unwrap();

        assert_eq!(airports.len(), 3);

        let jfk = &airports[0];
        assert_eq!(jfk.code, "JFK");
        assert_eq!(jfk.icao_code, "KJFK");
        assert_eq!(jfk.city, "New York");
        assert_eq!(jfk.facility_type, "large_airport");
        assert_eq!(jfk.elevation, 13.0);

        // No IATA code: falls back to the GPS code.
        let strip = &airports[2];
        assert_eq!(strip.code, "LL99");
        assert_eq!(strip.elevation, 0.0);
    }

    #[test]
    fn test_parse_drops_rows_without_code_or_name() {
        let data = format!(
            "{HEADER}\n\
             1,,closed,Old Field,0,0,0,EU,DE,DE-BY,Munich,no,,,\n\
             2,EDDM,large_airport,,48.35,11.78,1487,EU,DE,DE-BY,Munich,yes,EDDM,MUC,\n\
             3,EDDF,large_airport,Frankfurt Airport,50.03,8.57,364,EU,DE,DE-HE,Frankfurt,yes,EDDF,FRA,\n"
        );
        let airports = OurAirportsParser::parse(Cursor::new(data)).unwrap();

        // Row 1 has no code at all, row 2 has no name.
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].code, "FRA");
    }

    #[test]
    fn test_parse_rejects_schema_drift() {
        // "iata_code" renamed upstream: the load must fail rather than
        // silently misread columns.
        let data = "id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata,local_code\n\
                    3622,KJFK,large_airport,JFK,40.6,-73.7,13,NA,US,US-NY,New York,yes,KJFK,JFK,JFK\n";
        let err = OurAirportsParser::parse(Cursor::new(data)).unwrap_err();
        match err {
            AirportDataError::MissingColumn(col) => assert_eq!(col, "iata_code"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airports.csv");
        std::fs::write(
            &path,
            format!(
                "{HEADER}\n\
                 1,KLAX,large_airport,Los Angeles International Airport,33.94,-118.40,125,NA,US,US-CA,Los Angeles,yes,KLAX,LAX,LAX\n"
            ),
        )
        .unwrap();

        let airports = OurAirportsParser::parse_file(&path).unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].code, "LAX");
        assert_eq!(airports[0].country, "US");
    }

    #[test]
    fn test_fallback_list_covers_majors() {
        let seeds = fallback_airports();
        for code in ["JFK", "LAX", "LHR", "CDG", "NRT"] {
            assert!(
                seeds.iter().any(|a| a.code == code),
                "missing fallback airport {code}"
            );
        }
        assert!(seeds.iter().all(|a| a.facility_type == "large_airport"));
    }
}
