use crate::airport_data::{fallback_airports, AirportRecord, OurAirportsParser};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// In-memory airport catalog backing the typeahead suggestion endpoints.
///
/// The record list is parsed from the bulk CSV on the first query and reused
/// for the life of the catalog. Queries hand out owned copies; nothing can
/// mutate the list after load.
pub struct AirportCatalog {
    source: PathBuf,
    records: OnceLock<Vec<AirportRecord>>,
}

impl AirportCatalog {
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            records: OnceLock::new(),
        }
    }

    /// Builds a catalog from an already-parsed record list. Mainly useful for
    /// embedding and for tests that don't want a file on disk.
    pub fn from_records(records: Vec<AirportRecord>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(records);
        Self {
            source: PathBuf::new(),
            records: cell,
        }
    }

    /// Loads the catalog if it has not been loaded yet.
    ///
    /// Runs the parse at most once per catalog; concurrent first queries
    /// block on the same initialization. If the source is unreadable or its
    /// header does not match the expected schema, the built-in seed list is
    /// used instead so the catalog is never empty.
    pub fn ensure_loaded(&self) -> &[AirportRecord] {
        self.records.get_or_init(|| {
            match OurAirportsParser::parse_file(&self.source) {
                Ok(records) => {
                    info!(
                        "Airport catalog loaded — source={} records={}",
                        self.source.display(),
                        records.len()
                    );
                    records
                }
                Err(e) => {
                    warn!(
                        "Falling back to built-in airport list — source={} error={}",
                        self.source.display(),
                        e
                    );
                    fallback_airports()
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.ensure_loaded().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ensure_loaded().is_empty()
    }

    /// Ranked airport suggestions for a free-text typeahead query.
    ///
    /// An empty (or whitespace-only) query returns nothing; the popular
    /// listing covers the "no text yet" case. Results are the highest-scoring
    /// records in descending score order, capped at `limit`; ties keep
    /// catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<AirportRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<(&AirportRecord, u32)> = self
            .ensure_loaded()
            .iter()
            .map(|airport| (airport, score(airport, &query)))
            .filter(|(_, s)| *s > 0)
            .collect();

        // Stable sort: equal scores keep their catalog order.
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        matches
            .into_iter()
            .take(limit)
            .map(|(airport, _)| airport.clone())
            .collect()
    }

    /// First `limit` major airports in catalog order; shown before the user
    /// has typed anything.
    pub fn popular(&self, limit: usize) -> Vec<AirportRecord> {
        self.ensure_loaded()
            .iter()
            .filter(|a| a.facility_type == "large_airport")
            .take(limit)
            .cloned()
            .collect()
    }

    /// Case-insensitive exact lookup against the IATA-preferred code or the
    /// ICAO ident. Returns the first match in catalog order.
    pub fn find_by_code(&self, code: &str) -> Option<AirportRecord> {
        self.ensure_loaded()
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code) || a.icao_code.eq_ignore_ascii_case(code))
            .cloned()
    }
}

/// Scores one airport against a lowercased, trimmed query.
///
/// Scoring system (additive; code and city ladders fire independently):
/// 100 = exact code match
///  80 = code prefix match
///  50 = code substring match
///  90 = exact city match
///  70 = city prefix match
///  40 = city substring match
///  30 = name substring match
///  20 = country substring match
/// +10 / +5 = large_airport / medium_airport bonus, applied only when a
/// text rule matched: the bonus ranks matches, it never creates one.
pub fn score(airport: &AirportRecord, query: &str) -> u32 {
    let mut total = 0;

    let code = airport.code.to_lowercase();
    if code == query {
        total += 100;
    } else if code.starts_with(query) {
        total += 80;
    } else if code.contains(query) {
        total += 50;
    }

    let city = airport.city.to_lowercase();
    if city == query {
        total += 90;
    } else if city.starts_with(query) {
        total += 70;
    } else if city.contains(query) {
        total += 40;
    }

    if airport.name.to_lowercase().contains(query) {
        total += 30;
    }
    if airport.country.to_lowercase().contains(query) {
        total += 20;
    }

    if total == 0 {
        return 0;
    }

    total
        + match airport.facility_type.as_str() {
            "large_airport" => 10,
            "medium_airport" => 5,
            _ => 0,
        }
}
