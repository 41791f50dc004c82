// SPDX-License-Identifier: MIT
// Copyright (c) 2026 SkyLux

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftCategory {
    Light,
    Midsize,
    Heavy,
    Ultra,
}

impl AircraftCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftCategory::Light => "light",
            AircraftCategory::Midsize => "midsize",
            AircraftCategory::Heavy => "heavy",
            AircraftCategory::Ultra => "ultra",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(AircraftCategory::Light),
            "midsize" => Some(AircraftCategory::Midsize),
            "heavy" => Some(AircraftCategory::Heavy),
            "ultra" => Some(AircraftCategory::Ultra),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Cancelled,
}

/// Demo mode: payment status is tracked but no processor is ever called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: String,
    pub model: String,
    pub category: AircraftCategory,
    pub manufacturer: String,
    pub passengers: u32,
    pub range_nm: u32,
    pub speed_mph: u32,
    pub hourly_rate: f64,
    pub description: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub user_id: String,
    pub aircraft_id: String,
    pub departure: String,
    pub arrival: String,
    pub departure_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub passengers: u32,
    pub trip_type: TripType,
    pub status: FlightStatus,
    pub total_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies when chartering a flight; the store fills in the
/// id, pending status, and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFlight {
    pub user_id: String,
    pub aircraft_id: String,
    pub departure: String,
    pub arrival: String,
    pub departure_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub passengers: u32,
    pub trip_type: TripType,
    pub total_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub flight_id: String,
    pub user_id: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub flight_id: String,
    pub user_id: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub airport_code: String,
    pub description: String,
    pub popular: bool,
}

/// Flight search criteria from the booking form. Departure/arrival and the
/// travel dates describe the trip being quoted; availability filtering only
/// considers category and seat count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearch {
    pub departure: String,
    pub arrival: String,
    pub departure_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub passengers: u32,
    pub trip_type: TripType,
    pub category: Option<AircraftCategory>,
}

/// In-memory store for the charter fleet, quotes, and bookings. Seeded with
/// sample data at construction; nothing survives the process.
pub struct CharterStore {
    aircraft: HashMap<String, Aircraft>,
    flights: HashMap<String, Flight>,
    bookings: HashMap<String, Booking>,
    destinations: HashMap<String, Destination>,
}

impl Default for CharterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CharterStore {
    pub fn new() -> Self {
        let mut store = Self {
            aircraft: HashMap::new(),
            flights: HashMap::new(),
            bookings: HashMap::new(),
            destinations: HashMap::new(),
        };
        store.seed_sample_data();
        store
    }

    fn seed_sample_data(&mut self) {
        let jet = |model: &str,
                   category: AircraftCategory,
                   manufacturer: &str,
                   passengers: u32,
                   range_nm: u32,
                   speed_mph: u32,
                   hourly_rate: f64,
                   description: &str| Aircraft {
            id: new_id(),
            model: model.to_string(),
            category,
            manufacturer: manufacturer.to_string(),
            passengers,
            range_nm,
            speed_mph,
            hourly_rate,
            description: description.to_string(),
            available: true,
        };

        let fleet = [
            jet(
                "Citation CJ3+",
                AircraftCategory::Light,
                "Cessna",
                7,
                2040,
                478,
                3500.0,
                "Perfect for short to medium-range flights with luxury amenities.",
            ),
            jet(
                "Hawker 800XP",
                AircraftCategory::Midsize,
                "Hawker Beechcraft",
                8,
                2540,
                514,
                4800.0,
                "Ideal for coast-to-coast flights with spacious cabin comfort.",
            ),
            jet(
                "Gulfstream G650",
                AircraftCategory::Heavy,
                "Gulfstream",
                14,
                7000,
                652,
                8500.0,
                "Ultra-long-range luxury for international travel with unmatched comfort.",
            ),
            jet(
                "Bombardier Global 7500",
                AircraftCategory::Ultra,
                "Bombardier",
                19,
                7700,
                690,
                12000.0,
                "The world's largest and longest-range business jet with four distinct living spaces.",
            ),
            jet(
                "Phenom 300E",
                AircraftCategory::Light,
                "Embraer",
                9,
                2010,
                521,
                3200.0,
                "Outstanding performance and fuel efficiency for light jet category.",
            ),
            jet(
                "Citation Latitude",
                AircraftCategory::Midsize,
                "Cessna",
                9,
                2700,
                513,
                5500.0,
                "Spacious cabin with advanced avionics and superior comfort.",
            ),
            jet(
                "Falcon 900EX",
                AircraftCategory::Heavy,
                "Dassault",
                12,
                4500,
                590,
                7800.0,
                "Tri-jet reliability with intercontinental range and luxurious appointments.",
            ),
            jet(
                "Citation X+",
                AircraftCategory::Heavy,
                "Cessna",
                12,
                3408,
                717,
                9200.0,
                "The fastest civilian aircraft with cutting-edge technology and speed.",
            ),
        ];
        for aircraft in fleet {
            self.aircraft.insert(aircraft.id.clone(), aircraft);
        }

        let spot = |name: &str, city: &str, state: &str, code: &str, description: &str| {
            Destination {
                id: new_id(),
                name: name.to_string(),
                city: city.to_string(),
                state: Some(state.to_string()),
                country: "USA".to_string(),
                airport_code: code.to_string(),
                description: description.to_string(),
                popular: true,
            }
        };
        let destinations = [
            spot(
                "Miami International Airport",
                "Miami",
                "FL",
                "MIA",
                "Luxury beaches and vibrant nightlife",
            ),
            spot(
                "Aspen/Pitkin County Airport",
                "Aspen",
                "CO",
                "ASE",
                "World-class skiing and mountain luxury",
            ),
            spot(
                "Napa County Airport",
                "Napa",
                "CA",
                "APC",
                "Premium wine country experiences",
            ),
        ];
        for destination in destinations {
            self.destinations.insert(destination.id.clone(), destination);
        }
    }

    // Aircraft

    pub fn aircraft(&self) -> Vec<Aircraft> {
        self.aircraft.values().filter(|a| a.available).cloned().collect()
    }

    pub fn aircraft_by_id(&self, id: &str) -> Option<Aircraft> {
        self.aircraft.get(id).cloned()
    }

    pub fn aircraft_by_category(&self, category: AircraftCategory) -> Vec<Aircraft> {
        self.aircraft
            .values()
            .filter(|a| a.category == category && a.available)
            .cloned()
            .collect()
    }

    pub fn add_aircraft(&mut self, mut aircraft: Aircraft) -> Aircraft {
        aircraft.id = new_id();
        self.aircraft.insert(aircraft.id.clone(), aircraft.clone());
        aircraft
    }

    /// Available aircraft matching the search criteria: optional category
    /// filter plus enough seats for the whole party.
    pub fn search_flights(&self, search: &FlightSearch) -> Vec<Aircraft> {
        self.aircraft
            .values()
            .filter(|a| a.available)
            .filter(|a| search.category.map_or(true, |c| a.category == c))
            .filter(|a| a.passengers >= search.passengers)
            .cloned()
            .collect()
    }

    // Flights

    pub fn create_flight(&mut self, new_flight: NewFlight) -> Flight {
        let flight = Flight {
            id: new_id(),
            user_id: new_flight.user_id,
            aircraft_id: new_flight.aircraft_id,
            departure: new_flight.departure,
            arrival: new_flight.arrival,
            departure_date: new_flight.departure_date,
            return_date: new_flight.return_date,
            passengers: new_flight.passengers,
            trip_type: new_flight.trip_type,
            status: FlightStatus::Pending,
            total_cost: new_flight.total_cost,
            created_at: Utc::now(),
        };
        self.flights.insert(flight.id.clone(), flight.clone());
        flight
    }

    pub fn flights_by_user(&self, user_id: &str) -> Vec<Flight> {
        self.flights
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn flight_by_id(&self, id: &str) -> Option<Flight> {
        self.flights.get(id).cloned()
    }

    pub fn update_flight_status(&mut self, id: &str, status: FlightStatus) -> Option<Flight> {
        let flight = self.flights.get_mut(id)?;
        flight.status = status;
        Some(flight.clone())
    }

    // Bookings

    pub fn create_booking(&mut self, new_booking: NewBooking) -> Booking {
        let booking = Booking {
            id: new_id(),
            flight_id: new_booking.flight_id,
            user_id: new_booking.user_id,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_amount: new_booking.total_amount,
            created_at: Utc::now(),
        };
        self.bookings.insert(booking.id.clone(), booking.clone());
        booking
    }

    pub fn bookings_by_user(&self, user_id: &str) -> Vec<Booking> {
        self.bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn booking_by_id(&self, id: &str) -> Option<Booking> {
        self.bookings.get(id).cloned()
    }

    pub fn update_booking_status(&mut self, id: &str, status: BookingStatus) -> Option<Booking> {
        let booking = self.bookings.get_mut(id)?;
        booking.status = status;
        Some(booking.clone())
    }

    // Destinations

    pub fn destinations(&self) -> Vec<Destination> {
        self.destinations.values().cloned().collect()
    }

    pub fn popular_destinations(&self) -> Vec<Destination> {
        self.destinations.values().filter(|d| d.popular).cloned().collect()
    }

    pub fn add_destination(&mut self, mut destination: Destination) -> Destination {
        destination.id = new_id();
        self.destinations
            .insert(destination.id.clone(), destination.clone());
        destination
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_search(passengers: u32, category: Option<AircraftCategory>) -> FlightSearch {
        FlightSearch {
            departure: "JFK".to_string(),
            arrival: "MIA".to_string(),
            departure_date: Utc::now(),
            return_date: None,
            passengers,
            trip_type: TripType::OneWay,
            category,
        }
    }

    #[test]
    fn test_seed_data() {
        let store = CharterStore::new();
        assert_eq!(store.aircraft().len(), 8);
        assert_eq!(store.popular_destinations().len(), 3);
        assert_eq!(
            store.aircraft_by_category(AircraftCategory::Heavy).len(),
            3
        );
    }

    #[test]
    fn test_search_flights_filters_category_and_seats() {
        let store = CharterStore::new();

        let heavy = store.search_flights(&sample_search(10, Some(AircraftCategory::Heavy)));
        assert_eq!(heavy.len(), 3);

        // Only the G650 (14) and Global 7500 (19) seat this many.
        let large_party = store.search_flights(&sample_search(14, None));
        assert_eq!(large_party.len(), 2);

        let impossible = store.search_flights(&sample_search(30, None));
        assert!(impossible.is_empty());
    }

    #[test]
    fn test_flight_lifecycle() {
        let mut store = CharterStore::new();
        let aircraft = store.aircraft().remove(0);

        let flight = store.create_flight(NewFlight {
            user_id: "user-1".to_string(),
            aircraft_id: aircraft.id.clone(),
            departure: "JFK".to_string(),
            arrival: "ASE".to_string(),
            departure_date: Utc::now(),
            return_date: None,
            passengers: 4,
            trip_type: TripType::OneWay,
            total_cost: Some(aircraft.hourly_rate * 4.5),
        });
        assert_eq!(flight.status, FlightStatus::Pending);

        let confirmed = store
            .update_flight_status(&flight.id, FlightStatus::Confirmed)
            .unwrap();
        assert_eq!(confirmed.status, FlightStatus::Confirmed);
        assert_eq!(store.flights_by_user("user-1").len(), 1);
        assert!(store.update_flight_status("missing", FlightStatus::Cancelled).is_none());
    }

    #[test]
    fn test_booking_lifecycle() {
        let mut store = CharterStore::new();
        let booking = store.create_booking(NewBooking {
            flight_id: "flight-1".to_string(),
            user_id: "user-1".to_string(),
            total_amount: 15750.0,
        });
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);

        let paid = store
            .update_booking_status(&booking.id, BookingStatus::Paid)
            .unwrap();
        assert_eq!(paid.status, BookingStatus::Paid);
        assert_eq!(store.bookings_by_user("user-1").len(), 1);
        assert!(store.booking_by_id(&booking.id).is_some());
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for category in [
            AircraftCategory::Light,
            AircraftCategory::Midsize,
            AircraftCategory::Heavy,
            AircraftCategory::Ultra,
        ] {
            assert_eq!(AircraftCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(AircraftCategory::parse("jumbo"), None);
    }
}
