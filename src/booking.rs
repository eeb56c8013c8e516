// Booking ledger: the append-only record of confirmed bookings for the
// session. Entries are never mutated or deleted once written.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{PropertyId, PropertyRecord};

// Fixed service/tax surcharge added on top of the nightly price, in whole
// currency units.
pub const SERVICE_FEE: u32 = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    Confirmed,
}

// A confirmed booking. Display fields are snapshotted from the property at
// confirmation time so the profile view renders without a catalog lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    pub property_id: PropertyId,
    pub property_name: String,
    pub image: String,
    pub distance_text: String,
    pub total_price: u32,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
}

// Deterministic and reproducible from the property snapshot, so expected
// totals can be recomputed in assertions.
pub fn total_for(record: &PropertyRecord) -> u32 {
    record.price_per_night + SERVICE_FEE
}

#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
    issued_ids: HashSet<String>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // Append a confirmed booking for the given property. The generated id
    // is checked-unique against every id issued this session.
    pub fn confirm(&mut self, record: &PropertyRecord, created_at: DateTime<Utc>) -> Booking {
        let id = self.fresh_id();
        let booking = Booking {
            id: id.clone(),
            property_id: record.id,
            property_name: record.name.clone(),
            image: record.image.clone(),
            distance_text: record.distance_text.clone(),
            total_price: total_for(record),
            created_at,
            status: BookingStatus::Confirmed,
        };
        self.issued_ids.insert(id);
        self.bookings.push(booking.clone());
        booking
    }

    // Random ids, re-drawn on collision rather than trusting probability
    fn fresh_id(&self) -> String {
        loop {
            let candidate = format!("BK-{:08X}", rand::random::<u32>());
            if !self.issued_ids.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
