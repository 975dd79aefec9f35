//! # Booking storage
//!
//! Bookings live in a single CSV file (`demo_bookings.csv`) inside the data
//! directory. Writes go to a temporary file that is renamed over the original.

use anyhow::Result;
use async_trait::async_trait;
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

const BOOKINGS_FILE: &str = "demo_bookings.csv";

/// A stored demo booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoBooking {
    pub id: String,
    pub firm_name: String,
    pub company_type: String,
    pub person_name: String,
    pub title: String,
    pub email: String,
    pub team_size: String,
    /// YYYY-MM-DD
    pub meeting_date: String,
    /// HH:MM
    pub meeting_time: String,
    pub meeting_link: String,
    /// RFC 3339
    pub created_at: String,
}

/// Storage backend for demo bookings
#[async_trait]
pub trait BookingStorage: Send + Sync {
    /// All bookings in insertion order
    async fn list_bookings(&self) -> Result<Vec<DemoBooking>>;

    /// Append a booking
    async fn store_booking(&self, booking: &DemoBooking) -> Result<()>;
}

/// CSV-based booking storage
#[derive(Clone)]
pub struct CsvBookingStorage {
    file_path: PathBuf,
}

impl CsvBookingStorage {
    /// Create the storage in `data_dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
            info!("Created data directory {}", data_dir.display());
        }

        Ok(Self {
            file_path: data_dir.join(BOOKINGS_FILE),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_bookings(&self) -> Result<Vec<DemoBooking>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut bookings = Vec::new();
        for result in csv_reader.deserialize() {
            let booking: DemoBooking = result?;
            bookings.push(booking);
        }
        Ok(bookings)
    }

    fn write_bookings(&self, bookings: &[DemoBooking]) -> Result<()> {
        let temp_path = self.file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            for booking in bookings {
                csv_writer.serialize(booking)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &self.file_path)?;
        Ok(())
    }
}

#[async_trait]
impl BookingStorage for CsvBookingStorage {
    async fn list_bookings(&self) -> Result<Vec<DemoBooking>> {
        self.read_bookings()
    }

    async fn store_booking(&self, booking: &DemoBooking) -> Result<()> {
        let mut bookings = self.read_bookings()?;
        bookings.push(booking.clone());
        self.write_bookings(&bookings)?;
        info!("Stored booking {} for {} {}", booking.id, booking.meeting_date, booking.meeting_time);
        Ok(())
    }
}
