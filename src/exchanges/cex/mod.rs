//! Centralized exchanges

mod coinzip;

pub use coinzip::Coinzip;
