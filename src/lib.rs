//! Decoding of AIS position reports from NMEA AIVDM sentences, and lookup of
//! the report received closest to a given time.

pub mod catcher;
pub mod config;
pub mod correlate;
pub mod decoder;
pub mod errors;
pub mod models;
pub mod receiver;
pub mod service;
