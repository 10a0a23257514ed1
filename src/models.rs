//! Data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maritime Mobile Service Identity (MMSI)
///
/// A nine-digit number identifying the transmitting station. Position
/// reports carry it in a 30-bit field, so any value up to 2^30 - 1 may
/// appear on the air even though only nine digits are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mmsi(u32);

impl From<u32> for Mmsi {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Mmsi {
    /// Get the raw MMSI value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Mmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09}", self.0)
    }
}

/// Position Report Class A (message type 1)
///
/// See: ITU-R M.1371-5, Annex 2, Table 45
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Message type identifier, 1 for a scheduled position report
    pub message_id: u8,
    /// Number of times the message has been repeated, 0 - 3
    pub repeat_indicator: u8,
    pub mmsi: Mmsi,
    /// Navigational status
    ///
    /// - 0 = under way using engine
    /// - 1 = at anchor
    /// - 2 = not under command
    /// - 3 = restricted maneuverability
    /// - 4 = constrained by her draught
    /// - 5 = moored
    /// - 6 = aground
    /// - 7 = engaged in fishing
    /// - 8 = under way sailing
    /// - 9 - 13 = reserved
    /// - 14 = AIS-SART (active), MOB-AIS, EPIRB-AIS
    /// - 15 = not defined (default)
    pub navigational_status: u8,
    /// Rate of turn, ROT[AIS] = 4.733 SQRT(ROT[IND]). None if not available (-128)
    ///
    /// - +127 = turning right at 720 degrees per minute or higher
    /// - -127 = turning left at 720 degrees per minute or higher
    pub rot: Option<i8>,
    /// Speed over ground in knots, None if not available (1023 = 102.3)
    pub sog: Option<f64>,
    /// Position accuracy, 1 = high, 0 = low
    pub position_accuracy: u8,
    /// Longitude in decimal degrees, None if not available (181)
    pub longitude: Option<f64>,
    /// Latitude in decimal degrees, None if not available (91)
    pub latitude: Option<f64>,
    /// Course over ground in degrees, None if not available (3600 = 360.0)
    pub cog: Option<f64>,
    /// Heading in degrees (0-359), None if not available (511)
    pub true_heading: Option<u16>,
    /// UTC second when the report was generated; 60 - 63 flag unavailability
    pub timestamp: u8,
    pub special_manoeuvre: u8,
    /// Receiver autonomous integrity monitoring (RAIM) flag
    pub raim_flag: u8,
    pub communication_state: u32,
}

impl PositionReport {
    /// Whether the decoded layout actually belongs to a type 1 message.
    ///
    /// The decoder reads every payload as a type 1 layout; fields past the
    /// common prefix are only meaningful when this returns true.
    pub fn is_position_report(&self) -> bool {
        self.message_id == 1
    }
}

/// A decoded report paired with its reception time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Reception time in seconds from Unix epoch
    pub timestamp: f64,
    pub report: PositionReport,
}

impl LogEntry {
    pub fn new(timestamp: f64, report: PositionReport) -> Self {
        Self { timestamp, report }
    }

    /// Stamp a report with the current wall-clock time
    pub fn received_now(report: PositionReport) -> Self {
        Self::received_at(Utc::now(), report)
    }

    pub fn received_at(time: DateTime<Utc>, report: PositionReport) -> Self {
        let timestamp = time.timestamp_micros() as f64 / 1_000_000.0;
        Self::new(timestamp, report)
    }
}
