//! Receiver state snapshots, as published to consumers.
use crate::prelude::{Constellation, Epoch};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Best known position, from the most recent GGA.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Latitude in signed decimal degrees (+N / -S)
    pub latitude: f64,
    /// Longitude in signed decimal degrees (+E / -W)
    pub longitude: f64,
    /// Altitude above mean sea level [m]
    pub altitude_m: f64,
    /// Fix quality as a fixed numeric code:
    /// 0 no fix, 1 autonomous, 2 differential, 3 PPS, 4 RTK,
    /// 5 float RTK, 6 estimated, 7 manual, 8 simulation.
    pub fix_type: u8,
    /// Number of satellites used in the fix
    pub satellites: u8,
}

/// Best known error statistics, from the most recent GST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorStats {
    /// 1-sigma latitude error [m]
    pub latitude_error_m: f64,
    /// 1-sigma longitude error [m]
    pub longitude_error_m: f64,
    /// 1-sigma altitude error [m]
    pub altitude_error_m: f64,
}

/// One currently visible satellite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisibleSatellite {
    /// Satellite (PRN) number
    pub prn: u16,
    /// Elevation above horizon [deg]
    pub elevation_deg: f64,
    /// True azimuth [deg]
    pub azimuth_deg: f64,
    /// Signal to noise ratio [dB], [None] when the receiver has not
    /// reported one yet
    pub snr_db: Option<f64>,
    /// [Constellation] that reported this satellite
    pub constellation: Constellation,
    /// Instant this satellite was last confirmed by an incoming sentence
    pub last_seen: Epoch,
}

/// Satellite visibility: who is in view and who contributes to the fix.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteView {
    /// Visible satellites, sorted ascending by PRN
    pub visible: Vec<VisibleSatellite>,
    /// PRNs of the satellites used in the solution, sorted ascending
    pub in_use: Vec<u16>,
}

/// Immutable picture of the best known receiver state. Sub records are
/// merged incrementally, so a snapshot taken between two related
/// sentences simply reflects whatever has arrived so far.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// Most recent position fix, [None] until a GGA decodes
    pub position: Option<Position>,
    /// Most recent error statistics, [None] until a GST decodes
    pub error_stats: Option<ErrorStats>,
    /// Current satellite visibility
    pub satellites: SatelliteView,
}
