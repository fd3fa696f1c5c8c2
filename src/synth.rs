//! Sentence synthesis.
//!
//! Position sources that are not NMEA receivers (a platform geolocation
//! service, a simulator) can join the pipeline by synthesizing the
//! sentences a receiver would have produced. Every synthesized sentence
//! carries a valid checksum and round-trips through [crate::prelude::decode].
use crate::decoder::checksum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A plain position fix with an accuracy radius, as platform location
/// services report them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoFix {
    /// Latitude in signed decimal degrees (+N / -S)
    pub latitude: f64,
    /// Longitude in signed decimal degrees (+E / -W)
    pub longitude: f64,
    /// Altitude above mean sea level [m], when known
    pub altitude_m: Option<f64>,
    /// Horizontal accuracy radius (95% confidence) [m]
    pub accuracy_m: f64,
    /// Vertical accuracy (95% confidence) [m], when known
    pub altitude_accuracy_m: Option<f64>,
}

/// Frames `body` with the '$' delimiter and its checksum.
fn frame(body: &str) -> String {
    format!("${}*{:02X}", body, checksum(body))
}

/// Degrees to the NMEA "ddmm.mmmm" angle plus hemisphere letter.
fn angle(degrees: f64, width: usize, positive: char, negative: char) -> (String, char) {
    let hemisphere = if degrees >= 0.0 { positive } else { negative };
    let unsigned = degrees.abs();
    let whole = unsigned.trunc();
    let minutes = (unsigned - whole) * 60.0;
    (
        format!("{:0deg$}{:07.4}", whole as u32, minutes, deg = width),
        hemisphere,
    )
}

impl GeoFix {
    /// Synthesizes the GGA sentence for this fix. `utc` is the time of
    /// day field ("hhmmss.sss"). Sub 10 m accuracy is reported as a
    /// differential quality fix, anything else as autonomous; HDOP is
    /// approximated from the accuracy radius.
    pub fn gga(&self, utc: &str) -> String {
        let (lat, lat_hemisphere) = angle(self.latitude, 2, 'N', 'S');
        let (lon, lon_hemisphere) = angle(self.longitude, 3, 'E', 'W');

        let quality = if self.accuracy_m < 10.0 { 2 } else { 1 };
        let hdop = self.accuracy_m / 25.0;
        let altitude = self.altitude_m.unwrap_or(0.0);

        frame(&format!(
            "GPGGA,{},{},{},{},{},{},08,{:.1},{:.1},M,0.0,M,,",
            utc, lat, lat_hemisphere, lon, lon_hemisphere, quality, hdop, altitude,
        ))
    }

    /// Synthesizes the GST sentence for this fix. The accuracy radius
    /// is 95% confidence, so component errors are reported at half of
    /// it (1-sigma); the altitude error falls back to the horizontal
    /// one when no vertical accuracy is known.
    pub fn gst(&self, utc: &str) -> String {
        let base = self.accuracy_m / 2.0;
        let altitude = self.altitude_accuracy_m.map(|a| a / 2.0).unwrap_or(base);

        frame(&format!(
            "GPGST,{},{:.3},{:.3},{:.3},0.000,{:.3},{:.3},{:.3}",
            utc, base, base, base, base, base, altitude,
        ))
    }
}
