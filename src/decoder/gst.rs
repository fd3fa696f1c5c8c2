//! GST: pseudorange error statistics.
use crate::decoder::{field, opt_f64, req_f64};
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoded GST error statistics. All errors are 1-sigma, in meters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gst {
    /// UTC time of day as transmitted ("hhmmss.sss"), informational
    pub utc: String,
    /// RMS of the pseudorange residuals [m], when transmitted
    pub rms_m: Option<f64>,
    /// Standard deviation of the latitude error [m]
    pub latitude_error_m: f64,
    /// Standard deviation of the longitude error [m]
    pub longitude_error_m: f64,
    /// Standard deviation of the altitude error [m]
    pub altitude_error_m: f64,
}

impl Gst {
    /// Decodes the GST payload (fields past the header).
    pub(crate) fn decode(fields: &[&str]) -> Result<Self, Error> {
        Ok(Self {
            utc: field(fields, 0).to_string(),
            rms_m: opt_f64(fields, 1),
            latitude_error_m: req_f64(fields, 5, "latitude error")?,
            longitude_error_m: req_f64(fields, 6, "longitude error")?,
            altitude_error_m: req_f64(fields, 7, "altitude error")?,
        })
    }
}
