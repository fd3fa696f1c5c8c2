//! GGA: global positioning system fix data.
use crate::decoder::{coordinate, field, opt_f64, req_f64};
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GGA fix quality indicator.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixQuality {
    /// Fix not available
    #[default]
    NoFix,
    /// Autonomous GNSS fix
    Autonomous,
    /// Differential correction applied
    Differential,
    /// PPS mode
    Pps,
    /// RTK, fixed integer ambiguities
    Rtk,
    /// RTK, float ambiguities
    FloatRtk,
    /// Dead reckoning / estimated
    Estimated,
    /// Manual input mode
    Manual,
    /// Simulator mode
    Simulation,
}

impl FixQuality {
    /// Parses the GGA quality digit. Anything unrecognized reads as
    /// [FixQuality::NoFix].
    pub(crate) fn from_digit(digit: &str) -> Self {
        match digit {
            "1" => Self::Autonomous,
            "2" => Self::Differential,
            "3" => Self::Pps,
            "4" => Self::Rtk,
            "5" => Self::FloatRtk,
            "6" => Self::Estimated,
            "7" => Self::Manual,
            "8" => Self::Simulation,
            _ => Self::NoFix,
        }
    }

    /// Fixed numeric code, as published in the snapshot.
    pub fn code(&self) -> u8 {
        match self {
            Self::NoFix => 0,
            Self::Autonomous => 1,
            Self::Differential => 2,
            Self::Pps => 3,
            Self::Rtk => 4,
            Self::FloatRtk => 5,
            Self::Estimated => 6,
            Self::Manual => 7,
            Self::Simulation => 8,
        }
    }
}

impl std::fmt::Display for FixQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoFix => write!(f, "No fix"),
            Self::Autonomous => write!(f, "Autonomous"),
            Self::Differential => write!(f, "Differential"),
            Self::Pps => write!(f, "PPS"),
            Self::Rtk => write!(f, "RTK"),
            Self::FloatRtk => write!(f, "Float RTK"),
            Self::Estimated => write!(f, "Estimated"),
            Self::Manual => write!(f, "Manual"),
            Self::Simulation => write!(f, "Simulation"),
        }
    }
}

/// Decoded GGA position fix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gga {
    /// UTC time of day as transmitted ("hhmmss.sss"), informational
    pub utc: String,
    /// Latitude in signed decimal degrees (+N / -S)
    pub latitude: f64,
    /// Longitude in signed decimal degrees (+E / -W)
    pub longitude: f64,
    /// Fix quality indicator
    pub quality: FixQuality,
    /// Number of satellites used in the fix
    pub satellites: u8,
    /// Horizontal dilution of precision, when transmitted
    pub hdop: Option<f64>,
    /// Altitude above mean sea level [m]
    pub altitude_m: f64,
    /// Geoidal separation [m], when transmitted
    pub geoid_separation_m: Option<f64>,
}

impl Gga {
    /// Decodes the GGA payload (fields past the header).
    /// A receiver without a fix transmits empty coordinate fields:
    /// such lines do not decode and leave prior state untouched.
    pub(crate) fn decode(fields: &[&str]) -> Result<Self, Error> {
        let latitude = coordinate(field(fields, 1), field(fields, 2), "latitude")?;
        let longitude = coordinate(field(fields, 3), field(fields, 4), "longitude")?;

        let quality = FixQuality::from_digit(field(fields, 5));

        let satellites = match field(fields, 6) {
            "" => 0,
            value => value
                .parse::<u8>()
                .map_err(|_| Error::InvalidField("satellites"))?,
        };

        Ok(Self {
            utc: field(fields, 0).to_string(),
            latitude,
            longitude,
            quality,
            satellites,
            hdop: opt_f64(fields, 7),
            altitude_m: req_f64(fields, 8, "altitude")?,
            geoid_separation_m: opt_f64(fields, 10),
        })
    }
}
