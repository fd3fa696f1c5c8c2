//! GSV: satellites in view.
use crate::decoder::field;
use crate::error::Error;
use crate::prelude::Constellation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One satellite report inside a GSV sentence.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GsvSatellite {
    /// Satellite (PRN) number
    pub prn: u16,
    /// Elevation above horizon [deg], 0 when not transmitted
    pub elevation_deg: f64,
    /// True azimuth [deg], 0 when not transmitted
    pub azimuth_deg: f64,
    /// Signal to noise ratio [dB], [None] when not transmitted
    pub snr_db: Option<f64>,
}

/// Decoded GSV: one page of the visible satellite set for a single
/// constellation. A full set usually spans several pages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gsv {
    /// [Constellation] this page reports for, from the sentence talker
    pub constellation: Constellation,
    /// Total number of pages in this cycle
    pub total_messages: u8,
    /// Page number, starting at 1
    pub message_number: u8,
    /// Satellites in view, over the whole cycle
    pub sats_in_view: u8,
    /// Satellite reports carried by this page (up to four)
    pub satellites: Vec<GsvSatellite>,
}

impl Gsv {
    /// Decodes the GSV payload (fields past the header). Satellite
    /// reports come in groups of four fields; an incomplete trailing
    /// group (NMEA 4.11 signal identifier) is ignored.
    pub(crate) fn decode(constellation: Constellation, fields: &[&str]) -> Result<Self, Error> {
        let total_messages = field(fields, 0)
            .parse::<u8>()
            .map_err(|_| Error::InvalidField("total messages"))?;
        let message_number = field(fields, 1)
            .parse::<u8>()
            .map_err(|_| Error::InvalidField("message number"))?;
        let sats_in_view = field(fields, 2)
            .parse::<u8>()
            .map_err(|_| Error::InvalidField("satellites in view"))?;

        let mut satellites = Vec::new();
        for group in fields[3.min(fields.len())..].chunks_exact(4) {
            let prn = match group[0].parse::<u16>() {
                Ok(prn) => prn,
                Err(_) => continue,
            };
            satellites.push(GsvSatellite {
                prn,
                elevation_deg: group[1].parse::<f64>().unwrap_or(0.0),
                azimuth_deg: group[2].parse::<f64>().unwrap_or(0.0),
                snr_db: group[3].parse::<f64>().ok(),
            });
        }

        Ok(Self {
            constellation,
            total_messages,
            message_number,
            sats_in_view,
            satellites,
        })
    }
}
