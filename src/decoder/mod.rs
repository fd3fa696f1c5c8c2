//! NMEA-0183 sentence decoding: checksum verification, talker
//! identification and field parsing for the four sentence kinds that
//! contribute to the receiver state (GGA, GST, GSA, GSV).
use crate::error::Error;
use crate::prelude::Constellation;

mod gga;
mod gsa;
mod gst;
mod gsv;

pub use gga::{FixQuality, Gga};
pub use gsa::Gsa;
pub use gst::Gst;
pub use gsv::{Gsv, GsvSatellite};

/// One decoded sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Sentence {
    /// Position fix
    Gga(Gga),
    /// Pseudorange error statistics
    Gst(Gst),
    /// Satellites used in the position solution
    Gsa(Gsa),
    /// Satellites in view
    Gsv(Gsv),
}

/// XOR checksum over a sentence body (the characters between '$' and '*').
pub(crate) fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Maps a two letter talker identifier to the [Constellation] it reports for.
/// "GN" designates a multi constellation solution.
pub(crate) fn constellation_from_talker(talker: &str) -> Result<Constellation, Error> {
    match talker {
        "GP" => Ok(Constellation::GPS),
        "GL" => Ok(Constellation::Glonass),
        "GA" => Ok(Constellation::Galileo),
        "GB" | "BD" => Ok(Constellation::BeiDou),
        "GQ" | "QZ" => Ok(Constellation::QZSS),
        "GI" => Ok(Constellation::IRNSS),
        "GN" => Ok(Constellation::Mixed),
        _ => Err(Error::UnknownTalker(talker.to_string())),
    }
}

/// Returns the field at `idx`, or "" when the sentence is short.
pub(crate) fn field<'a>(fields: &[&'a str], idx: usize) -> &'a str {
    fields.get(idx).copied().unwrap_or("")
}

/// Optional floating point field: empty or unparseable reads as [None].
pub(crate) fn opt_f64(fields: &[&str], idx: usize) -> Option<f64> {
    field(fields, idx).parse::<f64>().ok()
}

/// Required floating point field.
pub(crate) fn req_f64(fields: &[&str], idx: usize, name: &'static str) -> Result<f64, Error> {
    let value = field(fields, idx);
    if value.is_empty() {
        return Err(Error::MissingField(name));
    }
    value.parse::<f64>().map_err(|_| Error::InvalidField(name))
}

/// Converts an NMEA "ddmm.mmmm" (or "dddmm.mmmm") angle and its
/// hemisphere letter to signed decimal degrees (+N/+E, -S/-W).
pub(crate) fn coordinate(
    value: &str,
    hemisphere: &str,
    name: &'static str,
) -> Result<f64, Error> {
    if value.is_empty() || hemisphere.is_empty() {
        return Err(Error::MissingField(name));
    }
    let raw = value.parse::<f64>().map_err(|_| Error::InvalidField(name))?;
    let degrees = (raw / 100.0).trunc();
    let minutes = raw - degrees * 100.0;
    let unsigned = degrees + minutes / 60.0;
    match hemisphere {
        "N" | "E" => Ok(unsigned),
        "S" | "W" => Ok(-unsigned),
        _ => Err(Error::InvalidField(name)),
    }
}

/// Decodes one raw NMEA-0183 line into a typed [Sentence].
///
/// The line is trimmed of surrounding whitespace and CR/LF, must start
/// with '$', and must carry a valid "*hh" XOR checksum. The talker must
/// map to a known [Constellation] and the sentence type must be one of
/// GGA, GST, GSA, GSV. Never panics: any malformed input returns [Error].
pub fn decode(line: &str) -> Result<Sentence, Error> {
    let line = line.trim();
    let body = line.strip_prefix('$').ok_or(Error::MissingDelimiter)?;

    let (body, suffix) = body.rsplit_once('*').ok_or(Error::MissingChecksum)?;
    let received = u8::from_str_radix(suffix.trim(), 16)
        .map_err(|_| Error::InvalidChecksum(suffix.to_string()))?;

    let computed = checksum(body);
    if computed != received {
        return Err(Error::ChecksumMismatch { computed, received });
    }

    let mut split = body.split(',');
    let header = split.next().unwrap_or("");
    // headers are ASCII by definition; rejecting anything else up
    // front keeps the talker/type split on character boundaries
    if header.len() < 5 || !header.is_ascii() {
        return Err(Error::TruncatedSentence);
    }

    let (talker, kind) = header.split_at(header.len() - 3);
    let constellation = constellation_from_talker(talker)?;
    let fields: Vec<&str> = split.collect();

    match kind {
        "GGA" => Ok(Sentence::Gga(Gga::decode(&fields)?)),
        "GST" => Ok(Sentence::Gst(Gst::decode(&fields)?)),
        "GSA" => Ok(Sentence::Gsa(Gsa::decode(&fields)?)),
        "GSV" => Ok(Sentence::Gsv(Gsv::decode(constellation, &fields)?)),
        _ => Err(Error::UnsupportedSentence(kind.to_string())),
    }
}
