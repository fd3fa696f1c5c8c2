//! GSA: active satellites and dilution of precision.
use crate::decoder::field;
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Satellite slots a GSA sentence carries.
const GSA_SLOTS: usize = 12;

/// Decoded GSA: the set of satellites the receiver currently uses in
/// its position solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gsa {
    /// Satellite numbers as transmitted. Empty slots are skipped, but
    /// zero placeholders are preserved for the consumer to filter.
    pub sats: Vec<u16>,
}

impl Gsa {
    /// Decodes the GSA payload (fields past the header). Fields 0 and 1
    /// are the selection and fix mode, fields 2 through 13 the
    /// satellite slots; slots that do not parse are skipped.
    pub(crate) fn decode(fields: &[&str]) -> Result<Self, Error> {
        let sats = (2..2 + GSA_SLOTS)
            .filter_map(|idx| field(fields, idx).parse::<u16>().ok())
            .collect();
        Ok(Self { sats })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decoder::{decode, Sentence};

    #[test]
    fn slots_with_zero_placeholder() {
        let decoded = decode("$GPGSA,A,3,03,07,00,14,,,,,,,,,1.8,1.0,1.5*3F").unwrap();
        let gsa = match decoded {
            Sentence::Gsa(gsa) => gsa,
            other => panic!("decoded {:?}", other),
        };
        // zero placeholder is kept, empty slots are not
        assert_eq!(gsa.sats, vec![3, 7, 0, 14]);
    }

    #[test]
    fn single_satellite() {
        let decoded = decode("$GPGSA,A,3,07,,,,,,,,,,,,2.0,1.2,1.6*33").unwrap();
        let gsa = match decoded {
            Sentence::Gsa(gsa) => gsa,
            other => panic!("decoded {:?}", other),
        };
        assert_eq!(gsa.sats, vec![7]);
    }
}
