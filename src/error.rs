use thiserror::Error;

/// Any failure this library may report. Sentence decoding failures are
/// non fatal by design: [crate::prelude::Accumulator] catches, logs and
/// discards them so a corrupt line never interrupts accumulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Sentence does not start with the '$' delimiter.
    #[error("sentence does not start with '$'")]
    MissingDelimiter,

    /// Sentence carries no '*hh' checksum suffix.
    #[error("missing checksum suffix")]
    MissingChecksum,

    /// Checksum suffix is not two hexadecimal digits.
    #[error("invalid checksum suffix \"{0}\"")]
    InvalidChecksum(String),

    /// Checksum verification failed: the line was corrupted in transit.
    #[error("checksum mismatch: computed {computed:02X}, received {received:02X}")]
    ChecksumMismatch {
        /// XOR checksum computed over the received payload
        computed: u8,
        /// Checksum the sentence claims
        received: u8,
    },

    /// Sentence is too short to carry a talker and sentence type.
    #[error("truncated sentence")]
    TruncatedSentence,

    /// Talker identifier does not map to a known [gnss::prelude::Constellation].
    /// Proprietary ($P..) sentences also wind up here.
    #[error("unknown talker \"{0}\"")]
    UnknownTalker(String),

    /// Standard sentence type we do not decode (only GGA, GST, GSA
    /// and GSV contribute to the receiver state).
    #[error("non supported sentence \"{0}\"")]
    UnsupportedSentence(String),

    /// A field this sentence type requires is absent or empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but does not parse.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// Read or write attempted on a transport that is not open.
    #[error("transport is closed")]
    TransportClosed,

    /// This transport has no command channel.
    #[error("command not supported by this transport")]
    CommandUnsupported,
}
