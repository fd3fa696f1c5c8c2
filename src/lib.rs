#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod accumulator;
mod decoder;
mod error;
mod session;
mod snapshot;
mod splitter;
mod synth;
mod transport;

// prelude
pub mod prelude {
    pub use crate::accumulator::{Accumulator, STALE_THRESHOLD_MS};
    pub use crate::decoder::{decode, FixQuality, Gga, Gsa, Gst, Gsv, GsvSatellite, Sentence};
    pub use crate::error::Error;
    pub use crate::session::{SentenceFilter, Session, MAX_RAW_LINES};
    pub use crate::snapshot::{ErrorStats, Position, SatelliteView, Snapshot, VisibleSatellite};
    pub use crate::splitter::LineSplitter;
    pub use crate::synth::GeoFix;
    pub use crate::transport::{Replay, Transport};
    // re-export
    pub use gnss::prelude::Constellation;
    pub use hifitime::{Duration, Epoch, Unit};
}

// pub export
pub use error::Error;
