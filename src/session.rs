//! Per-connection session state.
//!
//! One [Session] owns everything a connection accumulates: the
//! [Accumulator], the transport-boundary [LineSplitter], a bounded log
//! of recent raw sentences, and the display filter. Nothing is global:
//! consumers hold (a reference to) the session, and dropping it
//! discards all state, as specified for the session lifecycle.
use std::collections::VecDeque;

use crate::accumulator::Accumulator;
use crate::decoder::constellation_from_talker;
use crate::error::Error;
use crate::prelude::{Constellation, Epoch};
use crate::snapshot::Snapshot;
use crate::splitter::LineSplitter;
use crate::transport::Transport;

/// Raw sentences retained for display, most recent last.
pub const MAX_RAW_LINES: usize = 100;

/// Read size for [Session::pump].
const PUMP_BUF: usize = 512;

/// Selects which sentences appear in the raw display log. The filter
/// never affects accumulation: every decodable sentence contributes to
/// the receiver state regardless of display settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceFilter {
    /// Show GGA position sentences
    pub gga: bool,
    /// Show GST error statistics sentences
    pub gst: bool,
    /// Show GSA active satellite sentences
    pub gsa: bool,
    /// Constellations whose GSV pages are shown
    gsv: Vec<Constellation>,
}

impl Default for SentenceFilter {
    fn default() -> Self {
        Self {
            gga: true,
            gst: true,
            gsa: true,
            gsv: vec![
                Constellation::GPS,
                Constellation::Glonass,
                Constellation::Galileo,
                Constellation::BeiDou,
            ],
        }
    }
}

impl SentenceFilter {
    /// Shows or hides GSV pages for one [Constellation].
    pub fn show_gsv(&mut self, constellation: Constellation, enabled: bool) {
        self.gsv.retain(|c| *c != constellation);
        if enabled {
            self.gsv.push(constellation);
        }
    }

    /// Whether GSV pages of this [Constellation] are shown.
    pub fn shows_gsv(&self, constellation: Constellation) -> bool {
        self.gsv.contains(&constellation)
    }

    /// Whether this raw line passes the filter. Decided from the
    /// sentence header alone, without a full decode.
    pub fn shows(&self, line: &str) -> bool {
        let Some(header) = line.strip_prefix('$').and_then(|rest| rest.split(',').next())
        else {
            return false;
        };
        if header.len() < 5 || !header.is_ascii() {
            return false;
        }

        let (talker, kind) = header.split_at(header.len() - 3);
        match kind {
            "GGA" => self.gga,
            "GST" => self.gst,
            "GSA" => self.gsa,
            "GSV" => constellation_from_talker(talker)
                .map(|c| self.shows_gsv(c))
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// Owned state of one active connection.
#[derive(Debug, Default)]
pub struct Session {
    accumulator: Accumulator,
    splitter: LineSplitter,
    raw: VecDeque<String>,
    filter: SentenceFilter,
}

impl Session {
    /// Builds a fresh [Session] with the default [SentenceFilter].
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw transport bytes. Complete lines are framed by the
    /// internal [LineSplitter], appended to the raw log (filter
    /// permitting) and ingested by the [Accumulator]. Returns the
    /// number of complete lines processed.
    pub fn feed(&mut self, bytes: &[u8], now: Epoch) -> usize {
        let lines = self.splitter.consume_all(bytes);
        let count = lines.len();
        for line in lines {
            self.handle_line(&line, now);
        }
        count
    }

    /// Feeds one already framed sentence.
    pub fn feed_line(&mut self, line: &str, now: Epoch) {
        self.handle_line(line.trim(), now);
    }

    /// Performs one read on `transport` and feeds the result. Returns
    /// the number of complete lines processed; reads of 0 bytes simply
    /// process 0 lines.
    pub fn pump(&mut self, transport: &mut dyn Transport, now: Epoch) -> Result<usize, Error> {
        let mut buf = [0u8; PUMP_BUF];
        let read = transport.recv(&mut buf)?;
        Ok(self.feed(&buf[..read], now))
    }

    /// Frames and feeds any unterminated remainder held by the
    /// splitter. Call at end of stream.
    pub fn finish(&mut self, now: Epoch) {
        if let Some(line) = self.splitter.flush() {
            self.handle_line(&line, now);
        }
    }

    /// Current receiver state.
    pub fn snapshot(&mut self, now: Epoch) -> Snapshot {
        self.accumulator.snapshot(now)
    }

    /// Retained raw sentences, oldest first.
    pub fn raw_log(&self) -> impl Iterator<Item = &str> {
        self.raw.iter().map(|line| line.as_str())
    }

    /// Active display filter.
    pub fn filter(&self) -> &SentenceFilter {
        &self.filter
    }

    /// Replaces the display filter. The raw log is cleared so the
    /// display only ever shows lines that match the active filter.
    pub fn set_filter(&mut self, filter: SentenceFilter) {
        self.filter = filter;
        self.raw.clear();
    }

    fn handle_line(&mut self, line: &str, now: Epoch) {
        if line.is_empty() {
            return;
        }

        if self.filter.shows(line) {
            if self.raw.len() == MAX_RAW_LINES {
                self.raw.pop_front();
            }
            self.raw.push_back(line.to_string());
        }

        if line.starts_with('$') {
            self.accumulator.ingest(line, now);
        }
    }
}
