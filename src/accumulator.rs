//! Sentence accumulator: merges independently arriving GGA, GST, GSA
//! and GSV sentences into one coherent receiver state.
use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, error};

use crate::decoder::{decode, Gga, Gsa, Gst, Gsv, Sentence};
use crate::prelude::{Duration, Epoch, Unit};
use crate::snapshot::{ErrorStats, Position, SatelliteView, Snapshot, VisibleSatellite};

/// Entries not confirmed by any sentence for this long are evicted.
pub const STALE_THRESHOLD_MS: f64 = 5000.0;

/// [Accumulator] consumes one raw NMEA line at a time, at whatever rate
/// and in whatever order the receiver interleaves sentence types, and
/// produces a [Snapshot] of the best known receiver state on demand.
///
/// Position and error statistics follow last-write-wins semantics,
/// satellite sets are upserted per satellite and expire on a rolling
/// 5 second window. One instance lives per connection session; dropping
/// it discards all accumulated state.
///
/// All operations take `now` explicitly, so hosts control the clock and
/// behavior stays deterministic under test. Both operations take
/// `&mut self`: the single-writer assumption is enforced at compile
/// time, wrap the accumulator (or its [crate::prelude::Session]) in a
/// mutex if your host invokes it from several threads.
#[derive(Debug, Default)]
pub struct Accumulator {
    /// Most recent position fix
    position: Option<Gga>,
    /// Most recent error statistics
    error_stats: Option<Gst>,
    /// Visible satellites, keyed by PRN
    visible: HashMap<u16, VisibleSatellite>,
    /// Satellites used in the solution: PRN to last confirmation
    in_use: HashMap<u16, Epoch>,
}

impl Accumulator {
    /// Builds an empty [Accumulator].
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one raw NMEA line.
    ///
    /// Decode failures are deliberately non fatal: the failure is
    /// logged and the line discarded, accumulated state is never
    /// touched by a corrupt or partially received line and the next
    /// valid line resumes accumulation.
    pub fn ingest(&mut self, line: &str, now: Epoch) {
        let sentence = match decode(line) {
            Ok(sentence) => sentence,
            Err(e) => {
                error!("discarding \"{}\": {}", line.trim(), e);
                return;
            },
        };

        match sentence {
            Sentence::Gga(gga) => {
                debug!(
                    "new position: lat={:.6} lon={:.6} quality={}",
                    gga.latitude, gga.longitude, gga.quality
                );
                self.position = Some(gga);
            },
            Sentence::Gst(gst) => {
                self.error_stats = Some(gst);
            },
            Sentence::Gsa(gsa) => {
                self.handle_gsa(&gsa, now);
            },
            Sentence::Gsv(gsv) => {
                self.handle_gsv(&gsv, now);
            },
        }
    }

    /// Produces the current [Snapshot]. Stale satellite entries are
    /// evicted first, so a snapshot taken long after the last ingest
    /// reflects current staleness, not the state at last ingest.
    pub fn snapshot(&mut self, now: Epoch) -> Snapshot {
        self.remove_stale(now);

        Snapshot {
            position: self.position.as_ref().map(|gga| Position {
                latitude: gga.latitude,
                longitude: gga.longitude,
                altitude_m: gga.altitude_m,
                fix_type: gga.quality.code(),
                satellites: gga.satellites,
            }),
            error_stats: self.error_stats.as_ref().map(|gst| ErrorStats {
                latitude_error_m: gst.latitude_error_m,
                longitude_error_m: gst.longitude_error_m,
                altitude_error_m: gst.altitude_error_m,
            }),
            satellites: SatelliteView {
                visible: self
                    .visible
                    .values()
                    .cloned()
                    .sorted_by_key(|sat| sat.prn)
                    .collect(),
                in_use: self.in_use.keys().copied().sorted().collect(),
            },
        }
    }

    /// Upserts the satellites this page reports as visible.
    ///
    /// A new report overwrites the previous entry for that PRN, except
    /// that a previously known SNR survives a report without one: the
    /// receiver keeps announcing geometry for satellites it currently
    /// fails to track.
    ///
    /// The map keys by PRN alone. Constellations with overlapping PRN
    /// ranges can therefore shadow each other; kept as-is, see the
    /// satellite identity note in DESIGN.md.
    fn handle_gsv(&mut self, gsv: &Gsv, now: Epoch) {
        for report in &gsv.satellites {
            if report.prn == 0 {
                continue;
            }

            let entry = VisibleSatellite {
                prn: report.prn,
                elevation_deg: report.elevation_deg,
                azimuth_deg: report.azimuth_deg,
                snr_db: report.snr_db,
                constellation: gsv.constellation,
                last_seen: now,
            };

            match self.visible.get_mut(&report.prn) {
                Some(prev) => {
                    let snr_db = report.snr_db.or(prev.snr_db);
                    *prev = VisibleSatellite { snr_db, ..entry };
                },
                None => {
                    self.visible.insert(report.prn, entry);
                },
            }
        }

        self.remove_stale(now);
    }

    /// Confirms the satellites this sentence reports as used in the
    /// solution. Zero placeholders are filtered out.
    fn handle_gsa(&mut self, gsa: &Gsa, now: Epoch) {
        for prn in &gsa.sats {
            if *prn > 0 {
                self.in_use.insert(*prn, now);
            }
        }

        self.remove_stale(now);
    }

    /// Staleness sweep: drops every entry, in both maps, whose last
    /// confirmation is strictly older than the threshold. Idempotent.
    fn remove_stale(&mut self, now: Epoch) {
        let threshold: Duration = STALE_THRESHOLD_MS * Unit::Millisecond;
        self.visible.retain(|_, sat| now - sat.last_seen <= threshold);
        self.in_use.retain(|_, seen| now - *seen <= threshold);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decoder::checksum;
    use crate::prelude::Constellation;
    use std::str::FromStr;

    /// Frames a sentence body with '$' and its checksum.
    fn sentence(body: &str) -> String {
        format!("${}*{:02X}", body, checksum(body))
    }

    fn t0() -> Epoch {
        Epoch::from_str("2020-01-01T00:00:00 GPST").unwrap()
    }

    #[test]
    fn gga_replaces_position_wholesale() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(
            "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76",
            now,
        );
        let position = acc.snapshot(now).position.unwrap();
        assert!((position.latitude - 53.36133666).abs() < 1e-7);
        assert_eq!(position.fix_type, 1);
        assert_eq!(position.satellites, 8);

        acc.ingest(
            "$GPGGA,134658.00,5106.9792,N,11402.3003,W,4,12,1.0,1048.47,M,-16.27,M,08,AAAA*6C",
            now,
        );
        let position = acc.snapshot(now).position.unwrap();
        assert!((position.latitude - 51.11632).abs() < 1e-5);
        assert!((position.longitude - -114.03833833).abs() < 1e-7);
        assert!((position.altitude_m - 1048.47).abs() < 1e-9);
        assert_eq!(position.fix_type, 4);
        assert_eq!(position.satellites, 12);
    }

    #[test]
    fn gst_replaces_error_stats_wholesale() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(
            "$GPGST,172814.0,0.006,0.023,0.020,273.6,0.023,0.020,0.031*6A",
            now,
        );
        let stats = acc.snapshot(now).error_stats.unwrap();
        assert!((stats.latitude_error_m - 0.023).abs() < 1e-9);
        assert!((stats.longitude_error_m - 0.020).abs() < 1e-9);
        assert!((stats.altitude_error_m - 0.031).abs() < 1e-9);

        acc.ingest(
            &sentence("GPGST,172815.0,0.012,0.050,0.040,273.6,1.500,2.500,3.500"),
            now,
        );
        let stats = acc.snapshot(now).error_stats.unwrap();
        assert!((stats.latitude_error_m - 1.5).abs() < 1e-9);
        assert!((stats.longitude_error_m - 2.5).abs() < 1e-9);
        assert!((stats.altitude_error_m - 3.5).abs() < 1e-9);
    }

    #[test]
    fn gsv_report_without_snr_keeps_previous_value() {
        let now = t0();
        let later = now + 1.0 * Unit::Second;
        let mut acc = Accumulator::new();

        acc.ingest("$GPGSV,1,1,01,07,79,048,42*4B", now);
        acc.ingest("$GPGSV,1,1,01,07,66,029,*44", later);

        let visible = acc.snapshot(later).satellites.visible;
        assert_eq!(visible.len(), 1);

        let sat = &visible[0];
        assert_eq!(sat.prn, 7);
        // SNR survives, everything else refreshes
        assert_eq!(sat.snr_db, Some(42.0));
        assert!((sat.elevation_deg - 66.0).abs() < 1e-9);
        assert!((sat.azimuth_deg - 29.0).abs() < 1e-9);
        assert_eq!(sat.last_seen, later);
    }

    #[test]
    fn gsv_report_without_snr_creates_entry_without_snr() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest("$GPGSV,1,1,01,07,66,029,*44", now);

        let visible = acc.snapshot(now).satellites.visible;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].snr_db, None);
    }

    #[test]
    fn gsa_filters_zero_and_sorts() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest("$GPGSA,A,3,03,07,00,14,,,,,,,,,1.8,1.0,1.5*3F", now);

        let in_use = acc.snapshot(now).satellites.in_use;
        assert_eq!(in_use, vec![3, 7, 14]);
    }

    #[test]
    fn satellites_expire_on_the_rolling_window() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(&sentence("GPGSV,1,1,01,05,10,100,33"), now);
        acc.ingest(&sentence("GPGSA,A,3,05,,,,,,,,,,,,2.0,1.2,1.6"), now);

        // strictly within the window
        let snapshot = acc.snapshot(now + 4999.0 * Unit::Millisecond);
        assert_eq!(snapshot.satellites.visible.len(), 1);
        assert_eq!(snapshot.satellites.in_use, vec![5]);

        // exactly at the threshold: still alive
        let snapshot = acc.snapshot(now + 5000.0 * Unit::Millisecond);
        assert_eq!(snapshot.satellites.visible.len(), 1);

        // past the threshold
        let snapshot = acc.snapshot(now + 5001.0 * Unit::Millisecond);
        assert!(snapshot.satellites.visible.is_empty());
        assert!(snapshot.satellites.in_use.is_empty());
    }

    #[test]
    fn confirmation_extends_the_window() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(&sentence("GPGSA,A,3,09,,,,,,,,,,,,2.0,1.2,1.6"), now);
        // second confirmation 4 s later
        let refresh = now + 4.0 * Unit::Second;
        acc.ingest(&sentence("GPGSA,A,3,09,,,,,,,,,,,,2.0,1.2,1.6"), refresh);

        // 8 s after t0 is only 4 s after the refresh
        let snapshot = acc.snapshot(now + 8.0 * Unit::Second);
        assert_eq!(snapshot.satellites.in_use, vec![9]);

        let snapshot = acc.snapshot(refresh + 5001.0 * Unit::Millisecond);
        assert!(snapshot.satellites.in_use.is_empty());
    }

    #[test]
    fn malformed_lines_leave_state_untouched() {
        let _ = env_logger::builder().is_test(true).try_init();

        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(
            "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76",
            now,
        );
        acc.ingest(&sentence("GPGSV,1,1,01,05,10,100,33"), now);
        let before = acc.snapshot(now);

        // corrupted checksum, truncated line, garbage, unsupported
        // type, non-ASCII header with a valid checksum
        acc.ingest(
            "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*00",
            now,
        );
        acc.ingest("$GPG", now);
        acc.ingest("not nmea at all", now);
        acc.ingest(&sentence("GPZDA,160012.71,11,03,2004,-1,00"), now);
        acc.ingest(&sentence("AéGA,092750.000,5321.6802,N"), now);

        assert_eq!(acc.snapshot(now), before);
    }

    #[test]
    fn visible_set_is_sorted_by_prn_regardless_of_arrival() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(&sentence("GPGSV,1,1,03,22,10,100,33,03,20,200,44,17,30,300,11"), now);
        acc.ingest(&sentence("GLGSV,1,1,01,65,64,037,41"), now);

        let visible = acc.snapshot(now).satellites.visible;
        let prns: Vec<u16> = visible.iter().map(|sat| sat.prn).collect();
        assert_eq!(prns, vec![3, 17, 22, 65]);
        assert_eq!(visible[3].constellation, Constellation::Glonass);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(
            "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76",
            now,
        );
        acc.ingest(&sentence("GPGSV,1,1,01,05,10,100,33"), now);
        acc.ingest("$GPGSA,A,3,03,07,00,14,,,,,,,,,1.8,1.0,1.5*3F", now);

        let later = now + 2.0 * Unit::Second;
        assert_eq!(acc.snapshot(later), acc.snapshot(later));
    }

    #[test]
    fn shared_prn_shadows_across_constellations() {
        // the visible map keys by PRN alone: a Glonass report for the
        // same number replaces the GPS entry (documented limitation)
        let now = t0();
        let mut acc = Accumulator::new();

        acc.ingest(&sentence("GPGSV,1,1,01,07,79,048,42"), now);
        acc.ingest(&sentence("GLGSV,1,1,01,07,15,200,30"), now);

        let visible = acc.snapshot(now).satellites.visible;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].constellation, Constellation::Glonass);
        assert_eq!(visible[0].snr_db, Some(30.0));
    }

    #[test]
    fn partial_state_is_valid() {
        // snapshot between related sentences reflects what has arrived
        let now = t0();
        let mut acc = Accumulator::new();

        let snapshot = acc.snapshot(now);
        assert!(snapshot.position.is_none());
        assert!(snapshot.error_stats.is_none());
        assert!(snapshot.satellites.visible.is_empty());

        acc.ingest(
            "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76",
            now,
        );
        let snapshot = acc.snapshot(now);
        assert!(snapshot.position.is_some());
        assert!(snapshot.error_stats.is_none());
    }
}
