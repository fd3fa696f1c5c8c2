//! Line framing at the transport boundary.
//!
//! Transports deliver arbitrary byte chunks: a sentence may arrive
//! split across several reads, or several sentences inside one read.
//! [LineSplitter] reassembles complete lines out of that stream.
use std::collections::VecDeque;

/// Longest line we are willing to buffer while waiting for a
/// terminator. NMEA-0183 caps sentences at 82 characters; anything far
/// beyond that is line noise and gets dropped once the buffer fills.
const MAX_PENDING: usize = 1024;

/// Accumulates raw bytes and yields complete, trimmed, non empty lines.
/// Lines terminate on '\n'; a preceding '\r' is stripped.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: VecDeque<u8>,
}

impl LineSplitter {
    /// Builds an empty [LineSplitter].
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `data` and returns the first complete line, if any.
    /// Call [Self::next_line] until [None] to drain the rest.
    pub fn consume(&mut self, data: &[u8]) -> Option<String> {
        self.push(data);
        self.next_line()
    }

    /// Pushes `data` and returns every complete line it unlocked.
    pub fn consume_all(&mut self, data: &[u8]) -> Vec<String> {
        self.push(data);
        let mut lines = Vec::new();
        while let Some(line) = self.next_line() {
            lines.push(line);
        }
        lines
    }

    /// Returns the unterminated remainder, if any. Call at end of
    /// stream: some sources do not terminate their final line.
    pub fn flush(&mut self) -> Option<String> {
        let rest: Vec<u8> = self.buffer.drain(..).collect();
        Self::frame(&rest)
    }

    /// Bytes currently buffered waiting for a terminator.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn push(&mut self, data: &[u8]) {
        for byte in data {
            self.buffer.push_back(*byte);
        }
        // runaway unterminated input: keep only the tail
        while self.buffer.len() > MAX_PENDING {
            self.buffer.pop_front();
        }
    }

    fn next_line(&mut self) -> Option<String> {
        while let Some(position) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let mut raw: Vec<u8> = self.buffer.drain(..=position).collect();
            raw.pop(); // the '\n'
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            if let Some(line) = Self::frame(&raw) {
                return Some(line);
            }
        }
        None
    }

    fn frame(raw: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(raw);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reassembles_fragmented_lines() {
        let mut splitter = LineSplitter::new();

        assert_eq!(splitter.consume(b"$GPGGA,0927"), None);
        assert_eq!(splitter.consume(b"50.000,5321.6802"), None);
        assert_eq!(
            splitter.consume(b",N*41\r\n").as_deref(),
            Some("$GPGGA,092750.000,5321.6802,N*41"),
        );
        assert_eq!(splitter.pending(), 0);
    }

    #[test]
    fn splits_batched_lines() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.consume_all(b"$A*00\r\n$B*01\r\n$C");

        assert_eq!(lines, vec!["$A*00".to_string(), "$B*01".to_string()]);
        // '$C' stays buffered until its terminator arrives
        assert_eq!(splitter.pending(), 2);
        assert_eq!(splitter.consume_all(b"*02\n"), vec!["$C*02".to_string()]);
    }

    #[test]
    fn bare_newline_termination() {
        let mut splitter = LineSplitter::new();
        assert_eq!(
            splitter.consume(b"$GPGSA,A,3*00\n").as_deref(),
            Some("$GPGSA,A,3*00"),
        );
    }

    #[test]
    fn empty_lines_are_skipped() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.consume_all(b"\r\n\r\n  \r\n"), Vec::<String>::new());
        assert_eq!(
            splitter.consume_all(b"\r\n$X*00\r\n\r\n"),
            vec!["$X*00".to_string()],
        );
    }

    #[test]
    fn flush_returns_the_remainder() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.consume(b"$GPGSV,1,1,00*79"), None);
        assert_eq!(splitter.flush().as_deref(), Some("$GPGSV,1,1,00*79"));
        assert_eq!(splitter.flush(), None);
    }

    #[test]
    fn runaway_input_is_bounded() {
        let mut splitter = LineSplitter::new();
        splitter.consume_all(&[b'x'; 4096]);
        assert!(splitter.pending() <= MAX_PENDING);
    }
}
