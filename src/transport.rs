//! Transport abstraction.
//!
//! The accumulator only needs a sequence of text lines; where they come
//! from (a serial port, a BLE UART bridge, a synthesized feed, a
//! capture file) is a [Transport] concern. Platform transports live in
//! host applications; the crate ships [Replay] for captures and tests.
use crate::error::Error;

/// A byte stream source with an optional command channel.
pub trait Transport {
    /// Opens the transport. Opening an already open transport is an
    /// implementation defined no-op or error.
    fn open(&mut self) -> Result<(), Error>;

    /// Closes the transport and releases its resources.
    fn close(&mut self) -> Result<(), Error>;

    /// Whether the transport is currently open.
    fn is_open(&self) -> bool;

    /// Sends one command line to the device, if the transport supports
    /// a command channel.
    fn send(&mut self, command: &str) -> Result<(), Error>;

    /// Reads whatever bytes are available into `buf`, returning how
    /// many were read. `Ok(0)` means end of stream. Transports chunk
    /// arbitrarily: feed the result through a
    /// [crate::prelude::LineSplitter] (the [crate::prelude::Session]
    /// does this for you).
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

/// Replays a captured byte stream in fixed size chunks.
///
/// Useful for tests and for post processing receiver logs through the
/// exact same pipeline a live connection uses. Has no command channel.
#[derive(Debug)]
pub struct Replay {
    data: Vec<u8>,
    cursor: usize,
    chunk: usize,
    open: bool,
}

impl Replay {
    /// Default replay chunk size [bytes].
    pub const DEFAULT_CHUNK: usize = 64;

    /// Builds a [Replay] over a captured stream.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            cursor: 0,
            chunk: Self::DEFAULT_CHUNK,
            open: false,
        }
    }

    /// Builds a [Replay] delivering at most `chunk` bytes per read,
    /// to exercise fragmentation.
    pub fn with_chunk_size(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            cursor: 0,
            chunk: chunk.max(1),
            open: false,
        }
    }

    /// Bytes not yet delivered.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }
}

impl Transport for Replay {
    fn open(&mut self) -> Result<(), Error> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn send(&mut self, _command: &str) -> Result<(), Error> {
        Err(Error::CommandUnsupported)
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if !self.open {
            return Err(Error::TransportClosed);
        }

        let len = self
            .chunk
            .min(buf.len())
            .min(self.data.len() - self.cursor);

        buf[..len].copy_from_slice(&self.data[self.cursor..self.cursor + len]);
        self.cursor += len;
        Ok(len)
    }
}
