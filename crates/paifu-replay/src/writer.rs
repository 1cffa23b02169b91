//! Replay stream writer.
//!
//! [`ReplayWriter`] streams rounds to any `Write` sink as they complete.
//! The header is written immediately on construction.

use std::io::Write;

use paifu_core::NUM_SEATS;
use tracing::debug;

use crate::codec::{encode_header, encode_record, encode_round, write_u8};
use crate::error::ReplayError;
use crate::types::{Record, Replay, ReplayHeader, Round, RECORD_ROUND};

/// Writes replay data to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use paifu_core::{parse_tiles, Rule, Seat};
/// use paifu_replay::{ReplayReader, ReplayWriter, Round};
///
/// let header = paifu_replay::Replay::new(Rule::default()).header();
///
/// let mut buf = Vec::new();
/// let mut writer = ReplayWriter::new(&mut buf, &header).unwrap();
/// for n in 0..2u8 {
///     let mut round = Round::new(n, 0, Seat::new(n).unwrap(), false, 0, u64::from(n));
///     for track in &mut round.tracks {
///         track.init = parse_tiles("1m 2m 3m 4m 5m 6m 7m 8m 9m 1p 2p 3p 4p").unwrap();
///     }
///     writer.write_round(&round).unwrap();
/// }
/// writer.finish([10, 5, -5, -10]).unwrap();
/// assert_eq!(writer.rounds_written(), 2);
/// drop(writer);
///
/// let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header(), &header);
/// assert_eq!(reader.next_round().unwrap().unwrap().round, 0);
/// assert_eq!(reader.next_round().unwrap().unwrap().round, 1);
/// assert!(reader.next_round().unwrap().is_none());
/// assert_eq!(reader.scores(), Some([10, 5, -5, -10]));
/// ```
pub struct ReplayWriter<W: Write> {
    writer: W,
    rounds_written: u64,
    finished: bool,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a new replay writer, immediately writing the header.
    pub fn new(mut writer: W, header: &ReplayHeader) -> Result<Self, ReplayError> {
        encode_header(&mut writer, header)?;
        Ok(Self {
            writer,
            rounds_written: 0,
            finished: false,
        })
    }

    /// Append a completed round.
    pub fn write_round(&mut self, round: &Round) -> Result<(), ReplayError> {
        if self.finished {
            return Err(ReplayError::AlreadyFinished);
        }
        write_u8(&mut self.writer, RECORD_ROUND)?;
        encode_round(&mut self.writer, round)?;
        self.rounds_written += 1;
        debug!(
            round = round.round,
            extra_round = round.extra_round,
            written = self.rounds_written,
            "round written"
        );
        Ok(())
    }

    /// Write the end-of-game record. No rounds may follow.
    pub fn finish(&mut self, scores: [i32; NUM_SEATS]) -> Result<(), ReplayError> {
        if self.finished {
            return Err(ReplayError::AlreadyFinished);
        }
        encode_record(&mut self.writer, &Record::End { scores })?;
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of rounds written so far.
    pub fn rounds_written(&self) -> u64 {
        self.rounds_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Write a complete replay: header, every round, and the final scores.
pub fn write_replay<W: Write>(writer: W, replay: &Replay) -> Result<W, ReplayError> {
    let mut w = ReplayWriter::new(writer, &replay.header())?;
    for round in &replay.rounds {
        w.write_round(round)?;
    }
    w.finish(replay.scores)?;
    Ok(w.into_inner())
}
