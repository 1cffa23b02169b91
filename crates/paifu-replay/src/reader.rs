//! Replay stream reader.
//!
//! [`ReplayReader`] reads rounds from any `Read` source, decoding the
//! binary replay format. The header is validated on construction.

use std::io::Read;

use paifu_core::{Rule, NUM_SEATS};

use crate::codec::{decode_header, decode_record};
use crate::error::ReplayError;
use crate::hash::rule_hash;
use crate::types::{Record, Replay, ReplayHeader, Round};

/// Reads replay data from a byte stream.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`. A stream that ends without an
/// end-of-game record is a game still in progress, not an error.
pub struct ReplayReader<R: Read> {
    reader: R,
    header: ReplayHeader,
    rule_hash: u64,
    rounds_read: u64,
    scores: Option<[i32; NUM_SEATS]>,
}

impl<R: Read> ReplayReader<R> {
    /// Open a replay stream, reading and validating the header.
    pub fn open(mut reader: R) -> Result<Self, ReplayError> {
        let (header, rule_hash) = decode_header(&mut reader)?;
        Ok(Self {
            reader,
            header,
            rule_hash,
            rounds_read: 0,
            scores: None,
        })
    }

    /// Replay-level fields from the header.
    pub fn header(&self) -> &ReplayHeader {
        &self.header
    }

    /// Check that the replay was recorded under `current`.
    pub fn verify_rule(&self, current: &Rule) -> Result<(), ReplayError> {
        let current = rule_hash(current);
        if current != self.rule_hash {
            return Err(ReplayError::RuleMismatch {
                recorded: self.rule_hash,
                current,
            });
        }
        Ok(())
    }

    /// Read the next round, or `None` once the stream is exhausted or
    /// the end-of-game record has been read.
    pub fn next_round(&mut self) -> Result<Option<Round>, ReplayError> {
        if self.scores.is_some() {
            return Ok(None);
        }
        match decode_record(&mut self.reader)? {
            Some(Record::Round(round)) => {
                self.rounds_read += 1;
                Ok(Some(round))
            }
            Some(Record::End { scores }) => {
                self.scores = Some(scores);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Number of rounds read so far.
    pub fn rounds_read(&self) -> u64 {
        self.rounds_read
    }

    /// Final scores, once the end-of-game record has been read.
    pub fn scores(&self) -> Option<[i32; NUM_SEATS]> {
        self.scores
    }

    /// Convert into a round iterator.
    pub fn rounds(self) -> RoundIter<R> {
        RoundIter {
            inner: self,
            done: false,
        }
    }
}

/// Iterator adapter over replay rounds.
pub struct RoundIter<R: Read> {
    inner: ReplayReader<R>,
    done: bool,
}

impl<R: Read> RoundIter<R> {
    /// Final scores, once the iterator has consumed the end-of-game record.
    pub fn scores(&self) -> Option<[i32; NUM_SEATS]> {
        self.inner.scores
    }
}

impl<R: Read> Iterator for RoundIter<R> {
    type Item = Result<Round, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next_round() {
            Ok(Some(round)) => Some(Ok(round)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read a whole replay stream into memory.
pub fn read_replay<R: Read>(reader: R) -> Result<Replay, ReplayError> {
    let reader = ReplayReader::open(reader)?;
    let mut replay = Replay::from_header(reader.header().clone());
    let mut rounds = reader.rounds();
    for round in rounds.by_ref() {
        replay.rounds.push(round?);
    }
    if let Some(scores) = rounds.scores() {
        replay.scores = scores;
    }
    Ok(replay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_header, encode_record};
    use crate::writer::{write_replay, ReplayWriter};
    use paifu_core::{parse_tiles, Seat};

    fn header() -> ReplayHeader {
        ReplayHeader {
            girls: [1, 2, 3, 4],
            init_points: [25000; 4],
            seed: 42,
            rule: Rule::default(),
        }
    }

    fn round(n: u8) -> Round {
        let mut round = Round::new(n, 0, Seat::new(n % 4).unwrap(), false, 0, u64::from(n));
        for track in &mut round.tracks {
            track.init = parse_tiles("1m 2m 3m 4m 5m 6m 7m 8m 9m 1p 2p 3p 4p").unwrap();
        }
        round.result_points = [25000 + i32::from(n), 25000, 25000, 25000 - i32::from(n)];
        round
    }

    #[test]
    fn roundtrip_write_read_rounds() {
        let mut buf = Vec::new();
        let mut writer = ReplayWriter::new(&mut buf, &header()).unwrap();
        for n in 0..5 {
            writer.write_round(&round(n)).unwrap();
        }
        writer.finish([30, 10, -10, -30]).unwrap();
        assert_eq!(writer.rounds_written(), 5);
        drop(writer);

        let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
        assert_eq!(reader.header(), &header());
        for n in 0..5 {
            assert_eq!(reader.next_round().unwrap(), Some(round(n)));
        }
        assert!(reader.next_round().unwrap().is_none());
        assert_eq!(reader.rounds_read(), 5);
        assert_eq!(reader.scores(), Some([30, 10, -10, -30]));
    }

    #[test]
    fn unfinished_stream_reads_as_in_progress() {
        let mut buf = Vec::new();
        let mut writer = ReplayWriter::new(&mut buf, &header()).unwrap();
        writer.write_round(&round(0)).unwrap();
        drop(writer);

        let replay = read_replay(buf.as_slice()).unwrap();
        assert_eq!(replay.rounds.len(), 1);
        assert_eq!(replay.scores, [0; 4]);
    }

    #[test]
    fn read_replay_matches_written_replay() {
        let mut replay = Replay::from_header(header());
        replay.rounds = (0..3).map(round).collect();
        replay.scores = [1, 2, 3, 4];
        let buf = write_replay(Vec::new(), &replay).unwrap();
        assert_eq!(read_replay(buf.as_slice()).unwrap(), replay);
    }

    #[test]
    fn records_after_end_are_not_read() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        encode_record(&mut buf, &Record::End { scores: [0; 4] }).unwrap();
        encode_record(&mut buf, &Record::Round(round(9))).unwrap();

        let mut rounds = ReplayReader::open(buf.as_slice()).unwrap().rounds();
        assert!(rounds.next().is_none());
        assert!(rounds.next().is_none());
        assert_eq!(rounds.scores(), Some([0; 4]));
    }

    #[test]
    fn writing_after_finish_is_rejected() {
        let mut writer = ReplayWriter::new(Vec::new(), &header()).unwrap();
        writer.finish([0; 4]).unwrap();
        assert!(matches!(
            writer.write_round(&round(0)),
            Err(ReplayError::AlreadyFinished)
        ));
        assert!(matches!(
            writer.finish([0; 4]),
            Err(ReplayError::AlreadyFinished)
        ));
    }

    #[test]
    fn rule_mismatch_detected() {
        let buf = write_replay(Vec::new(), &Replay::from_header(header())).unwrap();
        let reader = ReplayReader::open(buf.as_slice()).unwrap();
        assert!(reader.verify_rule(&Rule::default()).is_ok());
        let other = Rule {
            kan_dora: false,
            ..Rule::default()
        };
        assert!(matches!(
            reader.verify_rule(&other),
            Err(ReplayError::RuleMismatch { .. })
        ));
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut buf = Vec::new();
        let mut writer = ReplayWriter::new(&mut buf, &header()).unwrap();
        writer.write_round(&round(0)).unwrap();
        writer.write_round(&round(1)).unwrap();
        drop(writer);
        buf.truncate(buf.len() - 3);

        let results: Vec<_> = ReplayReader::open(buf.as_slice()).unwrap().rounds().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
