//! Binary encode/decode for the replay format.
//!
//! All integers are little-endian. Lists are prefixed with a `u32`
//! length, strings with a `u32` byte length. Tiles are stored as their
//! id37 byte, so the red-five flag survives the round trip wherever the
//! log carries one.

use std::io::{ErrorKind, Read, Write};

use paifu_core::{RoundResult, Rule, Seat, Tile, TileKind, WinForm, NUM_SEATS};

use crate::error::ReplayError;
use crate::hash::rule_hash;
use crate::types::*;
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), ReplayError> {
    write_u32_le(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

/// Write a tile as its id37 byte.
pub fn write_tile(w: &mut dyn Write, tile: Tile) -> Result<(), ReplayError> {
    write_u8(w, tile.id37())
}

/// Write a length-prefixed tile list.
pub fn write_tiles(w: &mut dyn Write, tiles: &[Tile]) -> Result<(), ReplayError> {
    write_u32_le(w, tiles.len() as u32)?;
    for &tile in tiles {
        write_tile(w, tile)?;
    }
    Ok(())
}

fn write_bool(w: &mut dyn Write, v: bool) -> Result<(), ReplayError> {
    write_u8(w, u8::from(v))
}

fn write_points(w: &mut dyn Write, points: &[i32; NUM_SEATS]) -> Result<(), ReplayError> {
    for &p in points {
        write_i32_le(w, p)?;
    }
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ReplayError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, ReplayError> {
    let len = read_u32_le(r)?;
    let mut buf = Vec::new();
    Read::take(&mut *r, u64::from(len)).read_to_end(&mut buf)?;
    if buf.len() != len as usize {
        return Err(ReplayError::Io(ErrorKind::UnexpectedEof.into()));
    }
    String::from_utf8(buf).map_err(|e| ReplayError::MalformedRecord {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

/// Read a tile from its id37 byte.
pub fn read_tile(r: &mut dyn Read) -> Result<Tile, ReplayError> {
    let id = read_u8(r)?;
    Tile::from_id37(id).ok_or_else(|| ReplayError::MalformedRecord {
        detail: format!("tile id {id} out of range"),
    })
}

/// Read a length-prefixed tile list.
pub fn read_tiles(r: &mut dyn Read) -> Result<Vec<Tile>, ReplayError> {
    let len = read_u32_le(r)? as usize;
    // A corrupt length must not turn into a huge allocation.
    let mut tiles = Vec::with_capacity(len.min(256));
    for _ in 0..len {
        tiles.push(read_tile(r)?);
    }
    Ok(tiles)
}

fn read_bool(r: &mut dyn Read, what: &str) -> Result<bool, ReplayError> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        flag => Err(ReplayError::MalformedRecord {
            detail: format!("invalid {what} flag: {flag}"),
        }),
    }
}

fn read_seat(r: &mut dyn Read) -> Result<Seat, ReplayError> {
    let id = read_u8(r)?;
    Seat::new(id).ok_or_else(|| ReplayError::MalformedRecord {
        detail: format!("seat {id} out of range"),
    })
}

fn read_points(r: &mut dyn Read) -> Result<[i32; NUM_SEATS], ReplayError> {
    let mut points = [0; NUM_SEATS];
    for p in &mut points {
        *p = read_i32_le(r)?;
    }
    Ok(points)
}

fn read_len(r: &mut dyn Read) -> Result<usize, ReplayError> {
    Ok(read_u32_le(r)? as usize)
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode a rule's switches.
pub fn encode_rule(w: &mut dyn Write, rule: &Rule) -> Result<(), ReplayError> {
    for &reds in &rule.red_fives {
        write_u8(w, reds)?;
    }
    write_bool(w, rule.ura_dora)?;
    write_bool(w, rule.kan_dora)?;
    write_i32_le(w, rule.initial_points)?;
    write_i32_le(w, rule.riichi_stake)?;
    Ok(())
}

/// Decode a rule's switches without validating them.
pub fn decode_rule(r: &mut dyn Read) -> Result<Rule, ReplayError> {
    let mut red_fives = [0u8; 3];
    for reds in &mut red_fives {
        *reds = read_u8(r)?;
    }
    Ok(Rule {
        red_fives,
        ura_dora: read_bool(r, "ura_dora")?,
        kan_dora: read_bool(r, "kan_dora")?,
        initial_points: read_i32_le(r)?,
        riichi_stake: read_i32_le(r)?,
    })
}

/// Encode the stream header (magic, version, replay-level fields).
pub fn encode_header(w: &mut dyn Write, header: &ReplayHeader) -> Result<(), ReplayError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    for &girl in &header.girls {
        write_u32_le(w, girl)?;
    }
    write_points(w, &header.init_points)?;
    write_u64_le(w, header.seed)?;
    encode_rule(w, &header.rule)?;
    write_u64_le(w, rule_hash(&header.rule))?;
    Ok(())
}

/// Decode and validate the stream header.
///
/// Returns the header and the rule hash it was written with.
pub fn decode_header(r: &mut dyn Read) -> Result<(ReplayHeader, u64), ReplayError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReplayError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: version });
    }

    let mut girls = [0u32; NUM_SEATS];
    for girl in &mut girls {
        *girl = read_u32_le(r)?;
    }
    let init_points = read_points(r)?;
    let seed = read_u64_le(r)?;
    let rule = decode_rule(r)?;
    let recorded_hash = read_u64_le(r)?;
    if recorded_hash != rule_hash(&rule) {
        return Err(ReplayError::MalformedRecord {
            detail: "rule hash does not match the encoded rule".into(),
        });
    }
    rule.validate()?;

    Ok((
        ReplayHeader {
            girls,
            init_points,
            seed,
            rule,
        },
        recorded_hash,
    ))
}

// ── Action encode/decode ────────────────────────────────────────

/// Encode one incoming action.
pub fn encode_in(w: &mut dyn Write, act: InAct) -> Result<(), ReplayError> {
    match act {
        InAct::Draw(tile) => {
            write_u8(w, IN_DRAW)?;
            write_tile(w, tile)
        }
        InAct::Chii { side, red_five } => {
            let tag = match side {
                ChiiSide::Left => IN_CHII_LEFT,
                ChiiSide::Middle => IN_CHII_MIDDLE,
                ChiiSide::Right => IN_CHII_RIGHT,
            };
            write_u8(w, tag)?;
            write_bool(w, red_five)
        }
        InAct::Pon { red_fives } => {
            write_u8(w, IN_PON)?;
            write_u8(w, red_fives)
        }
        InAct::Daiminkan => write_u8(w, IN_DAIMINKAN),
        InAct::Ron => write_u8(w, IN_RON),
        InAct::SkipIn => write_u8(w, IN_SKIP),
    }
}

/// Decode one incoming action.
pub fn decode_in(r: &mut dyn Read) -> Result<InAct, ReplayError> {
    let tag = read_u8(r)?;
    let side = match tag {
        IN_CHII_LEFT => Some(ChiiSide::Left),
        IN_CHII_MIDDLE => Some(ChiiSide::Middle),
        IN_CHII_RIGHT => Some(ChiiSide::Right),
        _ => None,
    };
    if let Some(side) = side {
        let red_five = read_bool(r, "chii red five")?;
        return Ok(InAct::Chii { side, red_five });
    }
    match tag {
        IN_DRAW => Ok(InAct::Draw(read_tile(r)?)),
        IN_PON => {
            let red_fives = read_u8(r)?;
            if red_fives > 2 {
                return Err(ReplayError::MalformedRecord {
                    detail: format!("pon with {red_fives} red fives from hand"),
                });
            }
            Ok(InAct::Pon { red_fives })
        }
        IN_DAIMINKAN => Ok(InAct::Daiminkan),
        IN_RON => Ok(InAct::Ron),
        IN_SKIP => Ok(InAct::SkipIn),
        tag => Err(ReplayError::UnknownTag {
            context: "incoming action",
            tag,
        }),
    }
}

/// Encode one outgoing action.
pub fn encode_out(w: &mut dyn Write, act: OutAct) -> Result<(), ReplayError> {
    match act {
        OutAct::Discard(tile) => {
            write_u8(w, OUT_DISCARD)?;
            write_tile(w, tile)
        }
        OutAct::DiscardDrawn => write_u8(w, OUT_DISCARD_DRAWN),
        OutAct::RiichiDiscard(tile) => {
            write_u8(w, OUT_RIICHI_DISCARD)?;
            write_tile(w, tile)
        }
        OutAct::RiichiDiscardDrawn => write_u8(w, OUT_RIICHI_DISCARD_DRAWN),
        OutAct::Ankan(kind) => {
            write_u8(w, OUT_ANKAN)?;
            write_u8(w, kind.id())
        }
        OutAct::Kakan(tile) => {
            write_u8(w, OUT_KAKAN)?;
            write_tile(w, tile)
        }
        OutAct::Ryuukyoku => write_u8(w, OUT_RYUUKYOKU),
        OutAct::Tsumo => write_u8(w, OUT_TSUMO),
        OutAct::SkipOut => write_u8(w, OUT_SKIP),
    }
}

/// Decode one outgoing action.
pub fn decode_out(r: &mut dyn Read) -> Result<OutAct, ReplayError> {
    match read_u8(r)? {
        OUT_DISCARD => Ok(OutAct::Discard(read_tile(r)?)),
        OUT_DISCARD_DRAWN => Ok(OutAct::DiscardDrawn),
        OUT_RIICHI_DISCARD => Ok(OutAct::RiichiDiscard(read_tile(r)?)),
        OUT_RIICHI_DISCARD_DRAWN => Ok(OutAct::RiichiDiscardDrawn),
        OUT_ANKAN => {
            let id = read_u8(r)?;
            let kind = TileKind::new(id).ok_or_else(|| ReplayError::MalformedRecord {
                detail: format!("ankan kind {id} out of range"),
            })?;
            Ok(OutAct::Ankan(kind))
        }
        OUT_KAKAN => Ok(OutAct::Kakan(read_tile(r)?)),
        OUT_RYUUKYOKU => Ok(OutAct::Ryuukyoku),
        OUT_TSUMO => Ok(OutAct::Tsumo),
        OUT_SKIP => Ok(OutAct::SkipOut),
        tag => Err(ReplayError::UnknownTag {
            context: "outgoing action",
            tag,
        }),
    }
}

fn result_tag(result: RoundResult) -> u8 {
    RoundResult::ALL
        .iter()
        .position(|&r| r == result)
        .map_or(0, |i| i as u8)
}

fn result_from_tag(tag: u8) -> Result<RoundResult, ReplayError> {
    RoundResult::ALL
        .get(tag as usize)
        .copied()
        .ok_or(ReplayError::UnknownTag {
            context: "round result",
            tag,
        })
}

// ── Record encode/decode ────────────────────────────────────────

/// Encode one round (without the record tag).
pub fn encode_round(w: &mut dyn Write, round: &Round) -> Result<(), ReplayError> {
    write_u8(w, round.round)?;
    write_u8(w, round.extra_round)?;
    write_u8(w, round.dealer.index() as u8)?;
    write_bool(w, round.all_last)?;
    write_u32_le(w, round.deposit)?;
    write_u64_le(w, round.seed)?;
    write_u8(w, round.die1)?;
    write_u8(w, round.die2)?;
    write_tiles(w, &round.drids)?;
    write_tiles(w, &round.urids)?;

    for track in &round.tracks {
        write_tiles(w, &track.init)?;
        write_u32_le(w, track.ins.len() as u32)?;
        for &act in &track.ins {
            encode_in(w, act)?;
        }
        write_u32_le(w, track.outs.len() as u32)?;
        for &act in &track.outs {
            encode_out(w, act)?;
        }
    }

    write_u8(w, result_tag(round.result))?;
    write_u32_le(w, round.forms.len() as u32)?;
    for form in &round.forms {
        write_length_prefixed_str(w, &form.spell)?;
        write_length_prefixed_str(w, &form.charge)?;
    }
    write_points(w, &round.result_points)?;
    Ok(())
}

/// Decode one round (after its record tag).
pub fn decode_round(r: &mut dyn Read) -> Result<Round, ReplayError> {
    let number = read_u8(r)?;
    let extra_round = read_u8(r)?;
    let dealer = read_seat(r)?;
    let all_last = read_bool(r, "all_last")?;
    let deposit = read_u32_le(r)?;
    let seed = read_u64_le(r)?;
    let mut round = Round::new(number, extra_round, dealer, all_last, deposit, seed);
    round.die1 = read_u8(r)?;
    round.die2 = read_u8(r)?;
    round.drids = read_tiles(r)?;
    round.urids = read_tiles(r)?;

    for (seat, track) in round.tracks.iter_mut().enumerate() {
        track.init = read_tiles(r)?;
        if track.init.len() != HAND_SIZE {
            return Err(ReplayError::MalformedRecord {
                detail: format!("seat {seat} dealt {} tiles", track.init.len()),
            });
        }
        let ins = read_len(r)?;
        track.ins.reserve(ins.min(256));
        for _ in 0..ins {
            track.ins.push(decode_in(r)?);
        }
        let outs = read_len(r)?;
        track.outs.reserve(outs.min(256));
        for _ in 0..outs {
            track.outs.push(decode_out(r)?);
        }
    }

    round.result = result_from_tag(read_u8(r)?)?;
    let forms = read_len(r)?;
    for _ in 0..forms {
        let spell = read_length_prefixed_str(r)?;
        let charge = read_length_prefixed_str(r)?;
        round.forms.push(WinForm::new(spell, charge));
    }
    round.result_points = read_points(r)?;
    Ok(round)
}

/// Encode a tagged record.
pub fn encode_record(w: &mut dyn Write, record: &Record) -> Result<(), ReplayError> {
    match record {
        Record::Round(round) => {
            write_u8(w, RECORD_ROUND)?;
            encode_round(w, round)
        }
        Record::End { scores } => {
            write_u8(w, RECORD_END)?;
            write_points(w, scores)
        }
    }
}

/// Decode a tagged record.
///
/// Returns `Ok(None)` on clean EOF (no bytes available before the tag),
/// `Ok(Some(record))` on success, or an error on truncated/corrupt data.
pub fn decode_record(r: &mut dyn Read) -> Result<Option<Record>, ReplayError> {
    let mut tag = [0u8; 1];
    loop {
        match r.read(&mut tag) {
            Ok(0) => return Ok(None),
            Ok(_) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReplayError::Io(e)),
        }
    }
    match tag[0] {
        RECORD_ROUND => Ok(Some(Record::Round(decode_round(r)?))),
        RECORD_END => Ok(Some(Record::End {
            scores: read_points(r)?,
        })),
        tag => Err(ReplayError::UnknownTag {
            context: "record",
            tag,
        }),
    }
}
