//! Hashing utilities for snapshot and rule comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they are used for quick equality checks
//! between reconstructions and to detect a rule mismatch before replay.

use paifu_core::{Meld, MeldKind, Rule, Tile};

use crate::snap::TableSnap;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a u32 (as 4 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Feed a length-prefixed tile list into an FNV-1a hash state.
fn fnv1a_tiles(mut hash: u64, tiles: &[Tile]) -> u64 {
    hash = fnv1a_u32(hash, tiles.len() as u32);
    for tile in tiles {
        hash = fnv1a_byte(hash, tile.id37());
    }
    hash
}

fn fnv1a_meld(mut hash: u64, meld: &Meld) -> u64 {
    let kind = match meld.kind() {
        MeldKind::Chii => 0,
        MeldKind::Pon => 1,
        MeldKind::Daiminkan => 2,
        MeldKind::Ankan => 3,
        MeldKind::Kakan => 4,
    };
    hash = fnv1a_byte(hash, kind);
    hash = fnv1a_byte(hash, meld.lay().map_or(u8::MAX, |l| l as u8));
    fnv1a_tiles(hash, meld.tiles())
}

/// Compute a hash over the visible state of a snapshot.
///
/// Covers per-seat hands, rivers, melds and riichi markers, the held
/// drawn tile, points, wall count, indicators and the end-of-round
/// flag. The seat index is folded in at seat boundaries so seat order
/// matters.
pub fn snap_hash(snap: &TableSnap) -> u64 {
    let mut hash = FNV_OFFSET;

    for (i, seat) in snap.seats.iter().enumerate() {
        hash = fnv1a_u32(hash, i as u32);
        hash = fnv1a_tiles(hash, &seat.hand);
        hash = fnv1a_tiles(hash, &seat.river);
        hash = fnv1a_u32(hash, seat.melds.len() as u32);
        for meld in &seat.melds {
            hash = fnv1a_meld(hash, meld);
        }
        hash = fnv1a_byte(hash, u8::from(seat.riichi_bar));
        hash = fnv1a_u32(hash, seat.riichi_pos.map_or(u32::MAX, |p| p as u32));
        hash = fnv1a_u32(hash, snap.points[i] as u32);
    }

    match snap.drawn {
        Some((holder, tile)) => {
            hash = fnv1a_byte(hash, holder.index() as u8);
            hash = fnv1a_byte(hash, tile.id37());
        }
        None => hash = fnv1a_byte(hash, u8::MAX),
    }
    hash = fnv1a_u32(hash, snap.wall_remain as u32);
    hash = fnv1a_tiles(hash, &snap.drids);
    hash = fnv1a_tiles(hash, &snap.urids);
    fnv1a_byte(hash, u8::from(snap.end_of_round))
}

/// Compute a hash over a rule's switches.
///
/// Stored in the stream header and compared against the current rule
/// before a replay is trusted.
pub fn rule_hash(rule: &Rule) -> u64 {
    let mut hash = FNV_OFFSET;
    for &reds in &rule.red_fives {
        hash = fnv1a_byte(hash, reds);
    }
    hash = fnv1a_byte(hash, u8::from(rule.ura_dora));
    hash = fnv1a_byte(hash, u8::from(rule.kan_dora));
    hash = fnv1a_u32(hash, rule.initial_points as u32);
    fnv1a_u32(hash, rule.riichi_stake as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Round;
    use paifu_core::{parse_tiles, Seat};

    fn snap() -> TableSnap {
        let round = Round::new(0, 0, Seat::new(0).unwrap(), false, 0, 1);
        let mut snap = TableSnap::start(&round, [25000; 4], 70);
        snap.seats[0].hand = parse_tiles("1m 2m 3m").unwrap();
        snap
    }

    #[test]
    fn same_state_same_hash() {
        assert_eq!(snap_hash(&snap()), snap_hash(&snap()));
    }

    #[test]
    fn red_five_changes_hash() {
        let mut a = snap();
        let mut b = snap();
        a.seats[1].river = parse_tiles("5p").unwrap();
        b.seats[1].river = parse_tiles("0p").unwrap();
        assert_ne!(snap_hash(&a), snap_hash(&b));
    }

    #[test]
    fn seat_order_matters() {
        let mut a = snap();
        let mut b = snap();
        a.seats[2].river = parse_tiles("1z").unwrap();
        b.seats[3].river = parse_tiles("1z").unwrap();
        assert_ne!(snap_hash(&a), snap_hash(&b));
    }

    #[test]
    fn drawn_holder_matters() {
        let tile = "7s".parse().unwrap();
        let mut a = snap();
        let mut b = snap();
        a.drawn = Some((Seat::new(0).unwrap(), tile));
        b.drawn = Some((Seat::new(1).unwrap(), tile));
        assert_ne!(snap_hash(&a), snap_hash(&b));
    }

    #[test]
    fn rule_hash_sensitive_to_each_switch() {
        let base = Rule::default();
        let variants = [
            Rule {
                red_fives: [0, 1, 1],
                ..base.clone()
            },
            Rule {
                ura_dora: false,
                ..base.clone()
            },
            Rule {
                kan_dora: false,
                ..base.clone()
            },
            Rule {
                initial_points: 30000,
                ..base.clone()
            },
            Rule {
                riichi_stake: 1500,
                ..base.clone()
            },
        ];
        for rule in &variants {
            assert_ne!(rule_hash(rule), rule_hash(&base), "{rule:?}");
        }
    }
}
