//! Snapshot comparison against the live table or another snapshot.
//!
//! [`compare_snap`] checks a reconstruction against the live engine's
//! own state, field by field. [`compare_snaps`] compares two
//! reconstructions hash-first and only walks the fields on mismatch.

use paifu_core::{Meld, Seat, TableView, Tile};

use crate::hash::snap_hash;
use crate::snap::TableSnap;

/// What differed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Closed hands differ.
    Hand {
        /// Reconstructed hand.
        replayed: Vec<Tile>,
        /// Reference hand.
        live: Vec<Tile>,
    },
    /// Held drawn tiles differ.
    Drawn {
        /// Reconstructed drawn tile.
        replayed: Option<Tile>,
        /// Reference drawn tile.
        live: Option<Tile>,
    },
    /// Rivers differ.
    River {
        /// Reconstructed river.
        replayed: Vec<Tile>,
        /// Reference river.
        live: Vec<Tile>,
    },
    /// Meld lists differ in kind, called slot, called tile or tiles.
    Melds {
        /// Reconstructed melds.
        replayed: Vec<Meld>,
        /// Reference melds.
        live: Vec<Meld>,
    },
    /// Point totals differ.
    Points {
        /// Reconstructed points.
        replayed: i32,
        /// Reference points.
        live: i32,
    },
    /// Revealed dora indicators differ.
    DoraIndicators {
        /// Reconstructed indicators.
        replayed: Vec<Tile>,
        /// Reference indicators.
        live: Vec<Tile>,
    },
    /// Revealed closing indicators differ.
    UraIndicators {
        /// Reconstructed indicators.
        replayed: Vec<Tile>,
        /// Reference indicators.
        live: Vec<Tile>,
    },
    /// Snapshot hashes differ without any of the fields above differing
    /// (wall count, riichi markers or the end-of-round flag).
    Hash {
        /// Hash of the reconstructed snapshot.
        replayed: u64,
        /// Hash of the reference snapshot.
        live: u64,
    },
}

/// A single divergence, attributed to a seat where it belongs to one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// The seat whose state differs, `None` for table-wide state.
    pub seat: Option<Seat>,
    /// What differed.
    pub kind: DivergenceKind,
}

/// Every divergence found in one comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivergenceReport {
    /// Round number of the reconstructed snapshot.
    pub round: u8,
    /// Repeat counter of the reconstructed snapshot.
    pub extra_round: u8,
    /// All divergences found.
    pub divergences: Vec<Divergence>,
}

/// One side of a seat comparison.
struct SeatSide<'a> {
    hand: &'a [Tile],
    drawn: Option<Tile>,
    river: &'a [Tile],
    melds: &'a [Meld],
    points: i32,
}

fn same_meld(a: &Meld, b: &Meld) -> bool {
    a.kind() == b.kind()
        && a.lay() == b.lay()
        && a.called() == b.called()
        && a.sorted_tiles() == b.sorted_tiles()
}

fn diff_seat(out: &mut Vec<Divergence>, seat: Seat, replayed: SeatSide<'_>, live: SeatSide<'_>) {
    let mut push = |kind| {
        out.push(Divergence {
            seat: Some(seat),
            kind,
        })
    };
    if replayed.hand != live.hand {
        push(DivergenceKind::Hand {
            replayed: replayed.hand.to_vec(),
            live: live.hand.to_vec(),
        });
    }
    if replayed.drawn != live.drawn {
        push(DivergenceKind::Drawn {
            replayed: replayed.drawn,
            live: live.drawn,
        });
    }
    if replayed.river != live.river {
        push(DivergenceKind::River {
            replayed: replayed.river.to_vec(),
            live: live.river.to_vec(),
        });
    }
    let melds_match = replayed.melds.len() == live.melds.len()
        && replayed
            .melds
            .iter()
            .zip(live.melds)
            .all(|(a, b)| same_meld(a, b));
    if !melds_match {
        push(DivergenceKind::Melds {
            replayed: replayed.melds.to_vec(),
            live: live.melds.to_vec(),
        });
    }
    if replayed.points != live.points {
        push(DivergenceKind::Points {
            replayed: replayed.points,
            live: live.points,
        });
    }
}

fn diff_indicators(out: &mut Vec<Divergence>, replayed: &TableSnap, dora: &[Tile], ura: &[Tile]) {
    if replayed.drids != dora {
        out.push(Divergence {
            seat: None,
            kind: DivergenceKind::DoraIndicators {
                replayed: replayed.drids.clone(),
                live: dora.to_vec(),
            },
        });
    }
    if replayed.urids != ura {
        out.push(Divergence {
            seat: None,
            kind: DivergenceKind::UraIndicators {
                replayed: replayed.urids.clone(),
                live: ura.to_vec(),
            },
        });
    }
}

fn report(snap: &TableSnap, divergences: Vec<Divergence>) -> Option<DivergenceReport> {
    if divergences.is_empty() {
        return None;
    }
    Some(DivergenceReport {
        round: snap.round,
        extra_round: snap.extra_round,
        divergences,
    })
}

/// Compare a reconstruction against the live table's current state.
///
/// Hands are compared as sorted listings, rivers and melds in order,
/// melds by kind, called slot, called tile and tile multiset. Returns
/// `None` if nothing differs.
pub fn compare_snap(replayed: &TableSnap, live: &dyn TableView) -> Option<DivergenceReport> {
    let mut divergences = Vec::new();
    let points = live.points();
    for seat in Seat::ALL {
        let s = &replayed[seat];
        let mut live_hand = live.closed_hand(seat);
        live_hand.sort();
        diff_seat(
            &mut divergences,
            seat,
            SeatSide {
                hand: &s.hand,
                drawn: replayed.drawn_by(seat),
                river: &s.river,
                melds: &s.melds,
                points: replayed.points[seat.index()],
            },
            SeatSide {
                hand: &live_hand,
                drawn: live.drawn(seat),
                river: live.river(seat),
                melds: live.melds(seat),
                points: points[seat.index()],
            },
        );
    }
    diff_indicators(
        &mut divergences,
        replayed,
        live.dora_indicators(),
        live.ura_indicators(),
    );
    report(replayed, divergences)
}

/// Compare two reconstructions.
///
/// Fast path: if the snapshot hashes match, returns `None`. On mismatch,
/// walks the per-seat fields to say what differs.
pub fn compare_snaps(replayed: &TableSnap, reference: &TableSnap) -> Option<DivergenceReport> {
    let replayed_hash = snap_hash(replayed);
    let reference_hash = snap_hash(reference);
    if replayed_hash == reference_hash {
        return None;
    }

    let mut divergences = Vec::new();
    for seat in Seat::ALL {
        let i = seat.index();
        diff_seat(
            &mut divergences,
            seat,
            SeatSide {
                hand: &replayed.seats[i].hand,
                drawn: replayed.drawn_by(seat),
                river: &replayed.seats[i].river,
                melds: &replayed.seats[i].melds,
                points: replayed.points[i],
            },
            SeatSide {
                hand: &reference.seats[i].hand,
                drawn: reference.drawn_by(seat),
                river: &reference.seats[i].river,
                melds: &reference.seats[i].melds,
                points: reference.points[i],
            },
        );
    }
    diff_indicators(&mut divergences, replayed, &reference.drids, &reference.urids);
    if divergences.is_empty() {
        divergences.push(Divergence {
            seat: None,
            kind: DivergenceKind::Hash {
                replayed: replayed_hash,
                live: reference_hash,
            },
        });
    }
    report(replayed, divergences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Round;
    use paifu_core::parse_tiles;

    fn seat(i: u8) -> Seat {
        Seat::new(i).unwrap()
    }

    fn snap() -> TableSnap {
        let round = Round::new(2, 1, seat(2), false, 0, 9);
        let mut snap = TableSnap::start(&round, [25000; 4], 70);
        snap.seats[1].hand = parse_tiles("1m 2m 3m 0p").unwrap();
        snap.seats[1].river = parse_tiles("9s 1z").unwrap();
        snap
    }

    #[test]
    fn identical_snaps_have_no_report() {
        assert!(compare_snaps(&snap(), &snap()).is_none());
    }

    #[test]
    fn red_five_difference_reported_on_the_right_seat() {
        let mut other = snap();
        other.seats[1].hand = parse_tiles("1m 2m 3m 5p").unwrap();
        let report = compare_snaps(&snap(), &other).unwrap();
        assert_eq!(report.round, 2);
        assert_eq!(report.extra_round, 1);
        assert_eq!(report.divergences.len(), 1);
        assert_eq!(report.divergences[0].seat, Some(seat(1)));
        assert!(matches!(
            report.divergences[0].kind,
            DivergenceKind::Hand { .. }
        ));
    }

    #[test]
    fn melds_compare_by_content_not_order_of_hand_tiles() {
        let t = parse_tiles("5p 0p 5p").unwrap();
        let a = Meld::pon(t[0], [t[1], t[2]], 1);
        let b = Meld::pon(t[0], [t[2], t[1]], 1);
        assert!(same_meld(&a, &b));
        let c = Meld::pon(t[0], [t[1], t[2]], 2);
        assert!(!same_meld(&a, &c));
    }

    #[test]
    fn hidden_field_difference_falls_back_to_hash() {
        let mut other = snap();
        other.wall_remain -= 1;
        let report = compare_snaps(&snap(), &other).unwrap();
        assert!(matches!(
            report.divergences[..],
            [Divergence {
                seat: None,
                kind: DivergenceKind::Hash { .. }
            }]
        ));
    }

    #[test]
    fn indicator_difference_is_table_wide() {
        let mut a = snap();
        let mut b = snap();
        a.drids = parse_tiles("1z").unwrap();
        b.drids = parse_tiles("1z 2z").unwrap();
        let report = compare_snaps(&a, &b).unwrap();
        assert_eq!(report.divergences[0].seat, None);
        assert!(matches!(
            report.divergences[0].kind,
            DivergenceKind::DoraIndicators { .. }
        ));
    }
}
