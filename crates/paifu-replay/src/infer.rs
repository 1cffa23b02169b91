//! Re-derivation of call and quad tiles from the compact log.
//!
//! The log stores only the called tile's side and a red-five hint for
//! calls, and only the kind for concealed quads. The exact tiles are
//! recovered here. When red fives are involved they always occupy the
//! earliest slots among the hand-supplied tiles.

use paifu_core::{Tile, TileCount, TileKind};

use crate::types::ChiiSide;

/// The two hand tiles of a chii, in ascending rank.
///
/// # Panics
///
/// Panics if the run would leave the suit, or if `red_five` is set but
/// neither hand tile is a five.
pub fn chii_others(called: Tile, side: ChiiSide, red_five: bool) -> [Tile; 2] {
    let k = called.kind();
    let kinds = match side {
        ChiiSide::Left => (k.next(), k.next().and_then(|n| n.next())),
        ChiiSide::Middle => (k.prev(), k.next()),
        ChiiSide::Right => (k.prev().and_then(|p| p.prev()), k.prev()),
    };
    let (Some(low), Some(high)) = kinds else {
        panic!("chii {side:?} on {called} leaves the suit");
    };
    let mut others = [Tile::new(low), Tile::new(high)];
    if red_five {
        let slot = others
            .iter()
            .position(|t| t.kind().has_red())
            .unwrap_or_else(|| panic!("red five hint on chii of {called} without a five"));
        others[slot] = others[slot].to_red();
    }
    others
}

/// The two hand tiles of a pon, red fives first.
///
/// # Panics
///
/// Panics if `red_fives` exceeds 2 or the kind has no red copy.
pub fn pon_others(called: Tile, red_fives: u8) -> [Tile; 2] {
    assert!(red_fives <= 2, "pon cannot hold {red_fives} red fives from hand");
    let plain = Tile::new(called.kind());
    let mut others = [plain; 2];
    for slot in others.iter_mut().take(red_fives as usize) {
        *slot = plain.to_red();
    }
    others
}

/// The three hand tiles of an open quad, red fives first.
///
/// The red count is read from the caller's hand as it stands before
/// the call.
///
/// # Panics
///
/// Panics unless the hand holds exactly three tiles of the called kind.
pub fn daiminkan_others(called: Tile, hand: &TileCount) -> [Tile; 3] {
    let kind = called.kind();
    let held = hand.count_kind(kind);
    assert_eq!(held, 3, "daiminkan of {called} with {held} in hand");
    let plain = Tile::new(kind);
    let reds = if kind.has_red() {
        hand.count(plain.to_red())
    } else {
        0
    };
    let mut others = [plain; 3];
    for slot in others.iter_mut().take(reds as usize) {
        *slot = plain.to_red();
    }
    others
}

/// Tiles of a concealed quad and where they came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnkanTiles {
    /// The four tiles, red fives first among the hand tiles.
    pub tiles: [Tile; 4],
    /// True if the fourth tile is the held drawn tile.
    pub uses_drawn: bool,
}

/// The tiles of a concealed quad of `kind`.
///
/// Four copies in the closed hand take precedence; otherwise three
/// hand copies plus the held `drawn` tile are used, the drawn tile in
/// slot 3.
///
/// # Panics
///
/// Panics if neither source adds up to four copies.
pub fn ankan_tiles(kind: TileKind, hand: &TileCount, drawn: Option<Tile>) -> AnkanTiles {
    let plain = Tile::new(kind);
    let reds = if kind.has_red() {
        hand.count(plain.to_red()) as usize
    } else {
        0
    };
    let mut tiles = [plain; 4];
    for slot in tiles.iter_mut().take(reds) {
        *slot = plain.to_red();
    }
    match hand.count_kind(kind) {
        4 => AnkanTiles {
            tiles,
            uses_drawn: false,
        },
        3 => {
            let drawn = match drawn {
                Some(d) if d.kind() == kind => d,
                other => panic!("ankan of {kind} needs the drawn tile, holding {other:?}"),
            };
            tiles[3] = drawn;
            AnkanTiles {
                tiles,
                uses_drawn: true,
            }
        }
        held => panic!("ankan of {kind} with {held} in hand"),
    }
}
