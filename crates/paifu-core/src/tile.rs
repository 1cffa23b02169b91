//! Tile kinds, physical tiles, and the compact `1m` / `0p` / `5z` notation.
//!
//! A [`TileKind`] is one of the 34 distinct faces. A [`Tile`] adds the
//! red-five flag, giving 37 distinguishable identities. The codec stores
//! tiles by their id37 (`0..34` plain kinds, `34..37` red 5m/5p/5s).

use std::fmt;
use std::str::FromStr;

use crate::error::ParseTileError;

/// Number of distinct tile kinds.
pub const NUM_KINDS: usize = 34;

/// Number of distinct tile identities including the three red fives.
pub const NUM_IDS: usize = 37;

/// Number of ranks in a numbered suit.
const SUIT_LEN: u8 = 9;

/// First id37 of the red fives.
const RED_BASE: u8 = NUM_KINDS as u8;

// ── Suit ────────────────────────────────────────────────────────

/// The four tile families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// Characters (`m`).
    Man = 0,
    /// Circles (`p`).
    Pin = 1,
    /// Bamboo (`s`).
    Sou = 2,
    /// Winds and dragons (`z`), ranks 1-7.
    Honor = 3,
}

impl Suit {
    /// Kind id of rank 1 in this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        self as u8 * SUIT_LEN
    }

    /// Number of ranks in this suit.
    #[inline]
    pub const fn len(self) -> u8 {
        match self {
            Suit::Honor => 7,
            _ => SUIT_LEN,
        }
    }

    /// Notation letter.
    pub const fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Honor => 'z',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'm' => Some(Suit::Man),
            'p' => Some(Suit::Pin),
            's' => Some(Suit::Sou),
            'z' => Some(Suit::Honor),
            _ => None,
        }
    }
}

// ── TileKind ────────────────────────────────────────────────────

/// A tile face in the range 0-33, ignoring the red-five flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(u8);

impl TileKind {
    /// Creates a kind if `id` is in range 0..34.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < NUM_KINDS {
            Some(TileKind(id))
        } else {
            None
        }
    }

    /// Creates the kind with the given 1-based rank in `suit`.
    pub const fn of(suit: Suit, rank: u8) -> Option<Self> {
        if rank == 0 || rank > suit.len() {
            return None;
        }
        Some(TileKind(suit.start() + rank - 1))
    }

    /// Raw id (0-33).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Which suit this kind belongs to.
    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 / SUIT_LEN {
            0 => Suit::Man,
            1 => Suit::Pin,
            2 => Suit::Sou,
            _ => Suit::Honor,
        }
    }

    /// 1-based rank within the suit.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 % SUIT_LEN + 1
    }

    /// True for the three numbered fives, the only kinds with a red copy.
    #[inline]
    pub const fn has_red(self) -> bool {
        !matches!(self.suit(), Suit::Honor) && self.rank() == 5
    }

    /// The next rank in the same numbered suit.
    pub const fn next(self) -> Option<Self> {
        if matches!(self.suit(), Suit::Honor) || self.rank() == SUIT_LEN {
            None
        } else {
            Some(TileKind(self.0 + 1))
        }
    }

    /// The previous rank in the same numbered suit.
    pub const fn prev(self) -> Option<Self> {
        if matches!(self.suit(), Suit::Honor) || self.rank() == 1 {
            None
        } else {
            Some(TileKind(self.0 - 1))
        }
    }

    /// Iterate over all 34 kinds in id order.
    pub fn all() -> impl Iterator<Item = TileKind> {
        (0..NUM_KINDS as u8).map(TileKind)
    }
}

impl fmt::Debug for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileKind({self})")
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit().letter())
    }
}

// ── Tile ────────────────────────────────────────────────────────

/// A physical tile: a kind plus the red-five flag.
///
/// Equality is exact: a red 5p and a plain 5p are different tiles.
/// Compare [`Tile::kind`] for face equality.
///
/// # Examples
///
/// ```
/// use paifu_core::{Tile, TileKind};
///
/// let red: Tile = "0p".parse().unwrap();
/// let plain: Tile = "5p".parse().unwrap();
/// assert!(red.is_red());
/// assert_ne!(red, plain);
/// assert_eq!(red.kind(), plain.kind());
/// assert_eq!(plain.to_red(), red);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    kind: TileKind,
    red: bool,
}

impl Tile {
    /// A plain (non-red) tile of `kind`.
    #[inline]
    pub const fn new(kind: TileKind) -> Self {
        Tile { kind, red: false }
    }

    /// The face of this tile.
    #[inline]
    pub const fn kind(self) -> TileKind {
        self.kind
    }

    /// True for a red five.
    #[inline]
    pub const fn is_red(self) -> bool {
        self.red
    }

    /// The red copy of this five.
    ///
    /// # Panics
    ///
    /// Panics if the kind has no red copy.
    pub fn to_red(self) -> Self {
        assert!(self.kind.has_red(), "{} has no red copy", self.kind);
        Tile {
            kind: self.kind,
            red: true,
        }
    }

    /// Identity in `0..37`: plain kinds first, then red 5m, 5p, 5s.
    #[inline]
    pub const fn id37(self) -> u8 {
        if self.red {
            RED_BASE + self.kind.suit() as u8
        } else {
            self.kind.0
        }
    }

    /// Inverse of [`Tile::id37`].
    pub const fn from_id37(id: u8) -> Option<Self> {
        if id < RED_BASE {
            Some(Tile::new(TileKind(id)))
        } else if (id as usize) < NUM_IDS {
            let suit = id - RED_BASE;
            Some(Tile {
                kind: TileKind(suit * SUIT_LEN + 4),
                red: true,
            })
        } else {
            None
        }
    }
}

impl From<TileKind> for Tile {
    fn from(kind: TileKind) -> Self {
        Tile::new(kind)
    }
}

// Kind order, with a red five sorted before the plain five of its suit.
impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.kind, !self.red).cmp(&(other.kind, !other.red))
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({self})")
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.red {
            write!(f, "0{}", self.kind.suit().letter())
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl FromStr for Tile {
    type Err = ParseTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(digit), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseTileError::new(s));
        };
        let suit = Suit::from_letter(letter).ok_or_else(|| ParseTileError::new(s))?;
        let rank = digit.to_digit(10).ok_or_else(|| ParseTileError::new(s))? as u8;
        if rank == 0 {
            if suit == Suit::Honor {
                return Err(ParseTileError::new(s));
            }
            let five = TileKind::of(suit, 5).ok_or_else(|| ParseTileError::new(s))?;
            return Ok(Tile::new(five).to_red());
        }
        TileKind::of(suit, rank)
            .map(Tile::new)
            .ok_or_else(|| ParseTileError::new(s))
    }
}

/// Parse a whitespace-separated tile list such as `"1m 2m 0p 5z"`.
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>, ParseTileError> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn kind_classification() {
        let five_m = TileKind::of(Suit::Man, 5).unwrap();
        assert_eq!(five_m.id(), 4);
        assert!(five_m.has_red());
        let white = TileKind::of(Suit::Honor, 5).unwrap();
        assert_eq!(white.suit(), Suit::Honor);
        assert!(!white.has_red());
        assert!(TileKind::of(Suit::Honor, 8).is_none());
        assert!(TileKind::new(34).is_none());
    }

    #[test]
    fn neighbours_stay_in_suit() {
        let nine_m = TileKind::of(Suit::Man, 9).unwrap();
        assert!(nine_m.next().is_none());
        let one_p = TileKind::of(Suit::Pin, 1).unwrap();
        assert!(one_p.prev().is_none());
        assert_eq!(one_p.next(), TileKind::of(Suit::Pin, 2));
        let east = TileKind::of(Suit::Honor, 1).unwrap();
        assert!(east.next().is_none());
    }

    #[test]
    fn red_five_ids() {
        let red_s: Tile = "0s".parse().unwrap();
        assert_eq!(red_s.id37(), 36);
        assert_eq!(Tile::from_id37(36), Some(red_s));
        assert_eq!(Tile::from_id37(37), None);
    }

    #[test]
    fn red_sorts_before_plain() {
        let mut tiles = parse_tiles("6p 5p 0p 4p").unwrap();
        tiles.sort();
        let shown: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
        assert_eq!(shown, ["4p", "0p", "5p", "6p"]);
    }

    #[test]
    fn bad_notation_rejected() {
        for bad in ["", "1", "0z", "8z", "1x", "10m", "mm"] {
            assert!(bad.parse::<Tile>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    #[should_panic(expected = "has no red copy")]
    fn red_of_non_five_panics() {
        let _ = Tile::new(TileKind::new(0).unwrap()).to_red();
    }

    proptest! {
        #[test]
        fn id37_is_a_bijection(id in 0u8..37) {
            let tile = Tile::from_id37(id).unwrap();
            prop_assert_eq!(tile.id37(), id);
            let text = tile.to_string();
            prop_assert_eq!(text.parse::<Tile>().unwrap(), tile);
        }
    }
}
