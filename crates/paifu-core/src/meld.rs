//! Open and concealed tile groups formed by calls.

use smallvec::SmallVec;

use crate::seat::Seat;
use crate::tile::Tile;

/// The five ways a group can be formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeldKind {
    /// A run completed with the left seat's discard.
    Chii,
    /// A triplet completed with another seat's discard.
    Pon,
    /// An open quad completed with another seat's discard.
    Daiminkan,
    /// A concealed quad declared from the hand.
    Ankan,
    /// A pon upgraded with the fourth tile.
    Kakan,
}

/// A displayed group of 3-4 tiles.
///
/// For called groups, `lay` is the slot of the tile that was not
/// self-drawn. For a chii that slot is the called tile's position in the
/// run; for pon and quads it is [`Seat::looks_at`] of the discarder.
/// A concealed quad has no called tile.
///
/// # Examples
///
/// ```
/// use paifu_core::{Meld, MeldKind, Tile};
///
/// let five: Tile = "5p".parse().unwrap();
/// let red = five.to_red();
/// let mut pon = Meld::pon(five, [red, five], 1);
/// assert_eq!(pon.tiles(), &[red, five, five]);
/// assert_eq!(pon.called(), Some(five));
///
/// pon.kakan(five);
/// assert_eq!(pon.kind(), MeldKind::Kakan);
/// assert_eq!(pon.added(), Some(five));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meld {
    kind: MeldKind,
    tiles: SmallVec<[Tile; 4]>,
    lay: Option<usize>,
}

impl Meld {
    fn called_group(kind: MeldKind, called: Tile, others: &[Tile], lay: usize) -> Self {
        assert!(lay < 3, "lay index {lay} out of range");
        let mut tiles: SmallVec<[Tile; 4]> = others.iter().copied().collect();
        tiles.insert(lay, called);
        Self {
            kind,
            tiles,
            lay: Some(lay),
        }
    }

    /// A run; `others` in ascending rank, `called` inserted at `lay`.
    pub fn chii(called: Tile, others: [Tile; 2], lay: usize) -> Self {
        Self::called_group(MeldKind::Chii, called, &others, lay)
    }

    /// A triplet with `called` inserted at `lay`.
    pub fn pon(called: Tile, others: [Tile; 2], lay: usize) -> Self {
        Self::called_group(MeldKind::Pon, called, &others, lay)
    }

    /// An open quad with `called` inserted at `lay`.
    pub fn daiminkan(called: Tile, others: [Tile; 3], lay: usize) -> Self {
        Self::called_group(MeldKind::Daiminkan, called, &others, lay)
    }

    /// A concealed quad.
    pub fn ankan(tiles: [Tile; 4]) -> Self {
        Self {
            kind: MeldKind::Ankan,
            tiles: SmallVec::from_buf(tiles),
            lay: None,
        }
    }

    /// Upgrade a pon in place by adding its fourth tile at slot 3.
    ///
    /// # Panics
    ///
    /// Panics if this meld is not a pon of `added`'s kind.
    pub fn kakan(&mut self, added: Tile) {
        assert_eq!(self.kind, MeldKind::Pon, "kakan on a non-pon meld");
        assert_eq!(
            self.tiles[0].kind(),
            added.kind(),
            "kakan tile does not match the pon"
        );
        self.tiles.push(added);
        self.kind = MeldKind::Kakan;
    }

    /// How the group was formed.
    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    /// Tiles in display order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Slot of the called tile, `None` for a concealed quad.
    pub fn lay(&self) -> Option<usize> {
        self.lay
    }

    /// The tile taken from another seat.
    pub fn called(&self) -> Option<Tile> {
        self.lay.map(|i| self.tiles[i])
    }

    /// The fourth tile of a quad (the tile a robbing win claims).
    pub fn added(&self) -> Option<Tile> {
        self.tiles.get(3).copied()
    }

    /// True for the three quad kinds.
    pub fn is_quad(&self) -> bool {
        self.tiles.len() == 4
    }

    /// The seat the called tile came from, given the meld's owner.
    pub fn source(&self, owner: Seat) -> Option<Seat> {
        match (self.kind, self.lay) {
            (MeldKind::Ankan, _) | (_, None) => None,
            (MeldKind::Chii, _) => Some(owner.left()),
            (_, Some(0)) => Some(owner.left()),
            (_, Some(1)) => Some(owner.cross()),
            (_, Some(_)) => Some(owner.right()),
        }
    }

    /// Tiles sorted by identity, for layout-independent comparison.
    pub fn sorted_tiles(&self) -> SmallVec<[Tile; 4]> {
        let mut tiles = self.tiles.clone();
        tiles.sort();
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;

    fn tiles(s: &str) -> Vec<Tile> {
        parse_tiles(s).unwrap()
    }

    #[test]
    fn chii_places_called_tile_at_lay() {
        let t = tiles("3s 4s 0s");
        let meld = Meld::chii(t[1], [t[0], t[2]], 1);
        assert_eq!(meld.tiles(), &[t[0], t[1], t[2]]);
        assert_eq!(meld.called(), Some(t[1]));
        let owner = Seat::new(2).unwrap();
        assert_eq!(meld.source(owner), Some(owner.left()));
    }

    #[test]
    fn daiminkan_source_follows_lay() {
        let t = tiles("7z 7z 7z 7z");
        let owner = Seat::new(0).unwrap();
        for (lay, from) in [(0, owner.left()), (1, owner.cross()), (2, owner.right())] {
            let meld = Meld::daiminkan(t[0], [t[1], t[2], t[3]], lay);
            assert_eq!(meld.source(owner), Some(from));
            assert!(meld.is_quad());
        }
    }

    #[test]
    fn ankan_has_no_source() {
        let t = tiles("0m 5m 5m 5m");
        let meld = Meld::ankan([t[0], t[1], t[2], t[3]]);
        assert_eq!(meld.called(), None);
        assert_eq!(meld.source(Seat::new(1).unwrap()), None);
        assert_eq!(meld.added(), Some(t[3]));
    }

    #[test]
    #[should_panic(expected = "kakan on a non-pon meld")]
    fn kakan_requires_pon() {
        let t = tiles("1m 2m 3m");
        let mut meld = Meld::chii(t[0], [t[1], t[2]], 0);
        meld.kakan(t[0]);
    }
}
