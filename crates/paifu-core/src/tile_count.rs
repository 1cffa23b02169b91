//! Exact tile multiset keyed by id37.

use crate::tile::{Tile, TileKind, NUM_IDS};

/// A multiset of physical tiles.
///
/// Counts are kept per id37, so red and plain fives are tracked
/// separately while [`TileCount::count_kind`] sums both.
///
/// # Examples
///
/// ```
/// use paifu_core::{parse_tiles, TileCount};
///
/// let hand: TileCount = parse_tiles("5p 5p 0p 1z").unwrap().into_iter().collect();
/// let red = "0p".parse().unwrap();
/// assert_eq!(hand.count(red), 1);
/// assert_eq!(hand.count_kind(red.kind()), 3);
/// assert_eq!(hand.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileCount {
    counts: [u8; NUM_IDS],
}

impl TileCount {
    /// An empty multiset.
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_IDS],
        }
    }

    /// Adjust the count of `tile` by `delta`.
    ///
    /// # Panics
    ///
    /// Panics if the count would go negative or above four copies.
    pub fn inc(&mut self, tile: Tile, delta: i32) {
        let slot = &mut self.counts[tile.id37() as usize];
        let next = i32::from(*slot) + delta;
        assert!(
            (0..=4).contains(&next),
            "count of {tile} would become {next}"
        );
        *slot = next as u8;
    }

    /// Add one copy of `tile`.
    pub fn add(&mut self, tile: Tile) {
        self.inc(tile, 1);
    }

    /// Remove one copy of `tile`.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not present.
    pub fn remove(&mut self, tile: Tile) {
        self.inc(tile, -1);
    }

    /// Copies of exactly `tile` (red and plain fives are distinct).
    pub fn count(&self, tile: Tile) -> u8 {
        self.counts[tile.id37() as usize]
    }

    /// Copies of `kind`, red fives included.
    pub fn count_kind(&self, kind: TileKind) -> u8 {
        let plain = self.count(Tile::new(kind));
        if kind.has_red() {
            plain + self.count(Tile::new(kind).to_red())
        } else {
            plain
        }
    }

    /// True if at least one copy of exactly `tile` is present.
    pub fn contains(&self, tile: Tile) -> bool {
        self.count(tile) > 0
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// True if no tiles are present.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Sorted listing: kind order, red fives before plain fives.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut out = Vec::with_capacity(self.len());
        for kind in TileKind::all() {
            let plain = Tile::new(kind);
            if kind.has_red() {
                let red = plain.to_red();
                out.extend(std::iter::repeat(red).take(self.count(red) as usize));
            }
            out.extend(std::iter::repeat(plain).take(self.count(plain) as usize));
        }
        out
    }
}

impl Default for TileCount {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Tile> for TileCount {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut count = TileCount::new();
        count.extend(iter);
        count
    }
}

impl Extend<Tile> for TileCount {
    fn extend<I: IntoIterator<Item = Tile>>(&mut self, iter: I) {
        for tile in iter {
            self.add(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;
    use proptest::prelude::*;

    #[test]
    fn listing_is_sorted_with_red_first() {
        let count: TileCount = parse_tiles("5m 3s 0m 1m 5m").unwrap().into_iter().collect();
        let shown: Vec<String> = count.tiles().iter().map(|t| t.to_string()).collect();
        assert_eq!(shown, ["1m", "0m", "5m", "5m", "3s"]);
    }

    #[test]
    fn remove_tracks_exact_identity() {
        let mut count: TileCount = parse_tiles("0p 5p").unwrap().into_iter().collect();
        count.remove("5p".parse().unwrap());
        assert!(count.contains("0p".parse().unwrap()));
        assert!(!count.contains("5p".parse().unwrap()));
        assert_eq!(count.len(), 1);
    }

    #[test]
    #[should_panic(expected = "would become -1")]
    fn removing_absent_tile_panics() {
        let mut count = TileCount::new();
        count.remove("1z".parse().unwrap());
    }

    proptest! {
        #[test]
        fn listing_preserves_length(ids in prop::collection::vec(0u8..34, 0..14)) {
            let mut count = TileCount::new();
            let mut added = 0;
            for id in ids {
                let tile = Tile::from_id37(id).unwrap();
                if count.count(tile) < 4 {
                    count.add(tile);
                    added += 1;
                }
            }
            prop_assert_eq!(count.len(), added);
            prop_assert_eq!(count.tiles().len(), added);
        }
    }
}
