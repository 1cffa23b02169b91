//! Seat positions around the table.

use std::fmt;

/// Number of seats at the table.
pub const NUM_SEATS: usize = 4;

/// One of the four player positions, ordered cyclically.
///
/// "Right" is the next seat in turn order; the seat on the left is the
/// one a chii is called from.
///
/// # Examples
///
/// ```
/// use paifu_core::Seat;
///
/// let s0 = Seat::new(0).unwrap();
/// assert_eq!(s0.right().index(), 1);
/// assert_eq!(s0.left().index(), 3);
/// // A tile taken from the seat on the left is laid at slot 0.
/// assert_eq!(s0.looks_at(s0.left()), 0);
/// assert_eq!(s0.looks_at(s0.cross()), 1);
/// assert_eq!(s0.looks_at(s0.right()), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seat(u8);

impl Seat {
    /// All seats in index order.
    pub const ALL: [Seat; NUM_SEATS] = [Seat(0), Seat(1), Seat(2), Seat(3)];

    /// Creates a seat if `index` is in range 0..4.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_SEATS {
            Some(Seat(index))
        } else {
            None
        }
    }

    /// Zero-based index, suitable for per-seat arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next seat in turn order.
    #[inline]
    pub const fn right(self) -> Self {
        Seat((self.0 + 1) % NUM_SEATS as u8)
    }

    /// The seat opposite.
    #[inline]
    pub const fn cross(self) -> Self {
        Seat((self.0 + 2) % NUM_SEATS as u8)
    }

    /// The previous seat in turn order.
    #[inline]
    pub const fn left(self) -> Self {
        Seat((self.0 + 3) % NUM_SEATS as u8)
    }

    /// Lay slot of a tile taken from `target`: 0 left, 1 across, 2 right.
    ///
    /// # Panics
    ///
    /// Panics if `target` is this seat.
    pub fn looks_at(self, target: Seat) -> usize {
        assert_ne!(self, target, "a seat cannot take a tile from itself");
        (self.index() + 3 - target.index()) % NUM_SEATS
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

impl From<Seat> for usize {
    fn from(seat: Seat) -> Self {
        seat.index()
    }
}
