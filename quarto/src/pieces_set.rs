use std::iter::FusedIterator;

use crate::bitset::bitset_traits;
use crate::Piece;

/// A compact set of [`Piece`]s.
///
/// This is what the pool of pieces that have not been handed out yet is made of.
/// Allows intersection/union/xor with other such sets via bitwise ops, and
/// iterates in ascending [index](Piece::to_index) order.
///
/// ```
/// use quarto::{piece, PiecesSet};
/// let mut set = PiecesSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `PiecesSet`.
/// set = set.insert(piece!("EMIW"));
/// set = set.insert(piece!("EMIW"));  // Inserting a second time has no effect
/// set = set.insert(piece!("CSTP"));
/// assert_eq!(Vec::from_iter(set), vec![piece!("CSTP"), piece!("EMIW")]);
/// ```
///
/// # Note on immutability
///
/// This is an immutable type, so its "mutating" methods return a
/// new value instead of really mutating in-place (except for `std::ops::BitXxxAssign` trait methods).
/// It is also [`Copy`], so a value is not consumed by methods with `self` receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PiecesSet {
    pub(crate) bits: u16,
}

/// Equal to `PiecesSet::from_iter(ALL_PIECES)`.
pub const ALL_PIECES_SET: PiecesSet = PiecesSet { bits: u16::MAX };

impl PiecesSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, piece: Piece) -> bool {
        self.bits & (1u16 << piece.to_index()) != 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, piece: Piece) -> Self {
        Self {
            bits: self.bits | (1u16 << piece.to_index()),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, piece: Piece) -> Self {
        Self {
            bits: self.bits & !(1u16 << piece.to_index()),
        }
    }

    /// The piece at position `index` in iteration order.
    pub fn nth(self, index: usize) -> Option<Piece> {
        self.into_iter().nth(index)
    }
}

bitset_traits!(PiecesSet, u16::MAX);

impl FromIterator<Piece> for PiecesSet {
    fn from_iter<T: IntoIterator<Item = Piece>>(iter: T) -> Self {
        let mut bits = 0;
        for piece in iter {
            bits |= 1u16 << piece.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for PiecesSet {
    type Item = Piece;

    type IntoIter = PiecesSetIter;

    fn into_iter(self) -> Self::IntoIter {
        PiecesSetIter { bits: self.bits }
    }
}

impl std::fmt::Display for PiecesSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, piece) in self.into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", piece)?;
        }
        write!(f, "}}")
    }
}

/// Iterator for a [`PiecesSet`] that returns pieces by ascending index.
#[derive(Clone, Copy, Debug)]
pub struct PiecesSetIter {
    bits: u16,
}

impl Iterator for PiecesSetIter {
    type Item = Piece;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the piece index
            let piece_idx = self.bits.trailing_zeros() as u8;
            // Clear the flag corresponding to this piece index
            self.bits ^= 1u16 << piece_idx;

            Some(Piece::from_index(piece_idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PiecesSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for PiecesSetIter {}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::{piece, ALL_PIECES};

    quickcheck! {
        fn insert_then_contains(set: PiecesSet, piece: Piece) -> bool {
            let set = set.insert(piece);
            set.contains(piece) && !set.remove(piece).contains(piece)
        }

        fn len_matches_iteration(set: PiecesSet) -> bool {
            set.len() == set.into_iter().count()
        }

        fn complement_partitions_catalog(set: PiecesSet) -> bool {
            (set | !set) == ALL_PIECES_SET && (set & !set).is_empty()
        }

        fn nth_follows_ascending_order(set: PiecesSet) -> bool {
            let pieces: Vec<Piece> = set.into_iter().collect();
            pieces.windows(2).all(|w| w[0] < w[1])
                && (0..pieces.len()).all(|i| set.nth(i) == Some(pieces[i]))
                && set.nth(pieces.len()).is_none()
        }
    }

    #[test]
    fn set_constants() {
        assert_eq!(PiecesSet::from_iter(ALL_PIECES), ALL_PIECES_SET);
        assert_eq!(ALL_PIECES_SET.len(), 16);
        assert!(PiecesSet::default().is_empty());
    }

    #[test]
    fn removing_keeps_order_of_the_rest() {
        let pool = ALL_PIECES_SET.remove(ALL_PIECES[3]);
        assert_eq!(pool.nth(2), Some(ALL_PIECES[2]));
        assert_eq!(pool.nth(3), Some(ALL_PIECES[4]));
        assert_eq!(pool.len(), 15);
    }

    #[test]
    fn display() {
        let set = PiecesSet::from_iter([piece!("EMIW"), piece!("CSTP")]);
        assert_eq!(set.to_string(), "{CSTP EMIW}");
    }
}
