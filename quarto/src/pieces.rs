use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the 16 Quarto pieces.
///
/// A piece is one combination of the four two-valued [attributes](Attribute).
/// No two pieces of the [catalog](ALL_PIECES) share all four values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub pastry: Pastry,
    pub flavor: Flavor,
    pub collection: Collection,
    pub topping: Topping,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Pastry {
    Croissant,
    Eclair,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Flavor {
    Strawberry,
    Matcha,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Collection {
    Traditional,
    Indulging,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Topping {
    PowderSugar,
    WhippedCream,
}

/// The four kinds of attributes that distinguish pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Attribute {
    Pastry,
    Flavor,
    Collection,
    Topping,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Pastry,
        Attribute::Flavor,
        Attribute::Collection,
        Attribute::Topping,
    ];

    /// The bit holding this attribute in [`Piece::to_index()`].
    pub const fn bit(self) -> u8 {
        match self {
            Attribute::Pastry => 0b1000,
            Attribute::Flavor => 0b0100,
            Attribute::Collection => 0b0010,
            Attribute::Topping => 0b0001,
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Attribute::Pastry => "pastry",
            Attribute::Flavor => "flavor",
            Attribute::Collection => "collection",
            Attribute::Topping => "topping",
        };
        write!(f, "{}", name)
    }
}

/// All pieces, in ascending [index](Piece::to_index) order.
pub static ALL_PIECES: [Piece; 16] = catalog();

const fn catalog() -> [Piece; 16] {
    let mut pieces = [Piece::from_index(0); 16];
    let mut idx = 0;
    while idx < 16 {
        pieces[idx] = Piece::from_index(idx as u8);
        idx += 1;
    }
    pieces
}

impl Piece {
    /// The inverse of [`Self::to_index()`]. Only the low four bits are used.
    pub const fn from_index(idx: u8) -> Self {
        Piece {
            pastry: if idx & Attribute::Pastry.bit() == 0 {
                Pastry::Croissant
            } else {
                Pastry::Eclair
            },
            flavor: if idx & Attribute::Flavor.bit() == 0 {
                Flavor::Strawberry
            } else {
                Flavor::Matcha
            },
            collection: if idx & Attribute::Collection.bit() == 0 {
                Collection::Traditional
            } else {
                Collection::Indulging
            },
            topping: if idx & Attribute::Topping.bit() == 0 {
                Topping::PowderSugar
            } else {
                Topping::WhippedCream
            },
        }
    }

    /// A number in `0..16`, with one bit per attribute.
    pub const fn to_index(self) -> u8 {
        (self.pastry as u8) << 3
            | (self.flavor as u8) << 2
            | (self.collection as u8) << 1
            | self.topping as u8
    }

    /// The value of one attribute, either 0 or 1.
    pub fn attribute(self, attribute: Attribute) -> u8 {
        u8::from(self.to_index() & attribute.bit() != 0)
    }

    /// A piece whose attributes are each drawn independently and uniformly.
    ///
    /// This may well be a piece that is already on the board.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut idx = 0;
        for attribute in Attribute::ALL {
            if rng.gen::<bool>() {
                idx |= attribute.bit();
            }
        }
        Piece::from_index(idx)
    }

    /// The four-letter code of this piece, see [`piece!`](crate::piece).
    pub fn code(self) -> [char; 4] {
        [
            match self.pastry {
                Pastry::Croissant => 'C',
                Pastry::Eclair => 'E',
            },
            match self.flavor {
                Flavor::Strawberry => 'S',
                Flavor::Matcha => 'M',
            },
            match self.collection {
                Collection::Traditional => 'T',
                Collection::Indulging => 'I',
            },
            match self.topping {
                Topping::PowderSugar => 'P',
                Topping::WhippedCream => 'W',
            },
        ]
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.code() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The attributes on which all four pieces agree.
///
/// A line of four pieces is a winning line iff this is nonempty.
pub fn common_attributes(pieces: &[Piece; 4]) -> impl Iterator<Item = Attribute> {
    let first = pieces[0].to_index();
    let differing = pieces
        .iter()
        .fold(0u8, |acc, piece| acc | (piece.to_index() ^ first));
    Attribute::ALL
        .into_iter()
        .filter(move |attribute| differing & attribute.bit() == 0)
}

/// The error type for the [`FromStr`] instance of [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceFromStrErr {
    LessThanFourChars,
    MoreThanFourChars,
    InvalidPastry(char),
    InvalidFlavor(char),
    InvalidCollection(char),
    InvalidTopping(char),
}

impl std::error::Error for PieceFromStrErr {}

impl std::fmt::Display for PieceFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceFromStrErr::LessThanFourChars => write!(f, "A piece code needs four characters"),
            PieceFromStrErr::MoreThanFourChars => write!(f, "A piece code has only four characters"),
            PieceFromStrErr::InvalidPastry(c) => write!(f, "'{}' is not a pastry, expected C or E", c),
            PieceFromStrErr::InvalidFlavor(c) => write!(f, "'{}' is not a flavor, expected S or M", c),
            PieceFromStrErr::InvalidCollection(c) => {
                write!(f, "'{}' is not a collection, expected T or I", c)
            }
            PieceFromStrErr::InvalidTopping(c) => write!(f, "'{}' is not a topping, expected P or W", c),
        }
    }
}

impl FromStr for Piece {
    type Err = PieceFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let mut next = || chars.next().ok_or(PieceFromStrErr::LessThanFourChars);
        let pastry = match next()? {
            'C' => Pastry::Croissant,
            'E' => Pastry::Eclair,
            c => return Err(PieceFromStrErr::InvalidPastry(c)),
        };
        let flavor = match next()? {
            'S' => Flavor::Strawberry,
            'M' => Flavor::Matcha,
            c => return Err(PieceFromStrErr::InvalidFlavor(c)),
        };
        let collection = match next()? {
            'T' => Collection::Traditional,
            'I' => Collection::Indulging,
            c => return Err(PieceFromStrErr::InvalidCollection(c)),
        };
        let topping = match next()? {
            'P' => Topping::PowderSugar,
            'W' => Topping::WhippedCream,
            c => return Err(PieceFromStrErr::InvalidTopping(c)),
        };
        if chars.next().is_some() {
            return Err(PieceFromStrErr::MoreThanFourChars);
        }
        Ok(Piece {
            pastry,
            flavor,
            collection,
            topping,
        })
    }
}

/// Shorthand for creating pieces from a four-character code.
///
/// One letter per attribute, in this order: pastry (`C`roissant or `E`clair),
/// flavor (`S`trawberry or `M`atcha), collection (`T`raditional or `I`ndulging),
/// topping (`P`owder sugar or `W`hipped cream).
///
/// This macro is just calling the [`FromStr`] instance of [`Piece`].
/// ```
/// # use quarto::{piece, Collection, Flavor, Pastry, Piece, Topping};
/// assert_eq!(
///     piece!("EMTW"),
///     Piece {
///         pastry: Pastry::Eclair,
///         flavor: Flavor::Matcha,
///         collection: Collection::Traditional,
///         topping: Topping::WhippedCream,
///     }
/// );
/// ```
#[macro_export]
macro_rules! piece {
    ($code:literal) => {
        <$crate::Piece as std::str::FromStr>::from_str($code)
            .expect("Invalid piece code given to piece! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use piece;
