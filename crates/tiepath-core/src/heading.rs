//! Cardinal facing directions.

use std::fmt;

use crate::geom::Point;

/// One of the four cardinal directions on a grid.
///
/// Y grows downward, so [`Heading::North`] is `(0, -1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// All headings in clockwise order starting at north.
    pub const ALL: [Heading; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::East => Point::new(1, 0),
            Self::South => Point::new(0, 1),
            Self::West => Point::new(-1, 0),
        }
    }

    /// Heading after a quarter turn clockwise.
    #[inline]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Heading after a quarter turn counter-clockwise.
    #[inline]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    #[inline]
    pub const fn reverse(self) -> Self {
        self.clockwise().clockwise()
    }

    /// Arrow glyph used on directional keypads (`^`, `>`, `v`, `<`).
    pub const fn arrow(self) -> char {
        match self {
            Self::North => '^',
            Self::East => '>',
            Self::South => 'v',
            Self::West => '<',
        }
    }

    /// Inverse of [`arrow`](Self::arrow).
    pub fn from_arrow(ch: char) -> Option<Self> {
        match ch {
            '^' => Some(Self::North),
            '>' => Some(Self::East),
            'v' => Some(Self::South),
            '<' => Some(Self::West),
            _ => None,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_are_inverse() {
        for h in Heading::ALL {
            assert_eq!(h.clockwise().counter_clockwise(), h);
            assert_eq!(h.reverse().reverse(), h);
            assert_eq!(h.delta() + h.reverse().delta(), Point::new(0, 0));
        }
    }

    #[test]
    fn four_clockwise_turns_is_identity() {
        let h = Heading::East;
        assert_eq!(h.clockwise().clockwise().clockwise().clockwise(), h);
        assert_eq!(h.clockwise(), Heading::South);
    }

    #[test]
    fn arrows() {
        for h in Heading::ALL {
            assert_eq!(Heading::from_arrow(h.arrow()), Some(h));
        }
        assert_eq!(Heading::from_arrow('A'), None);
        assert_eq!(Heading::North.delta(), Point::new(0, -1));
    }
}
