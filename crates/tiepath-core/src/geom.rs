//! Grid cells and grid extents: [`Point`] and [`Bounds`].

use std::fmt;
use std::ops::{Add, Sub};

/// A grid cell. X grows right, Y grows down, as in the text the grid was
/// read from.
///
/// Points order row by row (`y` first, then `x`), so a sorted list of cells
/// reads like the map itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point `dx` columns and `dy` rows away.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Up, right, down and left neighbours, in that order.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [self.shift(0, -1), self.shift(1, 0), self.shift(0, 1), self.shift(-1, 0)]
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.shift(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.shift(-rhs.x, -rhs.y)
    }
}

/// Extent of a grid anchored at `(0, 0)`: cells with `0 <= x < width` and
/// `0 <= y < height`.
///
/// Negative dimensions are clamped to zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width > 0 { width } else { 0 },
            height: if height > 0 { height } else { 0 },
        }
    }

    #[inline]
    pub const fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> i32 {
        self.height
    }

    /// `(width, height)` as a point.
    #[inline]
    pub const fn size(self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub const fn contains(self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Row-major index of `p`, or `None` outside the grid.
    #[inline]
    pub const fn index(self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Every cell, row by row.
    #[inline]
    pub fn iter(self) -> Cells {
        Cells {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Point;
    type IntoIter = Cells;
    #[inline]
    fn into_iter(self) -> Cells {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major iterator over the cells of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct Cells {
    bounds: Bounds,
    next: usize,
}

impl Iterator for Cells {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let w = self.bounds.width as usize;
        let p = Point::new((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bounds.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cells {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a.shift(-1, 1), Point::new(0, 3));
        assert_eq!(
            Point::new(0, 0).neighbors_4(),
            [Point::new(0, -1), Point::new(1, 0), Point::new(0, 1), Point::new(-1, 0)]
        );
    }

    #[test]
    fn point_orders_row_major() {
        let mut pts = vec![Point::new(2, 0), Point::new(0, 1), Point::new(1, 0)];
        pts.sort();
        assert_eq!(pts, [Point::new(1, 0), Point::new(2, 0), Point::new(0, 1)]);
    }

    #[test]
    fn bounds_contain_and_index() {
        let b = Bounds::new(3, 2);
        assert_eq!(b.len(), 6);
        assert!(b.contains(Point::new(2, 1)));
        assert!(!b.contains(Point::new(3, 0)));
        assert!(!b.contains(Point::new(0, -1)));
        assert_eq!(b.index(Point::new(0, 1)), Some(3));
        assert_eq!(b.index(Point::new(2, 1)), Some(5));
        assert_eq!(b.index(Point::new(0, 2)), None);
    }

    #[test]
    fn cells_are_row_major() {
        let b = Bounds::new(3, 2);
        let cells: Vec<_> = b.iter().collect();
        assert_eq!(b.iter().len(), 6);
        assert_eq!(cells[0], Point::new(0, 0));
        assert_eq!(cells[3], Point::new(0, 1));
        assert_eq!(cells[5], Point::new(2, 1));
        for (i, p) in cells.iter().enumerate() {
            assert_eq!(b.index(*p), Some(i));
        }
    }

    #[test]
    fn negative_size_is_empty() {
        let b = Bounds::new(-4, 3);
        assert!(b.is_empty());
        assert_eq!(b, Bounds::new(0, 3));
        assert_eq!(b.iter().count(), 0);
        assert_eq!(b.to_string(), "0x3");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::new(-3, 12);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"x":-3,"y":12}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
