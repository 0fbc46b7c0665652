use tiepath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric() {
        let a = Point::new(1, 5);
        let b = Point::new(-2, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(manhattan(b, a), 5);
        assert_eq!(manhattan(a, a), 0);
    }
}
