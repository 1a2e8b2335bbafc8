use wayfarer_core::Point;

/// Grid movement model.
///
/// Neighbors are always enumerated in the same order: up, right, down,
/// left, then (for [`Connectivity::Eight`]) up-right, down-right,
/// down-left, up-left. Searches break cost ties by this order, so it is
/// what makes path choice deterministic among equal-cost alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Cardinal moves only.
    #[default]
    Four,
    /// Cardinal and diagonal moves.
    Eight,
}

const OFFSETS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

impl Connectivity {
    /// Step offsets in enumeration order.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Four => &OFFSETS[..4],
            Self::Eight => &OFFSETS,
        }
    }

    /// Whether `a` and `b` are neighbors under this model.
    #[inline]
    pub fn are_adjacent(self, a: Point, b: Point) -> bool {
        match self {
            Self::Four => (a.x - b.x).abs() + (a.y - b.y).abs() == 1,
            Self::Eight => a.is_adjacent_to(b),
        }
    }

    /// Push the neighbors of `p` for which `keep` returns `true`.
    #[inline]
    pub fn neighbors(self, p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
        for &d in self.offsets() {
            let n = p + d;
            if keep(n) {
                buf.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_way_order_is_up_right_down_left() {
        let mut buf = Vec::new();
        Connectivity::Four.neighbors(Point::new(5, 5), &mut buf, |_| true);
        assert_eq!(
            buf,
            vec![
                Point::new(5, 4),
                Point::new(6, 5),
                Point::new(5, 6),
                Point::new(4, 5),
            ]
        );
    }

    #[test]
    fn eight_way_appends_diagonals() {
        let mut buf = Vec::new();
        Connectivity::Eight.neighbors(Point::new(1, 1), &mut buf, |_| true);
        assert_eq!(buf.len(), 8);
        assert_eq!(&buf[..4], &[
            Point::new(1, 0),
            Point::new(2, 1),
            Point::new(1, 2),
            Point::new(0, 1),
        ]);
        assert_eq!(buf[4], Point::new(2, 0));
        assert_eq!(buf[7], Point::new(0, 0));
    }

    #[test]
    fn keep_filters() {
        let mut buf = Vec::new();
        Connectivity::Eight.neighbors(Point::new(0, 0), &mut buf, |p| p.x >= 0 && p.y >= 0);
        assert_eq!(buf, vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]);
    }

    #[test]
    fn adjacency() {
        let a = Point::new(2, 2);
        assert!(Connectivity::Four.are_adjacent(a, Point::new(2, 3)));
        assert!(!Connectivity::Four.are_adjacent(a, Point::new(3, 3)));
        assert!(Connectivity::Eight.are_adjacent(a, Point::new(3, 3)));
        assert!(!Connectivity::Eight.are_adjacent(a, a));
    }
}
