use glam::IVec2;

/// Which side of a partition line a point lies on. The discriminant doubles
/// as the index into a node's `[right, left]` child and bounding box pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Front
    Right = 0,
    /// Back
    Left = 1,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An infinite line given as a point on it plus a direction. BSP node
/// splitters are stored this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divline {
    pub xy: IVec2,
    pub dxy: IVec2,
}

impl Divline {
    #[inline]
    pub const fn new(xy: IVec2, dxy: IVec2) -> Self {
        Self { xy, dxy }
    }

    /// The raw 2D cross product `(p - xy) x dxy`. Positive is right of the
    /// line when facing along `dxy`, negative is left, zero is on it.
    ///
    /// Worked in `i64` so no query point can overflow it.
    #[inline]
    pub const fn cross(&self, point: IVec2) -> i64 {
        let dx = point.x as i64 - self.xy.x as i64;
        let dy = point.y as i64 - self.xy.y as i64;
        dx * self.dxy.y as i64 - dy * self.dxy.x as i64
    }

    /// Determine which side of the line the point is on. A point exactly on
    /// the line is always `Left`.
    ///
    /// `R_PointOnSide`
    #[inline]
    pub const fn point_on_side(&self, point: IVec2) -> Side {
        if self.cross(point) <= 0 {
            return Side::Left;
        }
        Side::Right
    }
}

#[cfg(test)]
mod tests {
    use super::{Divline, Side};
    use glam::IVec2;

    #[test]
    fn vertical_line_sides() {
        // Line through the origin heading north
        let line = Divline::new(IVec2::new(0, 0), IVec2::new(0, 64));
        assert_eq!(line.point_on_side(IVec2::new(10, 5)), Side::Right);
        assert_eq!(line.point_on_side(IVec2::new(-10, 5)), Side::Left);
    }

    #[test]
    fn horizontal_line_sides() {
        // Heading east, so south is on the right
        let line = Divline::new(IVec2::new(100, 100), IVec2::new(32, 0));
        assert_eq!(line.point_on_side(IVec2::new(0, 50)), Side::Right);
        assert_eq!(line.point_on_side(IVec2::new(0, 150)), Side::Left);
    }

    #[test]
    fn on_line_is_left() {
        let line = Divline::new(IVec2::new(-8, -8), IVec2::new(16, 16));
        assert_eq!(line.cross(IVec2::new(40, 40)), 0);
        assert_eq!(line.point_on_side(IVec2::new(40, 40)), Side::Left);
        // Behind the start point but still on the infinite line
        assert_eq!(line.point_on_side(IVec2::new(-100, -100)), Side::Left);
    }

    #[test]
    fn extreme_points_do_not_overflow() {
        let line = Divline::new(IVec2::new(i16::MIN as i32, 0), IVec2::new(0, i16::MAX as i32));
        assert_eq!(line.point_on_side(IVec2::new(i32::MAX, 0)), Side::Right);
        assert_eq!(line.point_on_side(IVec2::new(i32::MIN, 0)), Side::Left);
    }

    #[test]
    fn side_indexes_children() {
        assert_eq!(Side::Right.index(), 0);
        assert_eq!(Side::Left.index(), 1);
    }
}
