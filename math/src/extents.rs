use glam::IVec2;

/// The smallest and the largest corner, combined make up a rectangle
/// enclosing every point it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extents {
    pub min: IVec2,
    pub max: IVec2,
}

impl Extents {
    /// Build the bounds of a set of points. `None` if there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = IVec2>,
    {
        let mut points = points.into_iter();
        // Seed with the first point rather than zero, otherwise a level that
        // sits entirely in negative space would get a max of 0
        let first = points.next()?;
        Some(points.fold(
            Extents {
                min: first,
                max: first,
            },
            |ext, p| Extents {
                min: ext.min.min(p),
                max: ext.max.max(p),
            },
        ))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Inclusive on all edges
    #[inline]
    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
