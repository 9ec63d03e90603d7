//! Geometric primitives for board layout and label placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in image space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! fenboard uses the raster coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the board at `(0, 0)`
//! - **X-axis**: Increases rightward, from the a-file towards the h-file when unflipped
//! - **Y-axis**: Increases downward, from rank 8 towards rank 1 when unflipped
//!
//! Coordinates may be negative: coordinate labels placed outside the board
//! (for example to the left of the a-file) live at negative x.

/// A 2D point representing a position in image space.
///
/// # Examples
///
/// ```
/// # use fenboard_core::geometry::Point;
/// let origin = Point::new(100.0, 200.0);
/// let offset = Point::new(5.0, -5.0);
///
/// let moved = origin.add_point(offset);
/// assert_eq!(moved.x(), 105.0);
/// assert_eq!(moved.y(), 195.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Rounds both coordinates to the nearest whole pixel.
    pub fn round(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    /// Creates bounds of the given size with this point as the top-left corner
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// A width and height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fenboard_core::geometry::{Bounds, Point, Size};
    /// let board = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(800.0, 800.0));
    /// let label = Bounds::new_from_top_left(Point::new(-20.0, 40.0), Size::new(10.0, 20.0));
    ///
    /// let combined = board.merge(&label);
    /// assert_eq!(combined.min_x(), -20.0);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.max_x(), 800.0);
    /// assert_eq!(combined.max_y(), 800.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_add() {
        let p = Point::new(10.0, 20.0);
        let sum = p.add_point(Point::new(2.5, -4.0));
        assert_approx_eq!(f32, sum.x(), 12.5);
        assert_approx_eq!(f32, sum.y(), 16.0);
    }

    #[test]
    fn test_point_round() {
        assert_eq!(Point::new(1.4, 1.6).round(), (1, 2));
        assert_eq!(Point::new(-1.6, -0.4).round(), (-2, 0));
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Point::new(5.0, 10.0).to_bounds(Size::new(20.0, 30.0));
        assert_approx_eq!(f32, bounds.min_x(), 5.0);
        assert_approx_eq!(f32, bounds.min_y(), 10.0);
        assert_approx_eq!(f32, bounds.max_x(), 25.0);
        assert_approx_eq!(f32, bounds.max_y(), 40.0);
    }

    #[test]
    fn test_bounds_merge_with_label_left_of_board() {
        let board = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(80.0, 80.0));
        let label = Point::new(-6.5, 72.0).to_bounds(Size::new(5.0, 6.0));

        let merged = board.merge(&label);
        assert_approx_eq!(f32, merged.min_x(), -6.5);
        assert_approx_eq!(f32, merged.min_y(), 0.0);
        assert_approx_eq!(f32, merged.max_x(), 80.0);
        assert_approx_eq!(f32, merged.max_y(), 80.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    /// The merged bounds must contain the corners of both inputs.
    fn check_merge_contains_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        for bounds in [a, b] {
            prop_assert!(merged.min_x() <= bounds.min_x() && merged.min_y() <= bounds.min_y());
            prop_assert!(merged.max_x() >= bounds.max_x() && merged.max_y() >= bounds.max_y());
        }
        Ok(())
    }

    /// Merging is commutative.
    fn check_merge_is_commutative(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.merge(&b), b.merge(&a));
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_contains_both(a, b)?;
        }

        #[test]
        fn merge_is_commutative(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_is_commutative(a, b)?;
        }
    }
}
