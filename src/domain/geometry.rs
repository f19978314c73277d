//! Geometric types for crop selections and canvas coordinates

/// Point in canvas (viewport) or original-image coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a viewport position to original-image coordinates
    pub fn to_original(self, zoom: f32) -> Point {
        Point {
            x: self.x / zoom,
            y: self.y / zoom,
        }
    }

    /// Convert an original-image position to viewport coordinates
    pub fn to_viewport(self, zoom: f32) -> Point {
        Point {
            x: self.x * zoom,
            y: self.y * zoom,
        }
    }
}

/// Axis-aligned rectangle with position and non-negative size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box spanning two arbitrary corner points
    ///
    /// Dimensions come out non-negative regardless of which corner was the
    /// drag anchor.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (min_x, max_x) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (min_y, max_y) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Scale position and size uniformly (original-to-viewport conversion)
    pub fn scaled(self, factor: f32) -> Rect {
        Rect {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Check whether the rectangle has zero area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_drag_direction() {
        // Dragging up-left from (50,50) to (10,30)
        let rect = Rect::from_corners(Point::new(50.0, 50.0), Point::new(10.0, 30.0));
        assert_eq!(rect, Rect::new(10.0, 30.0, 40.0, 20.0));

        // Same box when dragging down-right
        let rect = Rect::from_corners(Point::new(10.0, 30.0), Point::new(50.0, 50.0));
        assert_eq!(rect, Rect::new(10.0, 30.0, 40.0, 20.0));
    }

    #[test]
    fn test_from_corners_degenerate() {
        let p = Point::new(5.0, 5.0);
        let rect = Rect::from_corners(p, p);
        assert!(rect.is_empty());
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn test_point_coordinate_conversion() {
        let viewport = Point::new(100.0, 50.0);
        let original = viewport.to_original(2.0);
        assert_eq!(original, Point::new(50.0, 25.0));
        assert_eq!(original.to_viewport(2.0), viewport);
    }

    #[test]
    fn test_rect_scaled() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.scaled(0.5), Rect::new(5.0, 10.0, 15.0, 20.0));
    }
}
