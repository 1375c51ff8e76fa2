use serde::{Deserialize, Serialize};

// ===== POINT =====

/// Pointer position or top-left corner, in viewport (client) coordinates
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`
    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

// ===== SIZE =====

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grows each dimension up to `min` if it is smaller
    pub fn at_least(self, min: Size) -> Size {
        Size::new(self.width.max(min.width), self.height.max(min.height))
    }
}

// ===== RECT =====

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Same rect expressed in a coordinate space whose origin sits at `origin`
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect::from_origin(self.origin().offset_from(origin), self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_from_subtracts_components() {
        let pointer = Point::new(130.0, 75.5);
        let corner = Point::new(100.0, 50.0);
        assert_eq!(pointer.offset_from(corner), Point::new(30.0, 25.5));
    }

    #[test]
    fn at_least_only_grows() {
        let min = Size::new(1.0, 1.0);
        assert_eq!(Size::new(0.0, 40.0).at_least(min), Size::new(1.0, 40.0));
        assert_eq!(Size::new(200.0, 0.5).at_least(min), Size::new(200.0, 1.0));
        assert_eq!(Size::new(20.0, 30.0).at_least(min), Size::new(20.0, 30.0));
    }

    #[test]
    fn relative_to_keeps_size() {
        let rect = Rect::new(250.0, 140.0, 80.0, 20.0);
        let relative = rect.relative_to(Point::new(200.0, 100.0));
        assert_eq!(relative, Rect::new(50.0, 40.0, 80.0, 20.0));
        assert_eq!(relative.right(), 130.0);
        assert_eq!(relative.bottom(), 60.0);
    }

    #[test]
    fn rect_serializes_with_css_names() {
        let json = serde_json::to_value(Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json["left"], 1.0);
        assert_eq!(json["top"], 2.0);
        assert_eq!(json["width"], 3.0);
        assert_eq!(json["height"], 4.0);
    }
}
