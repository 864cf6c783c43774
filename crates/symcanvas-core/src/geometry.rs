use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point in canvas coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// An axis-aligned rectangle.
///
/// `(x, y)` is the top-left corner unless `from_center` is set, in which case
/// it is the rectangle's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub from_center: bool,
}

impl RectShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            from_center: false,
        }
    }

    pub fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            from_center: true,
            ..Self::new(x, y, width, height)
        }
    }

    /// Top-left corner regardless of the anchoring mode.
    pub fn top_left(&self) -> Point {
        if self.from_center {
            Point::new(self.x - self.width / 2.0, self.y - self.height / 2.0)
        } else {
            Point::new(self.x, self.y)
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A straight segment between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineShape {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Discriminant of a [`Shape`], used in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Line,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => f.write_str("rectangle"),
            ShapeKind::Line => f.write_str("line"),
        }
    }
}

/// The geometry of a drawable symbol. Each variant carries only the fields
/// that kind of shape needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(RectShape),
    Line(LineShape),
}

impl Shape {
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Rectangle(RectShape::new(x, y, width, height))
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Shape::Line(LineShape::new(x1, y1, x2, y2))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Line(_) => ShapeKind::Line,
        }
    }

    /// Named numeric fields, in declaration order.
    pub fn coordinates(&self) -> Vec<(&'static str, f64)> {
        match self {
            Shape::Rectangle(r) => vec![
                ("x", r.x),
                ("y", r.y),
                ("width", r.width),
                ("height", r.height),
            ],
            Shape::Line(l) => vec![("x1", l.x1), ("y1", l.y1), ("x2", l.x2), ("y2", l.y2)],
        }
    }
}
