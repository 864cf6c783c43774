use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Shape;
use crate::style::Style;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("Symbol name must not be empty")]
    EmptyName,

    #[error("Symbol '{name}': {field} is not a finite number")]
    NonFinite { name: String, field: &'static str },

    #[error("Symbol '{name}': {field} must not be negative (got {value})")]
    NegativeSize {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("Symbol '{name}': opacity {value} is outside 0.0..=1.0")]
    OpacityOutOfRange { name: String, value: f32 },
}

/// A named drawable shape.
///
/// Fields are private so every `Symbol` in existence has passed
/// [`Symbol::new`]'s checks, including ones deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SymbolDef")]
pub struct Symbol {
    name: String,
    #[serde(flatten)]
    shape: Shape,
    style: Style,
}

/// Unchecked wire form of a [`Symbol`].
#[derive(Deserialize)]
struct SymbolDef {
    name: String,
    #[serde(flatten)]
    shape: Shape,
    #[serde(default)]
    style: Style,
}

impl TryFrom<SymbolDef> for Symbol {
    type Error = SymbolError;

    fn try_from(def: SymbolDef) -> Result<Self, Self::Error> {
        Symbol::new(def.name, def.shape, def.style)
    }
}

impl Symbol {
    pub fn new(name: impl Into<String>, shape: Shape, style: Style) -> Result<Self, SymbolError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SymbolError::EmptyName);
        }

        for (field, value) in shape.coordinates() {
            if !value.is_finite() {
                return Err(SymbolError::NonFinite { name, field });
            }
        }

        if let Shape::Rectangle(r) = &shape {
            for (field, value) in [("width", r.width), ("height", r.height)] {
                if value < 0.0 {
                    return Err(SymbolError::NegativeSize { name, field, value });
                }
            }
        }

        if !style.stroke_width.is_finite() {
            return Err(SymbolError::NonFinite {
                name,
                field: "stroke_width",
            });
        }
        if style.stroke_width < 0.0 {
            return Err(SymbolError::NegativeSize {
                name,
                field: "stroke_width",
                value: style.stroke_width,
            });
        }
        if !(0.0..=1.0).contains(&style.opacity) {
            return Err(SymbolError::OpacityOutOfRange {
                name,
                value: style.opacity,
            });
        }

        Ok(Self { name, shape, style })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}
