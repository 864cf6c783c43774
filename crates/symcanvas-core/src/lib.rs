//! # SymCanvas Core
//!
//! Named drawable symbols (tagged shape geometry plus paint style) and the
//! symbol registry that gives each name a unique, insertion-ordered draw rank.
//!
//! This crate has no notion of rendering; see `symcanvas-renderer`.

pub mod geometry;
pub mod style;
pub mod symbol;
pub mod registry;

pub use geometry::{LineShape, Point, RectShape, Shape, ShapeKind};
pub use registry::{Rank, RankedSymbol, RegistryError, SymbolRegistry};
pub use style::{Color, Style};
pub use symbol::{Symbol, SymbolError};
