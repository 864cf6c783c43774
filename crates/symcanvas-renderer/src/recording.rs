use std::collections::HashSet;
use std::mem;

use serde::{Deserialize, Serialize};
use symcanvas_core::{Shape, Style};

use crate::surface::CanvasSurface;

/// A queued shape together with the translate that was active when it was
/// queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLayer {
    pub name: String,
    #[serde(flatten)]
    pub shape: Shape,
    pub style: Style,
    /// `[dx, dy]`
    pub offset: [f64; 2],
}

/// One committed frame: every layer that was visible after a commit, in
/// draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: usize,
    pub layers: Vec<RenderLayer>,
}

impl Frame {
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn layer(&self, name: &str) -> Option<&RenderLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

/// Surface calls in the order they were made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Draw { name: String },
    Commit,
}

/// In-memory [`CanvasSurface`] that records every call and keeps each
/// committed frame.
///
/// With a history limit only the newest frames are kept, and the op log
/// only covers the frame being drawn.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    stack: Vec<(f64, f64)>,
    offset: (f64, f64),
    queued: Vec<RenderLayer>,
    queued_names: HashSet<String>,
    frames: Vec<Frame>,
    committed: usize,
    history_limit: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `frames` committed frames (at least one).
    pub fn with_history_limit(frames: usize) -> Self {
        Self {
            history_limit: Some(frames.max(1)),
            ..Self::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Frames committed so far, including any the history limit dropped.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// The translate currently in effect.
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Nesting depth of unmatched `save_transform` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl CanvasSurface for RecordingSurface {
    fn clear(&mut self) {
        if self.history_limit.is_some() {
            self.ops.clear();
        }
        self.ops.push(DrawOp::Clear);
        self.queued.clear();
        self.queued_names.clear();
    }

    fn save_transform(&mut self) {
        self.ops.push(DrawOp::Save);
        self.stack.push(self.offset);
    }

    fn restore_transform(&mut self) {
        self.ops.push(DrawOp::Restore);
        match self.stack.pop() {
            Some(offset) => self.offset = offset,
            None => {
                log::warn!("restore_transform without matching save; resetting to identity");
                self.offset = (0.0, 0.0);
            }
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(DrawOp::Translate { dx, dy });
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn draw_shape(&mut self, name: &str, shape: &Shape, style: &Style) {
        if !self.queued_names.insert(name.to_string()) {
            log::warn!("Layer '{}' queued twice in one frame; keeping the first", name);
            return;
        }
        self.ops.push(DrawOp::Draw {
            name: name.to_string(),
        });
        self.queued.push(RenderLayer {
            name: name.to_string(),
            shape: shape.clone(),
            style: style.clone(),
            offset: [self.offset.0, self.offset.1],
        });
    }

    fn commit_layers(&mut self) {
        self.ops.push(DrawOp::Commit);
        self.queued_names.clear();
        let frame = Frame {
            index: self.committed,
            layers: mem::take(&mut self.queued),
        };
        log::trace!("Committed frame {} with {} layers", frame.index, frame.layers.len());
        self.committed += 1;
        self.frames.push(frame);
        if let Some(limit) = self.history_limit {
            let excess = self.frames.len().saturating_sub(limit);
            self.frames.drain(..excess);
        }
    }
}
