//! Timed input scripts.
//!
//! A script stands in for the browser's event stream: a list of pointer,
//! resize and add-symbol events, each stamped with the millisecond at which
//! it arrives.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symcanvas_core::{Color, RegistryError, Shape, Style, Symbol};
use symcanvas_renderer::CanvasSurface;
use symcanvas_session::{Clock, Millis, Session};

use crate::error::ProjectError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown,
    PointerUp,
    PointerMove { dx: i32, dy: i32 },
    Resize { width: u32, height: u32 },
    AddSymbol { symbol: Symbol },
}

impl InputEvent {
    /// Deliver this event to `session`.
    pub fn apply<S: CanvasSurface, C: Clock>(
        &self,
        session: &mut Session<S, C>,
    ) -> Result<(), RegistryError> {
        match self {
            InputEvent::PointerDown => session.pointer_down(),
            InputEvent::PointerUp => session.pointer_up(),
            InputEvent::PointerMove { dx, dy } => session.pointer_move(*dx, *dy),
            InputEvent::Resize { width, height } => session.resize(*width, *height),
            InputEvent::AddSymbol { symbol } => {
                session.add_symbol(symbol.clone())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Arrival time in milliseconds from the start of the script.
    pub at: Millis,
    #[serde(flatten)]
    pub event: InputEvent,
}

impl TimedEvent {
    pub fn new(at: Millis, event: InputEvent) -> Self {
        Self { at, event }
    }
}

/// Events in arrival order. Timestamps never decrease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventScript {
    pub events: Vec<TimedEvent>,
}

impl EventScript {
    pub fn new(events: Vec<TimedEvent>) -> Result<Self, ProjectError> {
        let script = Self { events };
        script.validate()?;
        Ok(script)
    }

    /// A short drag across the canvas, then a second square added at three
    /// seconds and a final drag to show both move together.
    pub fn demo() -> Self {
        use InputEvent::*;

        let mut events = vec![TimedEvent::new(500, PointerDown)];
        for step in 0..20 {
            events.push(TimedEvent::new(510 + step * 8, PointerMove { dx: 3, dy: 2 }));
        }
        events.push(TimedEvent::new(700, PointerUp));

        if let Ok(symbol) = Symbol::new(
            "rect2100",
            Shape::rectangle(100.0, 200.0, 100.0, 100.0),
            Style::filled(Color::BLUE).with_opacity(0.5),
        ) {
            events.push(TimedEvent::new(3_000, AddSymbol { symbol }));
        }

        events.push(TimedEvent::new(3_200, PointerDown));
        for step in 0..10 {
            events.push(TimedEvent::new(3_210 + step * 16, PointerMove { dx: -4, dy: 1 }));
        }
        events.push(TimedEvent::new(3_400, PointerUp));
        events.push(TimedEvent::new(4_000, Resize { width: 1024, height: 768 }));

        Self { events }
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        for (index, pair) in self.events.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(ProjectError::UnsortedScript {
                    index: index + 1,
                    at: pair[1].at,
                    previous: pair[0].at,
                });
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let script = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} events from {}", script.events.len(), path.display());
        Ok(script)
    }

    /// Timestamp of the last event, or 0 for an empty script.
    pub fn duration(&self) -> Millis {
        self.events.last().map(|e| e.at).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcanvas_renderer::{PanOffset, RecordingSurface};
    use symcanvas_session::{ManualClock, SessionConfig};

    #[test]
    fn test_parse_events() {
        let json = r#"{"events": [
            {"at": 0, "type": "resize", "width": 800, "height": 600},
            {"at": 10, "type": "pointer_down"},
            {"at": 12, "type": "pointer_move", "dx": 3, "dy": 4},
            {"at": 20, "type": "add_symbol", "symbol":
                {"name": "l", "kind": "line", "x1": 0, "y1": 0, "x2": 5, "y2": 5}}
        ]}"#;
        let script = EventScript::from_json(json).unwrap();
        assert_eq!(script.events.len(), 4);
        assert_eq!(script.events[2].event, InputEvent::PointerMove { dx: 3, dy: 4 });
        assert_eq!(script.duration(), 20);
    }

    #[test]
    fn test_unsorted_script_rejected() {
        let events = vec![
            TimedEvent::new(50, InputEvent::PointerDown),
            TimedEvent::new(40, InputEvent::PointerUp),
        ];
        assert!(matches!(
            EventScript::new(events),
            Err(ProjectError::UnsortedScript {
                index: 1,
                at: 40,
                previous: 50
            })
        ));
    }

    #[test]
    fn test_apply_drives_session() {
        let mut session = Session::new(
            SessionConfig::default(),
            RecordingSurface::new(),
            ManualClock::new(),
        );
        for event in [
            InputEvent::PointerDown,
            InputEvent::PointerMove { dx: 3, dy: 4 },
            InputEvent::PointerMove { dx: -1, dy: 2 },
            InputEvent::PointerUp,
            InputEvent::PointerMove { dx: 9, dy: 9 },
        ] {
            event.apply(&mut session).unwrap();
        }
        assert_eq!(session.pan(), PanOffset::new(2, 6));
        assert!(session.is_redraw_pending());
    }

    #[test]
    fn test_demo_script_is_sorted() {
        let script = EventScript::demo();
        assert!(script.validate().is_ok());
        assert_eq!(script.duration(), 4_000);
    }
}
