use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;

use symcanvas_core::RegistryError;
use symcanvas_io::{CanvasProject, EventScript, ProjectError, TimedEvent};
use symcanvas_renderer::{CanvasSurface, Frame, PanOffset, RecordingSurface};
use symcanvas_session::{Clock, ManualClock, Session, SystemClock};

/// Replay an input script against a canvas project and dump every frame
/// the canvas committed.
#[derive(Parser, Debug)]
#[command(name = "symcanvas-player")]
#[command(version)]
#[command(about = "Replay pan/resize input against a SymCanvas project", long_about = None)]
pub struct Cli {
    /// Project JSON (config + initial symbols). Defaults to the built-in demo.
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Event script JSON. Defaults to the built-in demo drag.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Write the frame dump here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Initial window size as WIDTHxHEIGHT, before margins.
    #[arg(long, default_value = "1440x900", value_parser = parse_window)]
    pub window: (u32, u32),

    /// Sleep through the script on the wall clock instead of simulating time.
    #[arg(long)]
    pub realtime: bool,

    /// Keep only the newest N frames in the dump.
    #[arg(long, value_name = "N")]
    pub max_frames: Option<usize>,
}

fn recording_surface(max_frames: Option<usize>) -> RecordingSurface {
    match max_frames {
        Some(limit) => RecordingSurface::with_history_limit(limit),
        None => RecordingSurface::new(),
    }
}

fn parse_window(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse().map_err(|e| format!("bad width: {}", e))?;
    let h = h.trim().parse().map_err(|e| format!("bad height: {}", e))?;
    Ok((w, h))
}

/// Outcome of one replay.
#[derive(Debug, Serialize)]
pub struct PlaybackReport {
    pub project: String,
    pub redraws: u64,
    pub final_pan: PanOffset,
    /// Names of symbols the canvas refused.
    pub rejected: Vec<String>,
    /// The newest frames; all of them unless a frame limit was set.
    pub frames: Vec<Frame>,
}

/// Build the session, draw the first frame, feed it the script and let the
/// last pending redraw run.
pub fn replay<C, W>(
    project: &CanvasProject,
    script: &EventScript,
    window: (u32, u32),
    surface: RecordingSurface,
    clock: C,
    mut wait_until: W,
) -> Result<PlaybackReport, ProjectError>
where
    C: Clock,
    W: FnMut(&mut Session<RecordingSurface, C>, u64),
{
    let registry = project.build_registry()?;
    let mut session = Session::with_registry(
        project.config.clone(),
        registry,
        surface,
        clock,
    );
    log::info!("Session {} started for '{}'", session.id(), project.name);

    session.resize(window.0, window.1);
    session.redraw_now();

    let mut rejected = Vec::new();
    for timed in &script.events {
        wait_until(&mut session, timed.at);
        deliver(&mut session, timed, &mut rejected);
    }
    while let Some(deadline) = session.next_deadline() {
        wait_until(&mut session, deadline);
    }

    log::info!(
        "Replay done: {} redraws, pan {}",
        session.redraw_count(),
        session.readout()
    );
    Ok(PlaybackReport {
        project: project.name.clone(),
        redraws: session.redraw_count(),
        final_pan: session.pan(),
        rejected,
        frames: session.into_surface().into_frames(),
    })
}

fn deliver<S: CanvasSurface, C: Clock>(
    session: &mut Session<S, C>,
    timed: &TimedEvent,
    rejected: &mut Vec<String>,
) {
    if let Err(err) = timed.event.apply(session) {
        log::warn!("Event at {} ms rejected: {}", timed.at, err);
        match err {
            RegistryError::DuplicateName(name) | RegistryError::ReservedName(name) => {
                rejected.push(name)
            }
        }
    }
}

/// Simulated time: jump straight to each timestamp.
pub fn replay_simulated(
    project: &CanvasProject,
    script: &EventScript,
    window: (u32, u32),
    max_frames: Option<usize>,
) -> Result<PlaybackReport, ProjectError> {
    let surface = recording_surface(max_frames);
    replay(project, script, window, surface, ManualClock::new(), |session, at| {
        session.advance_to(at);
    })
}

/// Wall-clock time: sleep until each timestamp, waking for due redraws.
pub fn replay_realtime(
    project: &CanvasProject,
    script: &EventScript,
    window: (u32, u32),
    max_frames: Option<usize>,
) -> Result<PlaybackReport, ProjectError> {
    let surface = recording_surface(max_frames);
    replay(project, script, window, surface, SystemClock::new(), |session, at| loop {
        let now = session.clock().now();
        if now >= at {
            session.poll();
            break;
        }
        let wake = session.next_deadline().map_or(at, |d| d.min(at));
        thread::sleep(Duration::from_millis(wake.saturating_sub(now).max(1)));
        session.poll();
    })
}

pub fn run(cli: Cli) -> Result<(), ProjectError> {
    let project = match &cli.project {
        Some(path) => CanvasProject::load(path)?,
        None => CanvasProject::demo(),
    };
    let script = match &cli.script {
        Some(path) => EventScript::load(path)?,
        None => EventScript::demo(),
    };

    let report = if cli.realtime {
        replay_realtime(&project, &script, cli.window, cli.max_frames)?
    } else {
        replay_simulated(&project, &script, cli.window, cli.max_frames)?
    };

    let json = serde_json::to_string_pretty(&report)?;
    match &cli.out {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("Wrote {} frames to {}", report.frames.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcanvas_io::InputEvent;

    #[test]
    fn test_parse_window() {
        assert_eq!(parse_window("800x600"), Ok((800, 600)));
        assert!(parse_window("800").is_err());
        assert!(parse_window("axb").is_err());
    }

    #[test]
    fn test_demo_replay() {
        let report = replay_simulated(
            &CanvasProject::demo(),
            &EventScript::demo(),
            (1440, 900),
            None,
        )
        .unwrap();

        // 20 moves of (3, 2) then 10 of (-4, 1).
        assert_eq!(report.final_pan, PanOffset::new(20, 50));
        assert!(report.rejected.is_empty());
        // Initial frame, startup resize, two debounce windows per drag,
        // final resize.
        assert_eq!(report.redraws, 7);
        assert_eq!(report.frames.len(), 7);

        let last = report.frames.last().unwrap();
        let symbols: Vec<&str> = last
            .layer_names()
            .into_iter()
            .filter(|n| !n.starts_with("grid"))
            .collect();
        assert_eq!(symbols, vec!["rect1", "rect2100", "base"]);
        assert_eq!(last.layer("rect1").unwrap().offset, [20.0, 50.0]);
    }

    #[test]
    fn test_reserved_add_is_reported_and_marker_survives() {
        let symbol = symcanvas_core::Symbol::new(
            "base",
            symcanvas_core::Shape::rectangle(0.0, 0.0, 50.0, 50.0),
            symcanvas_core::Style::default(),
        )
        .unwrap();
        let script =
            EventScript::new(vec![TimedEvent::new(10, InputEvent::AddSymbol { symbol })]).unwrap();
        let report = replay_simulated(&CanvasProject::demo(), &script, (800, 600), None).unwrap();
        assert_eq!(report.rejected, vec!["base".to_string()]);

        let marker = report.frames.last().unwrap().layer("base").unwrap();
        assert_eq!(
            marker.shape,
            symcanvas_core::Shape::rectangle(0.0, 0.0, 100.0, 100.0)
        );
    }

    #[test]
    fn test_frame_limit_keeps_newest() {
        let report = replay_simulated(
            &CanvasProject::demo(),
            &EventScript::demo(),
            (1440, 900),
            Some(2),
        )
        .unwrap();
        assert_eq!(report.redraws, 7);
        let indices: Vec<usize> = report.frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![5, 6]);
    }

    #[test]
    fn test_duplicate_add_is_reported_not_fatal() {
        let project = CanvasProject::demo();
        let script = EventScript::new(vec![TimedEvent::new(
            10,
            InputEvent::AddSymbol {
                symbol: project.symbols[0].clone(),
            },
        )])
        .unwrap();
        let report = replay_simulated(&project, &script, (800, 600), None).unwrap();
        assert_eq!(report.rejected, vec!["rect1".to_string()]);
        // Initial frame plus the startup resize.
        assert_eq!(report.redraws, 2);
    }
}
