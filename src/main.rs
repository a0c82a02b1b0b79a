//! Terminal Sum Ten runner (default binary).
//!
//! Drag across the grid with the mouse to select a rectangle of numbers; if
//! they add up to ten they clear. Uses crossterm for input and the framebuffer
//! renderer from `tui_sumten::term`, with the optional TCP adapter for agents.

use std::cell::Cell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_sumten::adapter::{
    Adapter, Controller, InboundCommand, InboundPayload, IntervalTicker, TickSource,
};
use tui_sumten::core::{CommitReport, MatchOutcome, Outcome, Session, SessionConfig, SimpleRng};
use tui_sumten::event_log;
use tui_sumten::input::{handle_event, InputEvent};
use tui_sumten::logging;
use tui_sumten::term::{
    AdapterStatusView, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};

/// Input poll cap so drags and resizes stay responsive between ticks.
const FRAME: Duration = Duration::from_millis(16);

/// Redraw an unchanged screen at most this often.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    if let Err(e) = logging::init_from_env() {
        eprintln!("[SumTen] Event log unavailable: {}", e);
    }

    let config = SessionConfig::from_env();
    let seed = seed_from_env();

    let adapter = match Adapter::start_from_env(config.cell_size) {
        Ok(adapter) => adapter,
        Err(e) => {
            eprintln!("[Adapter] Not started: {:#}", e);
            None
        }
    };

    event_log!(
        "boot seed={} game_time={} cell_size={} adapter={}",
        seed,
        config.game_time,
        config.cell_size,
        adapter
            .as_ref()
            .map(|a| a.local_addr().to_string())
            .unwrap_or_else(|| "off".to_string())
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed, adapter);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// `SUMTEN_SEED`, or a clock-derived seed.
fn seed_from_env() -> u32 {
    std::env::var("SUMTEN_SEED")
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
}

fn run(
    term: &mut TerminalRenderer,
    config: SessionConfig,
    seed: u32,
    mut adapter: Option<Adapter>,
) -> Result<()> {
    let session = Session::with_config(SimpleRng::new(seed), config);
    let mut controller = Controller::new(session, IntervalTicker::default());

    // Observers only raise a flag; the loop owns the adapter and the screen.
    let changed = Rc::new(Cell::new(true));
    {
        let changed = Rc::clone(&changed);
        controller.subscribe(move |_| changed.set(true));
    }

    let started = Instant::now();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let view = GameView::for_viewport(viewport).with_cell_size(config.cell_size);
        let snap = *controller.snapshot();

        if changed.replace(false) {
            if let Some(adapter) = adapter.as_mut() {
                adapter.broadcast(&snap);
            }
        }

        let status = adapter.as_ref().map(|a| AdapterStatusView {
            client_count: a.client_count().min(u16::MAX as usize) as u16,
            listen_port: Some(a.local_addr().port()),
        });

        // Render.
        let mut hasher = DefaultHasher::new();
        snap.hash(&mut hasher);
        status.hash(&mut hasher);
        (w, h).hash(&mut hasher);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, hasher.finish(), snap.drag.is_none()) {
            view.render_into_with_adapter(&snap, status.as_ref(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input, waiting at most until the next countdown tick.
        let timeout = controller
            .ticks()
            .until_next()
            .map_or(FRAME, |d| d.min(FRAME));
        if event::poll(timeout)? {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                term.invalidate();
                throttle.invalidate();
            }
            match handle_event(&ev, &view.geometry(viewport)) {
                Some(InputEvent::Quit) => {
                    event_log!("quit score={}", controller.snapshot().score);
                    return Ok(());
                }
                Some(InputEvent::Action(action)) => {
                    let outcome = controller.dispatch(action)?;
                    log_outcome("local", &outcome);
                }
                None => {}
            }
        }

        // Countdown.
        let report = controller.pump_ticks();
        if let Some(final_score) = report.game_over {
            event_log!(
                "game_over final_score={} matches={}",
                final_score,
                controller.snapshot().matches
            );
        }

        // Agent commands.
        if let Some(adapter) = adapter.as_mut() {
            while let Some(cmd) = adapter.try_recv() {
                apply_remote(&mut controller, adapter, cmd);
            }
        }
    }
}

fn apply_remote<T: TickSource>(
    controller: &mut Controller<SimpleRng, T>,
    adapter: &mut Adapter,
    cmd: InboundCommand,
) {
    match cmd.payload {
        InboundPayload::SnapshotRequest => {
            adapter.send_snapshot(cmd.client_id, controller.snapshot());
        }
        InboundPayload::Action(action) => {
            let result = controller.dispatch(action);
            match &result {
                Ok(outcome) => log_outcome("remote", outcome),
                Err(e) => event_log!("remote client={} error={}", cmd.client_id, e),
            }
            adapter.ack(&cmd, &result);
        }
    }
}

fn log_outcome(source: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Started { session_id } => {
            event_log!("{} start session={}", source, session_id);
        }
        Outcome::Committed(CommitReport { rect, sum, outcome }) => {
            let cells = format!(
                "r{}-{} c{}-{}",
                rect.row_min, rect.row_max, rect.col_min, rect.col_max
            );
            match outcome {
                MatchOutcome::Matched { awarded, combo } => event_log!(
                    "{} match {} sum={} awarded={} combo={}",
                    source,
                    cells,
                    sum,
                    awarded,
                    combo
                ),
                MatchOutcome::Missed => {
                    event_log!("{} miss {} sum={}", source, cells, sum)
                }
            }
        }
        Outcome::GameOver { final_score } => {
            event_log!("{} game_over final_score={}", source, final_score);
        }
        Outcome::Ignored | Outcome::Updated => {}
    }
}
