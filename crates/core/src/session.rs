//! Session module - the timed game lifecycle
//!
//! This module ties together all core components: board, cell source, selector
//! and scoring. It owns the Idle -> Running -> Over state machine, the countdown
//! and the in-flight gesture.
//!
//! The session is a plain state container driven by [`GameAction`]s. It never
//! reads a clock: the host delivers one [`GameAction::Tick`] per second.

use crate::board::Board;
use crate::error::CoreResult;
use crate::rng::CellSource;
use crate::scoring::{MatchOutcome, Scoring};
use crate::selector::{cells_in, rect_from_points, sum_of};
use crate::snapshot::SessionSnapshot;
use crate::types::*;

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Countdown length in ticks (seconds)
    pub game_time: u32,
    /// Board-space pixels per cell, as chosen by the renderer
    pub cell_size: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_time: GAME_TIME,
            cell_size: CELL_SIZE,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// - `SUMTEN_GAME_TIME`: countdown seconds (default 30)
    /// - `SUMTEN_CELL_SIZE`: pixels per cell (default 100)
    ///
    /// Missing, unparsable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        fn positive(key: &str) -> Option<u32> {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&v| v > 0)
        }

        Self {
            game_time: positive("SUMTEN_GAME_TIME").unwrap_or(GAME_TIME),
            cell_size: positive("SUMTEN_CELL_SIZE").unwrap_or(CELL_SIZE),
        }
    }
}

/// A gesture between `beginDrag` and `endDrag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    anchor: BoardPoint,
    current: BoardPoint,
}

/// State of a session in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Running {
    board: Board,
    scoring: Scoring,
    time_left: u32,
    drag: Option<Drag>,
    /// Cells highlighted for the view: the live selection during a drag, or the
    /// last missed selection until the next gesture starts.
    highlight: Option<IndexRect>,
}

impl Running {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn combo(&self) -> u32 {
        self.scoring.combo()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running(Running),
    /// Countdown expired. The board is frozen for display only.
    Over {
        final_score: u32,
        matches: u32,
        board: Board,
    },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Running(_) => PhaseKind::Running,
            Phase::Over { .. } => PhaseKind::Over,
        }
    }
}

/// What a committed gesture selected and how it scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitReport {
    pub rect: IndexRect,
    pub sum: u32,
    pub outcome: MatchOutcome,
}

/// Observable effect of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing observable changed (wrong phase, no gesture in flight, same point).
    Ignored,
    /// A fresh session began.
    Started { session_id: u32 },
    /// Countdown, provisional rectangle or highlight changed.
    Updated,
    /// A gesture was committed.
    Committed(CommitReport),
    /// The final tick arrived.
    GameOver { final_score: u32 },
}

impl Outcome {
    /// True when observers should be notified
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Ignored)
    }
}

/// The game session
#[derive(Debug, Clone)]
pub struct Session<R> {
    phase: Phase,
    rng: R,
    config: SessionConfig,
    /// Monotonic id (increments on every start).
    session_id: u32,
    last_commit: Option<CommitReport>,
}

impl<R: CellSource> Session<R> {
    /// Create an idle session drawing cells from `rng`
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, SessionConfig::default())
    }

    pub fn with_config(rng: R, config: SessionConfig) -> Self {
        Self {
            phase: Phase::Idle,
            rng,
            config,
            session_id: 0,
            last_commit: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Live or frozen board; `None` before the first start
    pub fn board(&self) -> Option<&Board> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Running(run) => Some(&run.board),
            Phase::Over { board, .. } => Some(board),
        }
    }

    pub fn score(&self) -> u32 {
        match &self.phase {
            Phase::Idle => 0,
            Phase::Running(run) => run.score(),
            Phase::Over { final_score, .. } => *final_score,
        }
    }

    pub fn combo(&self) -> u32 {
        match &self.phase {
            Phase::Running(run) => run.combo(),
            _ => 0,
        }
    }

    pub fn time_left(&self) -> u32 {
        match &self.phase {
            Phase::Idle => self.config.game_time,
            Phase::Running(run) => run.time_left,
            Phase::Over { .. } => 0,
        }
    }

    pub fn final_score(&self) -> Option<u32> {
        match &self.phase {
            Phase::Over { final_score, .. } => Some(*final_score),
            _ => None,
        }
    }

    /// Provisional rectangle of the gesture in flight
    pub fn drag_rect(&self) -> Option<DragRect> {
        match &self.phase {
            Phase::Running(run) => run
                .drag
                .map(|d| DragRect::from_points(d.anchor, d.current)),
            _ => None,
        }
    }

    /// Rectangle of highlighted cells, if any
    pub fn highlight(&self) -> Option<IndexRect> {
        match &self.phase {
            Phase::Running(run) => run.highlight,
            _ => None,
        }
    }

    /// Most recent commit of the current session
    pub fn last_commit(&self) -> Option<CommitReport> {
        self.last_commit
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Dispatch a single action.
    ///
    /// Errors only come from the cell source (or a programmer error); the
    /// session is left in its previous state when one is returned.
    pub fn apply(&mut self, action: GameAction) -> CoreResult<Outcome> {
        match action {
            GameAction::Start => self.start(),
            GameAction::Tick => Ok(self.tick()),
            GameAction::BeginDrag(p) => Ok(self.begin_drag(p)),
            GameAction::MoveDrag(p) => Ok(self.move_drag(p)),
            GameAction::EndDrag(p) => self.end_drag(p),
        }
    }

    /// Start (or restart) with a fresh board, zeroed counters and a full timer.
    ///
    /// Valid from any phase; an in-flight gesture is discarded.
    pub fn start(&mut self) -> CoreResult<Outcome> {
        let board = Board::generate(&mut self.rng)?;
        self.phase = Phase::Running(Running {
            board,
            scoring: Scoring::new(),
            time_left: self.config.game_time,
            drag: None,
            highlight: None,
        });
        self.session_id = self.session_id.wrapping_add(1);
        self.last_commit = None;
        Ok(Outcome::Started {
            session_id: self.session_id,
        })
    }

    /// One countdown second.
    ///
    /// The tick that takes the timer from 1 to 0 ends the session; the board
    /// freezes and any gesture in flight is dropped.
    pub fn tick(&mut self) -> Outcome {
        let Phase::Running(run) = &mut self.phase else {
            return Outcome::Ignored;
        };

        if run.time_left > 1 {
            run.time_left -= 1;
            return Outcome::Updated;
        }

        let final_score = run.score();
        let matches = run.scoring.matches();
        let board = run.board;
        self.phase = Phase::Over {
            final_score,
            matches,
            board,
        };
        Outcome::GameOver { final_score }
    }

    /// Anchor a provisional rectangle at `p`. Highlights nothing yet.
    pub fn begin_drag(&mut self, p: BoardPoint) -> Outcome {
        let Phase::Running(run) = &mut self.phase else {
            return Outcome::Ignored;
        };
        run.drag = Some(Drag {
            anchor: p,
            current: p,
        });
        run.highlight = None;
        Outcome::Updated
    }

    /// Stretch the provisional rectangle to `p`.
    pub fn move_drag(&mut self, p: BoardPoint) -> Outcome {
        let Phase::Running(run) = &mut self.phase else {
            return Outcome::Ignored;
        };
        let Some(drag) = run.drag.as_mut() else {
            return Outcome::Ignored;
        };
        if drag.current == p {
            return Outcome::Ignored;
        }
        drag.current = p;
        run.highlight = Some(rect_from_points(drag.anchor, p, self.config.cell_size));
        Outcome::Updated
    }

    /// Commit the gesture: select, score, and clear + refill on a match.
    ///
    /// A no-op without a preceding `begin_drag` or outside a running session.
    pub fn end_drag(&mut self, p: BoardPoint) -> CoreResult<Outcome> {
        let Phase::Running(run) = &mut self.phase else {
            return Ok(Outcome::Ignored);
        };
        let Some(drag) = run.drag else {
            return Ok(Outcome::Ignored);
        };

        let rect = rect_from_points(drag.anchor, p, self.config.cell_size);
        let cells = cells_in(rect);
        let sum = sum_of(&run.board, &cells);

        // Refill before touching the counters so a failing source leaves the
        // session exactly as it was.
        if sum == MATCH_TARGET {
            run.board = run.board.clear_and_refill(&cells, &mut self.rng)?;
        }
        let outcome = run.scoring.record(sum);

        run.drag = None;
        run.highlight = if outcome.is_match() { None } else { Some(rect) };

        let report = CommitReport { rect, sum, outcome };
        self.last_commit = Some(report);
        Ok(Outcome::Committed(report))
    }

    /// Write the observable state into `out` without allocating.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.clear();
        out.phase = self.phase_kind();
        out.session_id = self.session_id;
        out.time_left = self.time_left();
        out.score = self.score();
        out.combo = self.combo();
        out.final_score = self.final_score();
        out.drag = self.drag_rect();
        out.last_commit = self.last_commit;

        match &self.phase {
            Phase::Idle => {}
            Phase::Running(run) => {
                out.board = Some(run.board.rows());
                out.matches = run.scoring.matches();
                if let Some(rect) = run.highlight {
                    for pos in cells_in(rect) {
                        out.highlighted[pos.row as usize][pos.col as usize] = true;
                    }
                }
            }
            Phase::Over { matches, board, .. } => {
                out.board = Some(board.rows());
                out.matches = *matches;
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
