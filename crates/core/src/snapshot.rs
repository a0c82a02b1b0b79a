use crate::session::CommitReport;
use crate::types::{DragRect, PhaseKind, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Everything a view needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub phase: PhaseKind,
    pub session_id: u32,
    /// Rows top to bottom; `None` before the first start
    pub board: Option<[[u8; SIZE]; SIZE]>,
    pub highlighted: [[bool; SIZE]; SIZE],
    pub drag: Option<DragRect>,
    pub score: u32,
    pub combo: u32,
    pub matches: u32,
    pub time_left: u32,
    pub final_score: Option<u32>,
    pub last_commit: Option<CommitReport>,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.phase = PhaseKind::Idle;
        self.session_id = 0;
        self.board = None;
        self.highlighted = [[false; SIZE]; SIZE];
        self.drag = None;
        self.score = 0;
        self.combo = 0;
        self.matches = 0;
        self.time_left = 0;
        self.final_score = None;
        self.last_commit = None;
    }

    /// True while gestures are accepted
    pub fn playable(&self) -> bool {
        self.phase == PhaseKind::Running
    }

    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlighted
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: PhaseKind::Idle,
            session_id: 0,
            board: None,
            highlighted: [[false; SIZE]; SIZE],
            drag: None,
            score: 0,
            combo: 0,
            matches: 0,
            time_left: 0,
            final_score: None,
            last_commit: None,
        }
    }
}
