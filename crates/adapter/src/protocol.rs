//! Protocol module - JSON message types for the AI adapter
//!
//! Line-delimited JSON. Every message carries `type`, `seq` (sender sequence
//! number) and `ts` (milliseconds since the Unix epoch).

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::core::{CommitReport, MatchOutcome, Outcome, SessionSnapshot};
use crate::types::{BoardPoint, DragRect, GameAction, IndexRect, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Protocol version spoken by this server.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Game identifier sent in `welcome`.
pub const GAME_ID: &str = "tui-sumten";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HelloType {
    #[serde(rename = "hello")]
    #[default]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CommandType {
    #[serde(rename = "command")]
    #[default]
    Command,
}

/// Client hello message (first message on a connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    #[serde(default)]
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    #[serde(default = "default_true")]
    pub stream_observations: bool,
}

impl Default for RequestedCapabilities {
    fn default() -> Self {
        Self {
            stream_observations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Command message: one session action, with a board-space point for gestures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub ts: u64,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

impl CommandMessage {
    /// Resolve into a session action.
    ///
    /// `tick` is reserved for the server's own clock and is rejected, as is a
    /// gesture without both coordinates.
    pub fn to_action(&self) -> Result<GameAction, String> {
        let point = match (self.x, self.y) {
            (Some(x), Some(y)) => Some(BoardPoint::new(x, y)),
            _ => None,
        };
        match GameAction::from_parts(&self.action, point) {
            Some(GameAction::Tick) => Err("tick is driven by the server".to_string()),
            Some(action) => Ok(action),
            None if is_gesture_name(&self.action) => {
                Err(format!("{} requires integer x and y", self.action))
            }
            None => Err(format!("Unknown action: {}", self.action)),
        }
    }
}

fn is_gesture_name(name: &str) -> bool {
    ["beginDrag", "moveDrag", "endDrag"]
        .iter()
        .any(|g| g.eq_ignore_ascii_case(name))
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Command sent before `hello`
    #[serde(rename = "not_ready")]
    NotReady,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "backpressure")]
    Backpressure,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub game_id: String,
    pub capabilities: ServerCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub actions: Vec<String>,
    pub grid_size: u8,
    /// Board-space pixels per cell the session maps points with
    pub cell_size: u32,
}

/// What a command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckOutcome {
    #[serde(rename = "ignored")]
    Ignored,
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "updated")]
    Updated,
    #[serde(rename = "committed")]
    Committed,
    #[serde(rename = "game_over")]
    GameOver,
}

impl From<&Outcome> for AckOutcome {
    fn from(value: &Outcome) -> Self {
        match value {
            Outcome::Ignored => Self::Ignored,
            Outcome::Started { .. } => Self::Started,
            Outcome::Updated => Self::Updated,
            Outcome::Committed(_) => Self::Committed,
            Outcome::GameOver { .. } => Self::GameOver,
        }
    }
}

/// Acknowledgment of an applied command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
    pub outcome: AckOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitSnapshot>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseLower {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "over")]
    Over,
}

impl From<crate::types::PhaseKind> for PhaseLower {
    fn from(value: crate::types::PhaseKind) -> Self {
        use crate::types::PhaseKind;
        match value {
            PhaseKind::Idle => Self::Idle,
            PhaseKind::Running => Self::Running,
            PhaseKind::Over => Self::Over,
        }
    }
}

/// Session state observation (streamed to clients)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub session_id: u32,
    pub phase: PhaseLower,
    pub playable: bool,
    /// Rows top to bottom; absent before the first start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<[[u8; SIZE]; SIZE]>,
    pub highlighted: [[bool; SIZE]; SIZE],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag: Option<DragSnapshot>,
    pub score: u32,
    pub combo: u32,
    pub matches: u32,
    pub time_left: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<CommitSnapshot>,
    pub state_hash: StateHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSnapshot {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl From<DragRect> for DragSnapshot {
    fn from(r: DragRect) -> Self {
        Self {
            left: r.left,
            top: r.top,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectSnapshot {
    pub row_min: u8,
    pub row_max: u8,
    pub col_min: u8,
    pub col_max: u8,
}

impl From<IndexRect> for RectSnapshot {
    fn from(r: IndexRect) -> Self {
        Self {
            row_min: r.row_min,
            row_max: r.row_max,
            col_min: r.col_min,
            col_max: r.col_max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSnapshot {
    pub rect: RectSnapshot,
    pub sum: u32,
    pub matched: bool,
    pub awarded: u32,
}

impl From<CommitReport> for CommitSnapshot {
    fn from(c: CommitReport) -> Self {
        let awarded = match c.outcome {
            MatchOutcome::Matched { awarded, .. } => awarded,
            MatchOutcome::Missed => 0,
        };
        Self {
            rect: c.rect.into(),
            sum: c.sum,
            matched: c.outcome.is_match(),
            awarded,
        }
    }
}

/// Deterministic state hash serialized as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl StateHash {
    pub fn of(snap: &SessionSnapshot) -> Self {
        let mut hasher = Fnv1aHasher::new();
        snap.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&format_args!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid hex"))
    }
}

/// Stable 64-bit FNV-1a hasher.
///
/// `DefaultHasher` output is not guaranteed stable across Rust releases.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

// ============== Message Parsing ==============

/// Parsed inbound message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    /// Well-formed JSON with an unrecognized `type`
    Unknown(serde_json::Value),
}

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Err(e) => {
            // An unknown type is a protocol error, not a parse error.
            let value: serde_json::Value = serde_json::from_str(json)?;
            match value.get("type").and_then(|t| t.as_str()) {
                Some("hello") | Some("command") | None => Err(e),
                Some(_) => Ok(ParsedMessage::Unknown(value)),
            }
        }
    }
}

// ============== Builders ==============

pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        requested: RequestedCapabilities::default(),
    }
}

pub fn create_command(seq: u64, action: GameAction) -> CommandMessage {
    let point = match action {
        GameAction::BeginDrag(p) | GameAction::MoveDrag(p) | GameAction::EndDrag(p) => Some(p),
        GameAction::Start | GameAction::Tick => None,
    };
    CommandMessage {
        msg_type: CommandType::Command,
        seq,
        ts: current_timestamp_ms(),
        action: action.as_str().to_string(),
        x: point.map(|p| p.x),
        y: point.map(|p| p.y),
    }
}

pub fn create_welcome(seq: u64, protocol_version: &str, client_id: u64, cell_size: u32) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        client_id,
        game_id: GAME_ID.to_string(),
        capabilities: ServerCapabilities {
            actions: ["start", "beginDrag", "moveDrag", "endDrag"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            grid_size: GRID_SIZE,
            cell_size,
        },
    }
}

/// Ack for the command with sequence `seq`.
pub fn create_ack(seq: u64, outcome: &Outcome) -> AckMessage {
    let commit = match outcome {
        Outcome::Committed(report) => Some(CommitSnapshot::from(*report)),
        _ => None,
    };
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
        outcome: AckOutcome::from(outcome),
        commit,
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Build an observation from a session snapshot.
pub fn build_observation(snap: &SessionSnapshot, seq: u64) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        session_id: snap.session_id,
        phase: snap.phase.into(),
        playable: snap.playable(),
        board: snap.board,
        highlighted: snap.highlighted,
        drag: snap.drag.map(DragSnapshot::from),
        score: snap.score,
        combo: snap.combo,
        matches: snap.matches,
        time_left: snap.time_left,
        final_score: snap.final_score,
        last_commit: snap.last_commit.map(CommitSnapshot::from),
        state_hash: StateHash::of(snap),
    }
}

/// Milliseconds since the Unix epoch
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
