//! Core enums used throughout the application.

/// Result text shown while a fresh roster awaits its first spin.
pub const PROMPT_TEXT: &str = "Spin the wheel!";

/// Current pick state.
///
/// Three-valued on purpose: "no selection" and "awaiting the first spin of a
/// fresh roster" are distinct states and must not collapse into one option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No selection (cleared, or a spin is in flight).
    #[default]
    Empty,
    /// Fresh roster, prompting for the first spin.
    Prompt,
    /// An active pick.
    Picked(String),
}

impl Selection {
    /// The active pick, if any.
    pub fn picked(&self) -> Option<&str> {
        match self {
            Selection::Picked(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_picked(&self) -> bool {
        matches!(self, Selection::Picked(_))
    }

    /// Encoding for the `selectedItem` persistence key (plain string).
    pub fn encode(&self) -> String {
        match self {
            Selection::Empty => "null".to_string(),
            Selection::Prompt => PROMPT_TEXT.to_string(),
            Selection::Picked(name) => name.clone(),
        }
    }

    /// Inverse of [`Selection::encode`]. Absent values decode as `Empty`.
    pub fn decode(raw: &str) -> Self {
        match raw {
            "" | "null" => Selection::Empty,
            PROMPT_TEXT => Selection::Prompt,
            name => Selection::Picked(name.to_string()),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Empty => Ok(()),
            Selection::Prompt => write!(f, "{}", PROMPT_TEXT),
            Selection::Picked(name) => write!(f, "{}", name),
        }
    }
}

/// Run clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Initial and terminal-per-run state.
    #[default]
    Idle,
    /// Counting down from the configured run duration.
    CountingDown,
    /// Countdown hit zero; overtime accumulates.
    Overtime,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::CountingDown => write!(f, "counting down"),
            RunState::Overtime => write!(f, "overtime"),
        }
    }
}

/// Direction of a roster-editor column transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickDirection {
    /// Add the entry to the pending selection.
    Include,
    /// Remove the entry from the pending selection.
    Exclude,
}

/// Which primary action the presentation layer should offer.
///
/// Routing preserved from the original widget: a single remaining candidate
/// ends the run rather than winning a deterministic spin, and an empty
/// candidate list routes to the roster-reset flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Spin,
    EndRun,
    Reset,
}

impl PrimaryAction {
    /// Routing policy by candidate count.
    pub fn for_count(candidates: usize) -> Self {
        match candidates {
            0 => PrimaryAction::Reset,
            1 => PrimaryAction::EndRun,
            _ => PrimaryAction::Spin,
        }
    }
}

/// Display classification of the remaining-time readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownColor {
    /// More than ten minutes remaining.
    Green,
    /// Five to ten minutes remaining.
    Orange,
    /// Under five minutes remaining.
    Red,
    /// Countdown at zero, within the one-minute grace window.
    RedFinished,
    /// Overtime passed one minute; the readout is gone.
    Hidden,
}

impl std::fmt::Display for CountdownColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountdownColor::Green => write!(f, "green"),
            CountdownColor::Orange => write!(f, "orange"),
            CountdownColor::Red => write!(f, "red"),
            CountdownColor::RedFinished => write!(f, "red finished"),
            CountdownColor::Hidden => write!(f, "hidden"),
        }
    }
}
