//! Control signals fed into the simulation, one per tick at most.
//!
//! Commands mutate the engine at the tick boundary, before the dynamics
//! integration, so a tick always sees a consistent pre-command or
//! post-command state and never a half-applied one.

// ---------------------------------------------------------------------------
// ControlCommand
// ---------------------------------------------------------------------------

/// A single driver input applied at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ControlCommand {
    /// Throttle tap: rpm step up with engine warm-up.
    Accelerate,
    /// Engine braking: rpm step down with slow cool-down.
    Decelerate,
    /// Manual upshift (ignored outside Manual mode).
    ShiftUp,
    /// Manual downshift (ignored outside Manual mode).
    ShiftDown,
    /// Flip between Automatic and Manual transmission.
    ToggleMode,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// What a cockpit poll can yield.
///
/// `Quit` exists because raw-mode terminals swallow Ctrl+C; the frontend
/// maps its quit keys to this and the runner exits cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A driver control to apply this tick.
    Command(ControlCommand),
    /// Stop the loop and tear down.
    Quit,
}
