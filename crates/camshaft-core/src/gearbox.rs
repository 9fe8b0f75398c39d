//! Gear selection over a fixed, ordered ratio list.
//!
//! Gears are numbered from 1 (shortest ratio) to N (tallest). Shifts move
//! exactly one step and clamp silently at either end; the caller decides
//! whether a clamped shift deserves a status message.

// ---------------------------------------------------------------------------
// Gearbox
// ---------------------------------------------------------------------------

/// Ratio table plus the currently engaged gear.
///
/// The current gear is 1-based to match how drivers (and the dashboard)
/// count gears.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gearbox {
    ratios: Vec<f64>,
    current: usize,
}

impl Default for Gearbox {
    /// Five-speed box of a small passenger car.
    fn default() -> Self {
        Self::new(vec![3.42, 2.14, 1.45, 1.00, 0.83])
    }
}

impl Gearbox {
    /// Create a gearbox from an ordered ratio list, engaged in first gear.
    ///
    /// # Panics
    ///
    /// Panics if `ratios` is empty.
    pub fn new(ratios: Vec<f64>) -> Self {
        assert!(!ratios.is_empty(), "Gearbox requires at least one ratio");
        Self { ratios, current: 1 }
    }

    /// Ratio of the currently engaged gear.
    pub fn current_ratio(&self) -> f64 {
        self.ratios[self.current - 1]
    }

    /// The full ratio table, shortest gear first.
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Currently engaged gear, 1-based.
    pub fn current_gear(&self) -> usize {
        self.current
    }

    /// Total number of gears.
    pub fn gear_count(&self) -> usize {
        self.ratios.len()
    }

    /// Whether the tallest gear is engaged.
    pub fn in_top_gear(&self) -> bool {
        self.current == self.ratios.len()
    }

    /// Whether first gear is engaged.
    pub fn in_bottom_gear(&self) -> bool {
        self.current == 1
    }

    /// Move one gear up; no-op in top gear.
    pub fn shift_up(&mut self) {
        if self.current < self.ratios.len() {
            self.current += 1;
        }
    }

    /// Move one gear down; no-op in first gear.
    pub fn shift_down(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
