//! Positioned, colored dashboard layout.
//!
//! The dashboard is a fixed grid of labeled readouts in two columns,
//! overwritten in place every tick. Static chrome (title, separator,
//! controls reminder) is painted once; per-tick values repaint only their
//! own cells. Unit conversion and numeric truncation happen here, never in
//! the simulation.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use camshaft_core::engine::TransmissionMode;
use camshaft_core::snapshot::DisplaySnapshot;

// Column anchors of the two readout columns.
const LEFT_LABEL: u16 = 1;
const LEFT_VALUE: u16 = 24;
const RIGHT_LABEL: u16 = 41;
const RIGHT_VALUE: u16 = 64;

const CONTROLS_ROW: u16 = 15;
const STATUS_ROW: u16 = 16;
const PARK_ROW: u16 = 17;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Renders [`DisplaySnapshot`]s onto an alternate-screen terminal.
pub struct Dashboard {
    out: Stdout,
    chrome_drawn: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            chrome_drawn: false,
        }
    }

    /// Draw one frame.
    pub fn draw(&mut self, snapshot: &DisplaySnapshot) -> io::Result<()> {
        if !self.chrome_drawn {
            self.draw_chrome()?;
            self.chrome_drawn = true;
        }
        let s = snapshot;

        // Engine performance.
        let displacement_cc = (s.displacement * 1_000_000.0) as i64;
        self.left(2, "Displacement:", &format!("{displacement_cc} cc"), Color::Yellow)?;
        self.left(
            3,
            "Power Output:",
            &format!("{} kW", s.power_kw as i64),
            Color::Green,
        )?;
        self.left(
            4,
            "Torque:",
            &format!("{} Nm", s.torque_nm as i64),
            Color::Magenta,
        )?;
        self.left(
            5,
            "Thermal Efficiency:",
            &format!("{}%", (s.thermal_efficiency * 100.0) as i64),
            Color::Blue,
        )?;

        // Engine state.
        self.left(7, "RPM:", &format!("{}", s.rpm as i64), Color::Red)?;
        let temp_color = if s.temperature > 100.0 {
            Color::Red
        } else if s.temperature < 80.0 {
            Color::Blue
        } else {
            Color::Green
        };
        self.left(
            8,
            "Engine Temperature:",
            &format!("{} °C", s.temperature as i64),
            temp_color,
        )?;
        let (water_text, water_color) = if s.water_injection {
            ("Active", Color::Green)
        } else {
            ("Inactive", Color::Yellow)
        };
        self.left(9, "Water Injection:", water_text, water_color)?;

        // Vehicle dynamics.
        self.left(
            11,
            "Vehicle Speed:",
            &format!("{} km/h", (s.vehicle_speed * 3.6) as i64),
            Color::Yellow,
        )?;
        self.left(12, "Current Gear:", &s.gear.to_string(), Color::Magenta)?;
        self.left(
            13,
            "Acceleration:",
            &format!("{} m/s²", clipped(s.acceleration, 6)),
            Color::Blue,
        )?;
        let (mode_text, mode_color) = match s.transmission_mode {
            TransmissionMode::Automatic => ("Automatic", Color::Green),
            TransmissionMode::Manual => ("Manual", Color::Yellow),
        };
        self.left(14, "Transmission Mode:", mode_text, mode_color)?;

        // Emissions and efficiency.
        self.right(
            2,
            "NOx Emissions:",
            &format!("{} g/kWh", clipped(s.nox_emissions, 5)),
            Color::Red,
        )?;
        self.right(
            3,
            "CO2 Emissions:",
            &format!("{} g/km", s.co2_emissions as i64),
            Color::Yellow,
        )?;
        self.right(
            4,
            "BSFC:",
            &format!("{} g/kWh", clipped(s.bsfc, 6)),
            Color::Magenta,
        )?;
        self.right(
            5,
            "Volumetric Efficiency:",
            &format!("{}%", (s.volumetric_efficiency * 100.0) as i64),
            Color::Green,
        )?;

        // Loop health.
        self.right(7, "FPS:", &format!("{}", s.fps as i64), Color::Cyan)?;
        self.right(
            8,
            "Jerk:",
            &format!("{} m/s³", clipped(s.jerk, 6)),
            Color::Blue,
        )?;

        self.draw_status(s)?;

        queue!(self.out, MoveTo(0, PARK_ROW))?;
        self.out.flush()
    }

    /// Title, separator, and the controls reminder. Painted once; nothing
    /// else writes to these rows.
    fn draw_chrome(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Blue),
            Print("Camshaft Engine Simulation"),
            SetAttribute(Attribute::Reset),
            MoveTo(0, 1),
            SetForegroundColor(Color::White),
            Print("=".repeat(50)),
            ResetColor,
            MoveTo(LEFT_LABEL, CONTROLS_ROW),
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::White),
            Print("Controls: "),
            SetAttribute(Attribute::Reset),
            Print("a: Accelerate | d: Decelerate | e: Upshift | q: Downshift | m: Mode | Esc: Quit"),
        )
    }

    /// Status row: the active notice, or a cleared line. The clear spans
    /// past the longest notice text so expiry leaves no tail behind.
    fn draw_status(&mut self, snapshot: &DisplaySnapshot) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(LEFT_LABEL, STATUS_ROW),
            Print(" ".repeat(70))
        )?;
        if let Some(notice) = &snapshot.notice {
            self.cell(
                STATUS_ROW,
                LEFT_LABEL,
                LEFT_VALUE,
                "Status:",
                &notice.text,
                Color::White,
            )?;
        }
        Ok(())
    }

    fn left(&mut self, row: u16, label: &str, value: &str, color: Color) -> io::Result<()> {
        self.cell(row, LEFT_LABEL, LEFT_VALUE, label, value, color)
    }

    fn right(&mut self, row: u16, label: &str, value: &str, color: Color) -> io::Result<()> {
        self.cell(row, RIGHT_LABEL, RIGHT_VALUE, label, value, color)
    }

    /// One labeled readout: bold cyan label, fixed-width right-aligned value.
    fn cell(
        &mut self,
        row: u16,
        label_col: u16,
        value_col: u16,
        label: &str,
        value: &str,
        color: Color,
    ) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(label_col, row),
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Cyan),
            Print(format!("{label:<22}")),
            SetAttribute(Attribute::Reset),
            MoveTo(value_col, row),
            SetForegroundColor(color),
            Print(format!("{value:>15}")),
            ResetColor,
        )
    }
}

/// Leading characters of the six-decimal rendering of `value`, for the
/// fixed-width numeric cells the layout was designed around.
fn clipped(value: f64, chars: usize) -> String {
    let mut text = format!("{value:.6}");
    text.truncate(chars);
    text
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_keeps_sign_and_point() {
        assert_eq!(clipped(0.532, 5), "0.532");
        assert_eq!(clipped(123.456789, 6), "123.45");
        assert_eq!(clipped(-12.3, 6), "-12.30");
    }

    #[test]
    fn clipped_pads_nothing() {
        assert_eq!(clipped(0.5, 6), "0.5000");
        assert_eq!(clipped(-500.0, 6), "-500.0");
    }
}
