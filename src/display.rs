//! Display presenter — formats readings and backend messages into
//! fixed-width lines for the 4×20 character LCD.
//!
//! Pure string work, no device access: every function returns padded
//! [`Line`]s and the caller pushes them through the `DisplayPort`. Each line
//! is always exactly [`LINE_WIDTH`] characters (space-padded), so a shorter
//! write never leaves stale characters from a previous longer one visible.

use core::fmt::Write;

use crate::sensors::Reading;

/// Character columns per LCD row.
pub const LINE_WIDTH: usize = 20;
/// LCD rows.
pub const ROWS: usize = 4;

/// One padded display line.
pub type Line = heapless::String<LINE_WIDTH>;

/// Rows claimed by a backend quote (label + content).
pub const QUOTE_ROWS: (usize, usize) = (0, 1);
/// Rows claimed by a backend mail summary (label + content).
pub const SUMMARY_ROWS: (usize, usize) = (2, 3);

/// Truncate to the line width (no wrapping) and pad with trailing spaces.
pub fn pad_line(text: &str) -> Line {
    let mut line = Line::new();
    for c in text.chars().take(LINE_WIDTH) {
        if line.push(c).is_err() {
            break;
        }
    }
    while line.push(' ').is_ok() {}
    line
}

/// Render the normal four-row readings screen.
///
/// Falls back to the fault screen if the reading is climate-faulted —
/// callers are expected to have checked already, but a stale `T:`/`H:` pair
/// must never be shown for a faulted cycle.
pub fn render_readings(r: &Reading) -> [Line; ROWS] {
    let (Some(t), Some(h)) = (r.temperature_c, r.humidity_pct) else {
        return render_fault();
    };

    let light_status = if r.light_digital { "LOW" } else { "HIGH" };
    let motion_status = if r.motion_detected {
        "Motion Detected"
    } else {
        "No Motion"
    };

    let mut row0: heapless::String<40> = heapless::String::new();
    let _ = write!(row0, "T:{t:4.1}C  H:{h:4.1}%  L:{:3}%", r.light_percent);
    let mut row2: heapless::String<40> = heapless::String::new();
    let _ = write!(
        row2,
        "NOx:{:3}% Raw:{:4}",
        r.air_quality_percent, r.air_quality_raw
    );
    let mut row1: heapless::String<40> = heapless::String::new();
    let _ = write!(row1, "Light Level: {light_status}");
    let mut row3: heapless::String<40> = heapless::String::new();
    let _ = write!(row3, "PIR: {motion_status}");

    [
        pad_line(&row0),
        pad_line(&row1),
        pad_line(&row2),
        pad_line(&row3),
    ]
}

/// DHT fault screen: the two diagnostic rows plus two cleared rows.
pub fn render_fault() -> [Line; ROWS] {
    [
        pad_line("DHT22 Error"),
        pad_line("Check wiring"),
        pad_line(""),
        pad_line(""),
    ]
}

/// Boot splash shown while peripherals come up.
pub fn render_splash() -> [Line; ROWS] {
    [
        pad_line("Sensors Initializing"),
        pad_line(""),
        pad_line(""),
        pad_line(""),
    ]
}

/// Render a backend quote onto its two rows: label + truncated content.
pub fn render_quote(text: &str) -> [(usize, Line); 2] {
    [
        (QUOTE_ROWS.0, pad_line("Quote:")),
        (QUOTE_ROWS.1, pad_line(text)),
    ]
}

/// Render a mail summary onto its two rows: label + truncated content.
pub fn render_summary(text: &str) -> [(usize, Line); 2] {
    [
        (SUMMARY_ROWS.0, pad_line("Mail:")),
        (SUMMARY_ROWS.1, pad_line(text)),
    ]
}
