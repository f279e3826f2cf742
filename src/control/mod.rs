//! Pure control logic: threshold rules and blink timing.

pub mod blink;
pub mod rules;
