//! Front ends that translate user input into session actions.

pub mod console;
pub mod csv;
