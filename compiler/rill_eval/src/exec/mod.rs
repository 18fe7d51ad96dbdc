//! Evaluation helpers shared by the interpreter.
//!
//! - `call`: argument count validation and parameter binding
//! - `control`: conditionals and `for` loop ranges

pub mod call;
pub mod control;
