//! UI components.

pub mod harvest;
