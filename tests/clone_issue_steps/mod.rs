//! Step definitions for issue cloning scenarios.

mod given;
mod then;
mod when;
