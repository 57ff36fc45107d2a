//! Forest Plot - Non-inferiority Forest Plot Renderer
//!
//! Library surface shared by the binary and the integration tests. The
//! interactive `gui` module lives on the binary side.

pub mod charts;
pub mod data;
pub mod logging;
pub mod stats;
