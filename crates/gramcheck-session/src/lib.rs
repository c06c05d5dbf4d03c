//! gramcheck-session — the interactive layer.
//!
//! Everything here is generic over `BufRead` + `Write` so the whole
//! interactive flow can be driven by scripted input in tests and by
//! stdin/stdout in the binary. Strictly single-threaded and synchronous;
//! the only blocking point is waiting for a line of input.

pub mod console;
pub mod present;
pub mod runner;
pub mod session;

pub use console::Console;
pub use runner::{RunOptions, RunOutcome};
pub use session::{Session, SessionConfig, SessionOutcome};
