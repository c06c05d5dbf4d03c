//! The default command: run an interactive quiz session on stdin/stdout.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use gramcheck_session::{Session, SessionConfig, SessionOutcome};

pub fn execute(data_dir: PathBuf) -> Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let config = SessionConfig::new(data_dir);
    let mut session = Session::new(config, stdin.lock(), stdout.lock());
    match session.run()? {
        SessionOutcome::Finished => Ok(0),
        SessionOutcome::NoData => Ok(1),
    }
}
