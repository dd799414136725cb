pub mod error;
pub mod inspector;
pub mod logging;
pub mod session;

pub use error::{Result, SessionError};
pub use session::{Outcome, run};
