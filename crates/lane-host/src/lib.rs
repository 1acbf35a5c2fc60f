pub mod headless;
pub mod runner;
pub mod script;

pub use headless::{run, RunReport, TimedEvent};
pub use runner::GameRunner;
pub use script::{InputScript, ScriptEntry};
