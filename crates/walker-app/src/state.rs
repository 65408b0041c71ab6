//! State shared between the navigation loop thread and its front end.

use std::sync::{Arc, Mutex};

use walker_core::commands::NavigatorCommand;
use walker_core::state::TraversalSnapshot;

/// Commands sent from the front end to the navigation loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A navigator command to apply to the traversal engine.
    Navigator(NavigatorCommand),
    /// Shut down the navigation loop thread gracefully.
    Shutdown,
}

impl From<NavigatorCommand> for LoopCommand {
    fn from(command: NavigatorCommand) -> Self {
        LoopCommand::Navigator(command)
    }
}

/// Latest snapshot published by the loop after every iteration.
///
/// `None` until the loop has run once.
pub type SharedSnapshot = Arc<Mutex<Option<TraversalSnapshot>>>;

/// Parse one line of keyboard input into a loop command.
///
/// `p` or a lone space toggles pause, `r` resets, `q` quits. Speed names
/// (`walk`, `run`, ...) change the speed. Anything else is ignored.
pub fn parse_key_command(line: &str) -> Option<LoopCommand> {
    if line == " " {
        return Some(NavigatorCommand::TogglePause.into());
    }
    match line.trim() {
        "p" => Some(NavigatorCommand::TogglePause.into()),
        "r" => Some(NavigatorCommand::Reset.into()),
        "q" => Some(LoopCommand::Shutdown),
        other => other
            .parse()
            .ok()
            .map(|speed| NavigatorCommand::SetSpeed { speed }.into()),
    }
}
