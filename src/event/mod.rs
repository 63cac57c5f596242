pub mod types;
pub mod watcher;
pub mod queue;

pub use types::*;
pub use watcher::WorldWatcher;
pub use queue::{create_event_queue, EventSender, EventReceiver};
