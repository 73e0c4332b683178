pub mod deck;
pub mod dispatcher;
pub mod gesture;
pub mod input;
pub mod machine;
pub mod session;

pub use deck::Deck;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use gesture::{Direction, GestureEvent, Offset, Verdict};
pub use input::{parse_line, Command, SessionInput};
pub use machine::{Commit, Decision, EngineConfig, EngineSnapshot, Phase, SwipeMachine};
pub use session::{SessionReport, SwipeSession};
