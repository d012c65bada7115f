//! Ember Domain Library
//!
//! Core types for a main entity that spawns child entities, assigns them
//! capability labels, and routes free-text commands to them.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: MainEntity, ChildEntity, CommandHistory, ExecutionRecord
//!   - `value_objects/`: Position, MatchMode, CommandMode
//!   - `errors/`: EmberError
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `Interpreter`: the remote command-interpretation service
//!   - `Presenter`: where replies and movement are shown
//!   - `CommandCapture`: a source of spoken commands
//!
//! - **Routing** (`routing/`): match strategies and the command router
//! - **Session** (`session/`): registry and the session context object
//! - **Services** (`services/`): HTTP implementation of `Interpreter`
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ember::{HttpInterpreter, Session, SessionConfig, SilentPresenter};
//!
//! let interpreter = Arc::new(HttpInterpreter::new("http://127.0.0.1:5000"));
//! let mut session = Session::new(SessionConfig::default(), interpreter, Arc::new(SilentPresenter));
//! let child = session.spawn_child().await;
//! session.assign_function(child, "count_words")?;
//! let reply = session.handle_command("count_words in this sentence").await?;
//! ```

pub mod domain;
pub mod ports;
pub mod routing;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use domain::{
    value_text, ChildEntity, ChildId, CommandHistory, CommandMode, EmberError, ExecutionRecord,
    HistoryEntry, HistoryRole, MainEntity, MatchMode, Position, DEFAULT_CHILD_NAME,
    DEFAULT_MAX_EXCHANGES,
};
pub use ports::{
    ChildSnapshot, CommandCapture, Interpreter, Presenter, ProcessCommandRequest,
    ProcessCommandResponse, SilentPresenter,
};
pub use routing::{
    strategy_for, ChildReply, CommandRouter, DispatchOutcome, MatchStrategy, SubstringMatch,
    WordMatch, NO_RELEVANT_CHILD_MESSAGE, UNPROCESSED_MESSAGE,
};
pub use services::HttpInterpreter;
pub use session::{
    EntityRegistry, Session, SessionConfig, DEFAULT_LISTEN_WINDOW,
    INTERPRET_ERROR_MESSAGE, LISTEN_ERROR_MESSAGE,
};
