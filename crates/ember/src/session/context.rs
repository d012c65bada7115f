//! Session
//!
//! The explicit context a running Ember instance works through: the entity
//! registry (with the main entity's command history), the router, the
//! interpreter and the presenter. Every operation takes `&mut self`, so a
//! single driver owns all mutable state and no locking is needed.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    ChildEntity, ChildId, CommandHistory, CommandMode, EmberError, MatchMode, Position,
    DEFAULT_MAX_EXCHANGES,
};
use crate::ports::{CommandCapture, Interpreter, Presenter, ProcessCommandRequest};
use crate::routing::{strategy_for, CommandRouter, DispatchOutcome};

use super::EntityRegistry;

/// Fixed time `listen` waits for an utterance
pub const DEFAULT_LISTEN_WINDOW: Duration = Duration::from_secs(10);

/// Reply when the interpreter could not be reached or understood
pub const INTERPRET_ERROR_MESSAGE: &str = "An error occurred while processing the command.";

/// Reply when capturing a spoken command failed
pub const LISTEN_ERROR_MESSAGE: &str =
    "An error occurred while processing your speech. Please try again.";

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub mode: CommandMode,
    pub match_mode: MatchMode,
    /// `None` keeps the whole history
    pub history_limit: Option<usize>,
    pub listen_window: Duration,
    pub origin: Position,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: CommandMode::default(),
            match_mode: MatchMode::default(),
            history_limit: Some(DEFAULT_MAX_EXCHANGES),
            listen_window: DEFAULT_LISTEN_WINDOW,
            origin: Position::default(),
        }
    }
}

pub struct Session {
    registry: EntityRegistry,
    router: CommandRouter,
    interpreter: Arc<dyn Interpreter>,
    presenter: Arc<dyn Presenter>,
    mode: CommandMode,
    listen_window: Duration,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        interpreter: Arc<dyn Interpreter>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let history = CommandHistory::with_limit(config.history_limit);
        Self {
            registry: EntityRegistry::new(config.origin, history),
            router: CommandRouter::new(interpreter.clone(), strategy_for(config.match_mode)),
            interpreter,
            presenter,
            mode: config.mode,
            listen_window: config.listen_window,
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn mode(&self) -> CommandMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CommandMode) {
        self.mode = mode;
    }

    pub fn listen_window(&self) -> Duration {
        self.listen_window
    }

    pub fn history(&self) -> &CommandHistory {
        self.registry.main().history()
    }

    pub fn children(&self) -> &[ChildEntity] {
        self.registry.children()
    }

    pub fn child(&self, id: ChildId) -> Result<&ChildEntity, EmberError> {
        self.registry.child(id)
    }

    /// Split the main entity and load the new child's available functions.
    ///
    /// A failed load is logged and leaves the child with no functions.
    pub async fn spawn_child(&mut self) -> ChildId {
        let id = self.registry.split();
        if let Err(e) = self.reload_functions(id).await {
            tracing::error!("Error loading available functions: {}", e);
        }
        tracing::info!(
            "Created child entity {} ({} children)",
            id,
            self.registry.children().len()
        );
        id
    }

    /// Fetch the available functions of a child again
    pub async fn reload_functions(&mut self, id: ChildId) -> Result<usize, EmberError> {
        self.registry.child(id)?;
        let functions = self.interpreter.available_functions().await?;
        let count = functions.len();
        self.registry.child_mut(id)?.set_available_functions(functions);
        Ok(count)
    }

    pub fn rename_child(&mut self, id: ChildId, name: impl Into<String>) -> Result<(), EmberError> {
        self.registry.rename_child(id, name)
    }

    pub fn describe_child(
        &mut self,
        id: ChildId,
        description: impl Into<String>,
    ) -> Result<(), EmberError> {
        self.registry.describe_child(id, description)
    }

    pub fn assign_function(&mut self, id: ChildId, function_name: &str) -> Result<bool, EmberError> {
        self.registry.assign_function(id, function_name)
    }

    pub fn remove_function(&mut self, id: ChildId, function_name: &str) -> Result<bool, EmberError> {
        self.registry.remove_function(id, function_name)
    }

    pub fn find_child_by_name(&self, name: &str) -> Option<ChildId> {
        self.registry.find_child_by_name(name)
    }

    /// Handle a top-level command with the active mode.
    ///
    /// Only blank input is an error; remote failures come back as reply
    /// text. The command is forwarded exactly as given.
    pub async fn handle_command(&mut self, command: &str) -> Result<String, EmberError> {
        if command.trim().is_empty() {
            return Err(EmberError::EmptyCommand);
        }
        tracing::info!("Main entity received command: {}", command);

        let reply = match self.mode {
            CommandMode::Route => self.route_command(command).await.summary(),
            CommandMode::Interpret => self.interpret_command(command).await,
        };
        Ok(reply)
    }

    /// Match children locally and deliver the command to each match
    pub async fn route_command(&mut self, command: &str) -> DispatchOutcome {
        let main = self.registry.main();
        let relevant = self.router.select_relevant(command, main);
        tracing::debug!("Relevant children: {:?}", relevant);
        self.router
            .dispatch(command, main, &relevant, self.presenter.as_ref())
            .await
    }

    /// Ask the interpreter, recording the exchange on success
    pub async fn interpret_command(&mut self, command: &str) -> String {
        let request = ProcessCommandRequest {
            command: command.to_string(),
            chat_history: Some(self.history().to_vec()),
            child_entities: self.registry.snapshot(),
        };
        tracing::debug!("Child entities: {:?}", request.child_entities);

        let response = match self.interpreter.process_command(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error processing command: {}", e);
                self.presenter.show_result(INTERPRET_ERROR_MESSAGE, &[]);
                return INTERPRET_ERROR_MESSAGE.to_string();
            }
        };

        self.registry
            .main_mut()
            .history_mut()
            .push_exchange(command, response.response.clone());

        if response.records().is_empty() {
            tracing::debug!("No execution details received from interpreter");
        }
        for record in response.records() {
            tracing::info!("{}", record);
        }

        self.presenter
            .show_result(&response.response, response.records());
        response.response
    }

    /// Wait for one utterance within the listening window, then handle it
    pub async fn listen(&mut self, capture: &mut dyn CommandCapture) -> Result<String, EmberError> {
        tracing::info!("Listening for {:?}...", self.listen_window);

        let heard = match tokio::time::timeout(self.listen_window, capture.capture()).await {
            Ok(Ok(Some(text))) => text,
            Ok(Ok(None)) => {
                return Err(self.listen_failed(EmberError::Capture("input closed".to_string())))
            }
            Ok(Err(e)) => return Err(self.listen_failed(e)),
            Err(_) => return Err(self.listen_failed(EmberError::ListenTimeout(self.listen_window))),
        };

        tracing::info!("Recognized: {}", heard);
        self.handle_command(&heard).await
    }

    fn listen_failed(&self, error: EmberError) -> EmberError {
        tracing::warn!("Listening stopped: {}", error);
        self.presenter.show_result(LISTEN_ERROR_MESSAGE, &[]);
        error
    }
}
