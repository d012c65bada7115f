//! Command Router
//!
//! Selects the children a command is meant for and delivers it to them one
//! at a time. Matching is delegated to a `MatchStrategy`; capability
//! execution goes through the `Interpreter` port.
//!
//! Remote failures never escape the router: they are logged and turned into
//! reply text.

use std::sync::Arc;

use serde_json::json;

use super::MatchStrategy;
use crate::domain::{value_text, ChildEntity, ChildId, MainEntity};
use crate::ports::{Interpreter, Presenter};

/// Reply when no child matched the command
pub const NO_RELEVANT_CHILD_MESSAGE: &str = "I couldn't find a child entity to handle this command.";

/// Reply when a child has no assigned label matching the command
pub const UNPROCESSED_MESSAGE: &str = "I couldn't process this command.";

/// Reply of one child to a routed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildReply {
    pub child: ChildId,
    pub name: String,
    pub reply: String,
}

/// Result of dispatching a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing matched; no remote call was made
    NoRelevantChild,
    /// Replies in roster order
    Delivered(Vec<ChildReply>),
}

impl DispatchOutcome {
    /// Text shown for the whole dispatch
    pub fn summary(&self) -> String {
        match self {
            DispatchOutcome::NoRelevantChild => NO_RELEVANT_CHILD_MESSAGE.to_string(),
            DispatchOutcome::Delivered(replies) => replies
                .iter()
                .map(|r| format!("{}: {}", r.name, r.reply))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

pub struct CommandRouter {
    interpreter: Arc<dyn Interpreter>,
    matcher: Box<dyn MatchStrategy>,
}

impl CommandRouter {
    pub fn new(interpreter: Arc<dyn Interpreter>, matcher: Box<dyn MatchStrategy>) -> Self {
        Self {
            interpreter,
            matcher,
        }
    }

    /// Whether a single child should receive the command
    pub fn is_relevant(&self, command: &str, child: &ChildEntity) -> bool {
        child
            .assigned_functions()
            .iter()
            .any(|label| self.matcher.matches(command, label))
            || (!child.description.is_empty() && self.matcher.matches(command, &child.description))
    }

    /// Children whose labels or description match, in roster order
    pub fn select_relevant(&self, command: &str, main: &MainEntity) -> Vec<ChildId> {
        main.iter_children()
            .filter(|(_, child)| self.is_relevant(command, child))
            .map(|(id, _)| id)
            .collect()
    }

    /// Deliver the command to each relevant child in turn.
    ///
    /// The presenter sees the main entity move to each child, every reply as
    /// it arrives, and the move back to the origin at the end.
    pub async fn dispatch(
        &self,
        command: &str,
        main: &MainEntity,
        relevant: &[ChildId],
        presenter: &dyn Presenter,
    ) -> DispatchOutcome {
        if relevant.is_empty() {
            tracing::info!("No relevant child entities found for the command");
            presenter.show_result(NO_RELEVANT_CHILD_MESSAGE, &[]);
            return DispatchOutcome::NoRelevantChild;
        }

        let origin = main.position;
        let mut replies = Vec::with_capacity(relevant.len());

        for &id in relevant {
            let Some(child) = main.child(id) else {
                tracing::warn!("Child {} not in roster, skipping", id);
                continue;
            };
            let name = child.display_name(id);

            presenter.entity_moved(child.position);
            tracing::info!("Communicating with child {} about: {}", name, command);

            let reply = self.child_process(command, child.assigned_functions()).await;
            presenter.show_result(&reply, &[]);
            replies.push(ChildReply {
                child: id,
                name,
                reply,
            });
        }

        presenter.entity_moved(origin);
        DispatchOutcome::Delivered(replies)
    }

    /// Execute the first assigned label the command mentions.
    ///
    /// First match in assignment order wins; at most one capability runs.
    pub async fn child_process(&self, command: &str, assigned_functions: &[String]) -> String {
        let Some(function_name) = assigned_functions
            .iter()
            .find(|label| self.matcher.matches(command, label))
        else {
            tracing::debug!("No assigned function matches: {}", command);
            return UNPROCESSED_MESSAGE.to_string();
        };

        tracing::info!("Executing function: {}", function_name);
        self.execute(function_name, command).await
    }

    async fn execute(&self, function_name: &str, command: &str) -> String {
        let args = json!({ "command": command });
        match self.interpreter.execute_function(function_name, &args).await {
            Ok(result) => format!("The result of {} is {}", function_name, value_text(&result)),
            Err(e) => {
                tracing::error!("Error executing function {}: {}", function_name, e);
                format!("Error executing {}: {}", function_name, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommandHistory, Position};
    use crate::routing::{SubstringMatch, WordMatch};
    use crate::testing::{Call, MockInterpreter, RecordingPresenter};

    const LABELS: &[&str] = &["weather", "news", "count_words", "add_numbers"];

    fn router(mock: &Arc<MockInterpreter>) -> CommandRouter {
        CommandRouter::new(mock.clone(), Box::new(SubstringMatch))
    }

    fn main_with(children: Vec<(&str, Vec<&str>)>) -> MainEntity {
        let mut main = MainEntity::new(Position::default(), CommandHistory::default());
        for (description, labels) in children {
            let id = main.split();
            let child = main.child_mut(id).unwrap();
            child.set_available_functions(LABELS.iter().map(|s| s.to_string()).collect());
            child.description = description.to_string();
            for label in labels {
                child.assign_function(label);
            }
        }
        main
    }

    #[test]
    fn test_select_by_label_and_description() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let main = main_with(vec![
            ("", vec!["weather"]),
            ("", vec!["news"]),
            ("headline reader", vec![]),
        ]);
        let router = router(&mock);

        assert_eq!(
            router.select_relevant("What's the Weather today", &main),
            vec![ChildId(0)]
        );
        assert_eq!(
            router.select_relevant("any headline reader around? news please", &main),
            vec![ChildId(1), ChildId(2)]
        );
    }

    #[test]
    fn test_empty_description_never_matches() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let main = main_with(vec![("", vec![])]);
        assert!(router(&mock).select_relevant("anything at all", &main).is_empty());
    }

    #[test]
    fn test_selected_children_always_match() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let main = main_with(vec![
            ("", vec!["weather", "news"]),
            ("sports desk", vec!["count_words"]),
            ("", vec![]),
            ("", vec!["add_numbers"]),
        ]);
        let router = router(&mock);

        for command in [
            "weather",
            "sports desk count_words",
            "please add_numbers 2 and 3",
            "nothing here",
            "NEWS",
        ] {
            let selected = router.select_relevant(command, &main);
            for (id, child) in main.iter_children() {
                let matched = child
                    .assigned_functions()
                    .iter()
                    .any(|l| command.to_lowercase().contains(&l.to_lowercase()))
                    || (!child.description.is_empty()
                        && command
                            .to_lowercase()
                            .contains(&child.description.to_lowercase()));
                assert_eq!(selected.contains(&id), matched, "{command} / {id}");
            }
        }
    }

    #[tokio::test]
    async fn test_child_process_first_label_wins() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let router = router(&mock);
        let assigned = vec!["weather".to_string(), "news".to_string()];

        let reply = router
            .child_process("what's the weather today, any news?", &assigned)
            .await;
        assert_eq!(reply, "The result of weather is weather ok");

        let again = router
            .child_process("what's the weather today, any news?", &assigned)
            .await;
        assert_eq!(reply, again);
        assert_eq!(
            mock.calls(),
            vec![
                Call::ExecuteFunction(
                    "weather".to_string(),
                    json!({"command": "what's the weather today, any news?"})
                );
                2
            ]
        );
    }

    #[tokio::test]
    async fn test_child_process_without_match() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let reply = router(&mock)
            .child_process("play music", &["weather".to_string()])
            .await;
        assert_eq!(reply, UNPROCESSED_MESSAGE);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_child_process_failure_is_soft() {
        let mock = Arc::new(MockInterpreter::failing());
        let reply = router(&mock)
            .child_process("weather", &["weather".to_string()])
            .await;
        assert_eq!(reply, "Error executing weather: boom");
    }

    #[tokio::test]
    async fn test_dispatch_without_relevant_children_makes_no_calls() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let presenter = RecordingPresenter::default();
        let main = main_with(vec![("", vec!["weather"])]);
        let router = router(&mock);

        let relevant = router.select_relevant("play music", &main);
        let outcome = router.dispatch("play music", &main, &relevant, &presenter).await;

        assert_eq!(outcome, DispatchOutcome::NoRelevantChild);
        assert_eq!(outcome.summary(), NO_RELEVANT_CHILD_MESSAGE);
        assert_eq!(presenter.results(), vec![NO_RELEVANT_CHILD_MESSAGE.to_string()]);
        assert!(mock.calls().is_empty());
        assert!(presenter.moves().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_visits_children_in_order_and_returns() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let presenter = RecordingPresenter::default();
        let mut main = main_with(vec![("", vec!["news"]), ("", vec!["weather"])]);
        main.child_mut(ChildId(0)).unwrap().name = "Reader".to_string();
        main.child_mut(ChildId(1)).unwrap().name = "Forecaster".to_string();
        let router = router(&mock);

        let command = "weather and news";
        let relevant = router.select_relevant(command, &main);
        let outcome = router.dispatch(command, &main, &relevant, &presenter).await;

        let DispatchOutcome::Delivered(replies) = outcome else {
            panic!("expected replies");
        };
        let names: Vec<&str> = replies.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Reader", "Forecaster"]);
        assert_eq!(
            presenter.moves(),
            vec![
                main.child(ChildId(0)).unwrap().position,
                main.child(ChildId(1)).unwrap().position,
                main.position,
            ]
        );
        assert_eq!(
            presenter.results(),
            vec![
                "The result of news is news ok".to_string(),
                "The result of weather is weather ok".to_string()
            ]
        );
    }

    #[test]
    fn test_word_strategy_changes_selection_only() {
        let mock = Arc::new(MockInterpreter::new(LABELS));
        let main = main_with(vec![("", vec!["weather"])]);
        let router = CommandRouter::new(mock.clone(), Box::new(WordMatch));
        assert!(router.select_relevant("weatherproof jacket", &main).is_empty());
        assert_eq!(router.select_relevant("weather now", &main), vec![ChildId(0)]);
    }
}
