//! Test doubles shared by the unit tests.
use crate::command::{Command, CommandRunner};
use crate::error::{Error, Result};
use std::cell::RefCell;

/// Replays one canned response and records every command it is asked to run.
pub(crate) struct FakeRunner {
    response: RefCell<Option<Result<String>>>,
    pub(crate) calls: RefCell<Vec<Command>>,
}

impl FakeRunner {
    pub(crate) fn ok(output: &str) -> Self {
        Self::with(Ok(output.to_string()))
    }

    pub(crate) fn err(error: Error) -> Self {
        Self::with(Err(error))
    }

    fn with(response: Result<String>) -> Self {
        Self {
            response: RefCell::new(Some(response)),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn only_call(&self) -> Command {
        let calls = self.calls.borrow();
        assert_eq!(calls.len(), 1, "expected exactly one command, got {calls:?}");
        calls[0].clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &Command) -> Result<String> {
        self.calls.borrow_mut().push(command.clone());
        self.response
            .borrow_mut()
            .take()
            .expect("FakeRunner called more than once")
    }
}
