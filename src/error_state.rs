//! Observable error state shared by list and form helpers.

use crate::error::FetchError;

/// `show_error` / `error_message` pair a UI binds to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    pub show_error: bool,
    pub error_message: String,
}

impl ErrorState {
    /// Mirror an optional error: present shows it, absent clears.
    pub fn observe(&mut self, error: Option<&FetchError>) {
        match error {
            Some(err) => self.set(err),
            None => self.clear(),
        }
    }

    pub fn set(&mut self, error: &FetchError) {
        self.show_error = true;
        self.error_message = error.message.clone();
    }

    pub fn clear(&mut self) {
        self.show_error = false;
        self.error_message.clear();
    }

    /// The message, when an error is showing.
    pub fn message(&self) -> Option<&str> {
        self.show_error.then_some(self.error_message.as_str())
    }
}
