use std::slice::Iter;

use super::errors::Error;

/// Ordered sink of recoverable parse errors.
///
/// The parser writes to it instead of halting; callers treat a non-empty
/// collector as a failed parse.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn report(&mut self, error: Error) {
        tracing::debug!(name = error.get_error_name(), %error, "recorded diagnostic");
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    /// Human readable messages, in the order they were reported.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
