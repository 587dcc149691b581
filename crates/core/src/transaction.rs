//! Confirm-then-commit helper for local changes that mirror a remote call.
//!
//! A [`Transaction`] carries an intent while the remote request is in flight.
//! Local state is only touched once the request succeeds; on failure the
//! intent is dropped and local state stays exactly as it was.

use std::{
    fmt::{Debug, Display},
    future::Future,
};

use tracing::{debug, info, warn};

/// A pending local change.
#[derive(Debug)]
pub(crate) struct Transaction<I> {
    label: &'static str,
    intent: I,
}

impl<I: Debug> Transaction<I> {
    pub(crate) fn begin(label: &'static str, intent: I) -> Self {
        debug!(label, ?intent, "transaction started");

        Self { label, intent }
    }

    /// Await remote confirmation of the intent.
    pub(crate) async fn confirm<T, E, F>(self, request: F) -> Result<Confirmed<I, T>, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        match request.await {
            Ok(response) => Ok(Confirmed {
                label: self.label,
                intent: self.intent,
                response,
            }),
            Err(error) => {
                warn!(label = self.label, intent = ?self.intent, "transaction rolled back: {error}");

                Err(error)
            }
        }
    }
}

/// An intent the remote side has accepted.
#[derive(Debug)]
pub(crate) struct Confirmed<I, T> {
    label: &'static str,
    intent: I,
    response: T,
}

impl<I: Debug, T> Confirmed<I, T> {
    /// Apply the confirmed intent to local state.
    pub(crate) fn commit<S, R>(self, state: &mut S, apply: impl FnOnce(&mut S, I, T) -> R) -> R {
        info!(label = self.label, intent = ?self.intent, "transaction committed");

        apply(state, self.intent, self.response)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn commit_applies_after_confirmation() -> TestResult {
        let mut state = vec![1, 2, 3];

        Transaction::begin("push", 4)
            .confirm(async { Ok::<_, String>(()) })
            .await?
            .commit(&mut state, |state, value, ()| state.push(value));

        assert_eq!(state, vec![1, 2, 3, 4]);

        Ok(())
    }

    #[tokio::test]
    async fn failure_leaves_state_untouched() {
        let mut state = vec![1, 2, 3];

        let result = Transaction::begin("push", 4)
            .confirm(async { Err::<(), _>("offline".to_string()) })
            .await
            .map(|confirmed| confirmed.commit(&mut state, |state, value, ()| state.push(value)));

        assert_eq!(result, Err("offline".to_string()));
        assert_eq!(state, vec![1, 2, 3]);
    }
}
