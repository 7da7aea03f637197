use freccette_types::{ConfirmationRequest, ConfirmationToken, GameError, PendingAction};
use uuid::Uuid;

/// Holds the destructive action waiting for the user's go-ahead.
///
/// Only one request is pending at a time; a new request replaces the
/// previous one and invalidates its token.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    pending: Option<ConfirmationRequest>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, action: PendingAction) -> ConfirmationRequest {
        let request = ConfirmationRequest {
            token: Uuid::new_v4(),
            description: action.describe(),
            action,
        };
        self.pending = Some(request.clone());
        request
    }

    /// Take the pending action if `token` matches it
    pub fn confirm(&mut self, token: ConfirmationToken) -> Result<PendingAction, GameError> {
        match self.pending.take() {
            Some(request) if request.token == token => Ok(request.action),
            other => {
                self.pending = other;
                Err(GameError::ConfirmationNotFound)
            }
        }
    }

    pub fn cancel(&mut self, token: ConfirmationToken) -> Result<(), GameError> {
        self.confirm(token).map(|_| ())
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
