use std::time::Duration;

use tokio::task::JoinSet;
use tracing::Instrument;
use vigil_core::{
    CheckId, CheckStore, Payload, PhoneNumber, StoreError, TokenService, UserStore,
    validation::PHONE_NUMBER_KEY,
};

use crate::{
    error::{UserOperationError, messages},
    use_cases::authorize::AuthorizationGate,
};

/// How long a single check deletion may take before it counts as failed.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// The outcome of deleting one check owned by a deleted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckDeletion {
    Deleted,
    NotFound,
    StoreError(String),
}

/// Delete user use case - removes a user and every check it owns
///
/// The user record goes first. Its checks are then deleted concurrently, one
/// task per check, and the use case resolves only once every task has
/// reported back. Any check that was not deleted turns the whole operation
/// into a single `Internal` failure.
///
/// The cascade is best-effort: once the user record is gone, nothing restores
/// it when check deletions fail.
pub struct DeleteUserUseCase<U, C, T> {
    user_store: U,
    check_store: C,
    gate: AuthorizationGate<T>,
    check_timeout: Duration,
}

impl<U, C, T> DeleteUserUseCase<U, C, T>
where
    U: UserStore,
    C: CheckStore + Clone + 'static,
    T: TokenService,
{
    pub fn new(user_store: U, check_store: C, token_service: T) -> Self {
        Self {
            user_store,
            check_store,
            gate: AuthorizationGate::new(token_service),
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    pub fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    /// Execute the delete user use case
    ///
    /// # Arguments
    /// * `payload` - Raw payload carrying `phoneNumber`
    /// * `token` - Raw `authorization` header value, if any
    ///
    /// # Returns
    /// Ok(()) once the user and all of its checks are gone, or the first
    /// failure that stopped the operation
    #[tracing::instrument(name = "DeleteUserUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        payload: &Payload,
        token: Option<&str>,
    ) -> Result<(), UserOperationError> {
        let phone_number = PhoneNumber::parse(payload.get(PHONE_NUMBER_KEY)).ok_or(
            UserOperationError::Validation(messages::MISSING_REQUIRED_FIELDS),
        )?;

        self.gate.require(token, &phone_number).await?;

        let user = match self.user_store.read_user(&phone_number).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(UserOperationError::NotFound),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read user");
                return Err(UserOperationError::Internal(messages::READ_FAILED));
            }
        };

        self.user_store
            .delete_user(&phone_number)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, phone_number = %phone_number, "Failed to delete user");
                UserOperationError::Internal(messages::DELETE_USER_FAILED)
            })?;

        if user.checks().is_empty() {
            tracing::info!(phone_number = %phone_number, "User deleted");
            return Ok(());
        }

        self.delete_checks(user.checks()).await?;

        tracing::info!(
            phone_number = %phone_number,
            checks = user.checks().len(),
            "User and checks deleted"
        );
        Ok(())
    }

    async fn delete_checks(&self, check_ids: &[CheckId]) -> Result<(), UserOperationError> {
        let mut pending = JoinSet::new();

        for check_id in check_ids.iter().cloned() {
            let check_store = self.check_store.clone();
            let check_timeout = self.check_timeout;
            let span = tracing::info_span!("delete_check", check_id = %check_id);

            pending.spawn(
                async move {
                    let outcome =
                        tokio::time::timeout(check_timeout, delete_check(&check_store, &check_id))
                            .await
                            .unwrap_or_else(|_| {
                                CheckDeletion::StoreError(format!(
                                    "timed out after {check_timeout:?}"
                                ))
                            });
                    (check_id, outcome)
                }
                .instrument(span),
            );
        }

        // Outcomes arrive in completion order on this single consumer. The
        // loop ends only when every spawned task has been joined.
        let mut failed = 0usize;
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok((_, CheckDeletion::Deleted)) => {}
                Ok((check_id, outcome)) => {
                    failed += 1;
                    tracing::warn!(check_id = %check_id, ?outcome, "Check was not deleted");
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(error = %e, "Check deletion task did not complete");
                }
            }
        }

        if failed == 0 {
            Ok(())
        } else {
            tracing::error!(failed, total = check_ids.len(), "Error deleting checks");
            Err(UserOperationError::Internal(messages::DELETE_CHECKS_FAILED))
        }
    }
}

async fn delete_check<C: CheckStore>(check_store: &C, check_id: &CheckId) -> CheckDeletion {
    match check_store.read_check(check_id).await {
        Ok(_) => {}
        Err(StoreError::NotFound) => return CheckDeletion::NotFound,
        Err(e) => return CheckDeletion::StoreError(e.to_string()),
    }

    match check_store.delete_check(check_id).await {
        Ok(()) => CheckDeletion::Deleted,
        Err(StoreError::NotFound) => CheckDeletion::NotFound,
        Err(e) => CheckDeletion::StoreError(e.to_string()),
    }
}
