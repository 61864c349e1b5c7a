use vigil_core::{
    Payload, PhoneNumber, StoreError, TokenService, UserProfile, UserStore,
    validation::PHONE_NUMBER_KEY,
};

use crate::{
    error::{UserOperationError, messages},
    use_cases::authorize::AuthorizationGate,
};

/// Read user use case - returns the redacted record of the token's owner
pub struct ReadUserUseCase<U, T> {
    user_store: U,
    gate: AuthorizationGate<T>,
}

impl<U, T> ReadUserUseCase<U, T>
where
    U: UserStore,
    T: TokenService,
{
    pub fn new(user_store: U, token_service: T) -> Self {
        Self {
            user_store,
            gate: AuthorizationGate::new(token_service),
        }
    }

    #[tracing::instrument(name = "ReadUserUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        payload: &Payload,
        token: Option<&str>,
    ) -> Result<UserProfile, UserOperationError> {
        let phone_number = PhoneNumber::parse(payload.get(PHONE_NUMBER_KEY)).ok_or(
            UserOperationError::Validation(messages::MISSING_REQUIRED_FIELDS),
        )?;

        self.gate.require(token, &phone_number).await?;

        match self.user_store.read_user(&phone_number).await {
            Ok(user) => Ok(user.into()),
            Err(StoreError::NotFound) => Err(UserOperationError::NotFound),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read user");
                Err(UserOperationError::Internal(messages::READ_FAILED))
            }
        }
    }
}
