use vigil_core::{
    Email, Name, Password, PasswordHasher, Payload, PhoneNumber, StoreError, TokenService, User,
    UserStore,
    validation::{EMAIL_KEY, FIRST_NAME_KEY, LAST_NAME_KEY, PASSWORD_KEY, PHONE_NUMBER_KEY},
};

use crate::{
    error::{UserOperationError, messages},
    use_cases::authorize::AuthorizationGate,
};

/// Update user use case - merges the supplied fields into an existing record
pub struct UpdateUserUseCase<U, T, H> {
    user_store: U,
    gate: AuthorizationGate<T>,
    hasher: H,
}

impl<U, T, H> UpdateUserUseCase<U, T, H>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
{
    pub fn new(user_store: U, token_service: T, hasher: H) -> Self {
        Self {
            user_store,
            gate: AuthorizationGate::new(token_service),
            hasher,
        }
    }

    /// Execute the update user use case
    ///
    /// # Arguments
    /// * `payload` - Raw payload: `phoneNumber` plus at least one of `email`,
    ///   `firstName`, `lastName`, `password`
    /// * `token` - Raw `authorization` header value, if any
    ///
    /// # Returns
    /// The merged user on success. Callers must only expose it through
    /// [`User::profile`].
    #[tracing::instrument(name = "UpdateUserUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        payload: &Payload,
        token: Option<&str>,
    ) -> Result<User, UserOperationError> {
        let phone_number = PhoneNumber::parse(payload.get(PHONE_NUMBER_KEY)).ok_or(
            UserOperationError::Validation(messages::MISSING_REQUIRED_FIELDS),
        )?;

        let email = Email::parse(payload.get(EMAIL_KEY));
        let first_name = Name::parse_first(payload.get(FIRST_NAME_KEY));
        let last_name = Name::parse_last(payload.get(LAST_NAME_KEY));
        let password = Password::parse_update(payload.get(PASSWORD_KEY));

        if email.is_none() && first_name.is_none() && last_name.is_none() && password.is_none() {
            return Err(UserOperationError::Validation(messages::NOTHING_TO_UPDATE));
        }

        self.gate.require(token, &phone_number).await?;

        let mut user = match self.user_store.read_user(&phone_number).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(UserOperationError::NotFound),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read user");
                return Err(UserOperationError::Internal(messages::READ_FAILED));
            }
        };

        let password_hash = match password {
            Some(password) => Some(self.hasher.hash(password).await.map_err(|e| {
                tracing::error!(error = %e, "Failed to hash password");
                UserOperationError::Internal(messages::HASH_FAILED)
            })?),
            None => None,
        };

        if let Some(email) = email {
            user.set_email(email);
        }
        if let Some(first_name) = first_name {
            user.set_first_name(first_name);
        }
        if let Some(last_name) = last_name {
            user.set_last_name(last_name);
        }
        if let Some(password_hash) = password_hash {
            user.set_password(password_hash);
        }

        self.user_store
            .update_user(user.clone())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, phone_number = %phone_number, "Could not update user");
                UserOperationError::Internal(messages::UPDATE_FAILED)
            })?;

        Ok(user)
    }
}
