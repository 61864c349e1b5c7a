use vigil_core::{
    Email, Name, Password, PasswordHasher, Payload, PhoneNumber, StoreError, User, UserStore,
    validation::{
        EMAIL_KEY, FIRST_NAME_KEY, LAST_NAME_KEY, PASSWORD_KEY, PHONE_NUMBER_KEY,
        TOS_AGREEMENT_KEY, tos_accepted,
    },
};

use crate::error::{UserOperationError, messages};

/// Create user use case - registers a new user record
pub struct CreateUserUseCase<U, H> {
    user_store: U,
    hasher: H,
}

impl<U, H> CreateUserUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, hasher: H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the create user use case
    ///
    /// # Arguments
    /// * `payload` - Raw request payload; all six user fields are required
    ///
    /// # Returns
    /// The stored user (hash included) on success. Callers must only expose it
    /// through [`User::profile`].
    #[tracing::instrument(name = "CreateUserUseCase::execute", skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<User, UserOperationError> {
        let (
            Some(phone_number),
            Some(email),
            Some(first_name),
            Some(last_name),
            Some(password),
            true,
        ) = (
            PhoneNumber::parse(payload.get(PHONE_NUMBER_KEY)),
            Email::parse(payload.get(EMAIL_KEY)),
            Name::parse_first(payload.get(FIRST_NAME_KEY)),
            Name::parse_last(payload.get(LAST_NAME_KEY)),
            Password::parse_new(payload.get(PASSWORD_KEY)),
            tos_accepted(payload.get(TOS_AGREEMENT_KEY)),
        )
        else {
            return Err(UserOperationError::Validation(
                messages::MISSING_REQUIRED_FIELDS,
            ));
        };

        match self.user_store.read_user(&phone_number).await {
            Err(StoreError::NotFound) => {}
            Ok(_) => return Err(UserOperationError::Conflict),
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up existing user");
                return Err(UserOperationError::Internal(messages::READ_FAILED));
            }
        }

        let password_hash = self.hasher.hash(password).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            UserOperationError::Internal(messages::HASH_FAILED)
        })?;

        let user = User::new(phone_number, email, first_name, last_name, password_hash);

        self.user_store
            .write_user(user.clone())
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists => UserOperationError::Conflict,
                e => {
                    tracing::error!(error = %e, "Failed to store new user");
                    UserOperationError::Internal(messages::CREATE_FAILED)
                }
            })?;

        tracing::info!(phone_number = %user.phone_number(), "User created");
        Ok(user)
    }
}
