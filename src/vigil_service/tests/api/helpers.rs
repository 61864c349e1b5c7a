use chrono::Duration;
use reqwest::{Client, Response};
use serde_json::Value;
use vigil_adapters::{
    config::{HashingSettings, test},
    handlers::UsersState,
    hashing::Argon2Hasher,
    persistence::{HashMapCheckStore, HashMapUserStore},
    tokens::{HashMapTokenStore, StoredTokenService},
};
use vigil_core::{Check, CheckId, PhoneNumber, User, UserStore};
use vigil_service::VigilService;

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub user_store: HashMapUserStore,
    pub check_store: HashMapCheckStore,
    pub token_store: HashMapTokenStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let user_store = HashMapUserStore::new();
        let check_store = HashMapCheckStore::new();
        let token_store = HashMapTokenStore::new();
        let hasher = Argon2Hasher::new(HashingSettings {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        });

        let state = UsersState::new(
            user_store.clone(),
            check_store.clone(),
            StoredTokenService::new(token_store.clone()),
            hasher,
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(VigilService::new(state).run_standalone(listener, None));

        Self {
            address,
            http_client: Client::new(),
            user_store,
            check_store,
            token_store,
        }
    }

    pub fn token_for(&self, phone_number: &str) -> String {
        self.token_store
            .issue(&phone(phone_number), Duration::hours(1))
            .id
    }

    pub fn expired_token_for(&self, phone_number: &str) -> String {
        self.token_store
            .issue(&phone(phone_number), Duration::hours(-1))
            .id
    }

    pub async fn stored_user(&self, phone_number: &str) -> Option<User> {
        self.user_store.read_user(&phone(phone_number)).await.ok()
    }

    /// Seeds `ids` into the check store and attaches them to the user.
    pub async fn give_checks(&self, phone_number: &str, ids: &[&str]) {
        let ids: Vec<CheckId> = ids.iter().map(|id| CheckId::new(*id)).collect();
        for id in &ids {
            self.check_store.insert(Check::new(id.clone())).await;
        }
        let user = self
            .stored_user(phone_number)
            .await
            .expect("user must exist before checks are attached");
        self.user_store
            .update_user(user.with_checks(ids))
            .await
            .unwrap();
    }

    pub async fn post_user(&self, body: &Value) -> Response {
        self.http_client
            .post(format!("{}/users", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_user(&self, phone_number: &str, token: Option<&str>) -> Response {
        let mut request = self
            .http_client
            .get(format!("{}/users", &self.address))
            .query(&[("phoneNumber", phone_number)]);
        if let Some(token) = token {
            request = request.header("authorization", token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn put_user(&self, body: &Value, token: &str) -> Response {
        self.http_client
            .put(format!("{}/users", &self.address))
            .header("authorization", token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_user(&self, phone_number: &str, token: &str) -> Response {
        self.http_client
            .delete(format!("{}/users", &self.address))
            .query(&[("phoneNumber", phone_number)])
            .header("authorization", token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_user_with_body(&self, body: &Value, token: &str) -> Response {
        self.http_client
            .delete(format!("{}/users", &self.address))
            .header("authorization", token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_users(&self) -> Response {
        self.http_client
            .patch(format!("{}/users", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::parse(Some(&Value::String(raw.to_string()))).unwrap()
}

pub fn signup_body(phone_number: &str) -> Value {
    serde_json::json!({
        "phoneNumber": phone_number,
        "email": "jane@example.com",
        "firstName": "Jane",
        "lastName": "Doe",
        "password": "Passw0rd!",
        "tosAgreement": true,
    })
}
