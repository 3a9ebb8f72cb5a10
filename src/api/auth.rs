use serde::Serialize;

use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    LeitnerConfig,
    User,
};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub native_language: String,
    pub learning_languages: Vec<String>,
}

#[derive(Serialize)]
struct UpdateLanguagesRequest<'a> {
    native_language: &'a str,
    learning_languages: &'a [String],
}

pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<User, ArchipelagoError> {
    client.post_json("/auth/login", &LoginRequest { email, password }).await
}

pub async fn register(
    client: &ApiClient,
    request: &RegisterRequest,
) -> Result<User, ArchipelagoError> {
    client.post_json("/auth/register", request).await
}

pub async fn update_languages(
    client: &ApiClient,
    native_language: &str,
    learning_languages: &[String],
) -> Result<User, ArchipelagoError> {
    client
        .patch_json(
            "/auth/update-languages",
            &UpdateLanguagesRequest { native_language, learning_languages },
        )
        .await
}

pub async fn update_leitner_config(
    client: &ApiClient,
    config: &LeitnerConfig,
) -> Result<User, ArchipelagoError> {
    client.patch_json("/auth/update-leitner-config", config).await
}

/// Irreversible server-side wipe of the user's data. The caller clears
/// the local session blob afterwards.
pub async fn delete_user_data(client: &ApiClient) -> Result<(), ArchipelagoError> {
    client.delete("/auth/delete-user-data").await
}
