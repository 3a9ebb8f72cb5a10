use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    Language,
};

pub async fn list(client: &ApiClient) -> Result<Vec<Language>, ArchipelagoError> {
    client.get_json("/languages", &[]).await
}
