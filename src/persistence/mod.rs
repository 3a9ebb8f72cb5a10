use std::{
    fs,
    path::PathBuf,
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::core::ArchipelagoError;

const APP_NAME: &str = "archipelago";

pub fn app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn data_file_path(filename: &str) -> PathBuf {
    app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), ArchipelagoError> {
    let file_path = data_file_path(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    Ok(())
}

/// `None` when the file doesn't exist; parse failures are real errors.
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<Option<T>, ArchipelagoError> {
    let file_path = data_file_path(filename);

    if !file_path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&file_path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

pub fn delete_data_file(filename: &str) -> Result<(), ArchipelagoError> {
    let file_path = data_file_path(filename);
    if file_path.exists() {
        fs::remove_file(&file_path)?;
    }
    Ok(())
}

pub fn data_file_exists(filename: &str) -> bool {
    data_file_path(filename).exists()
}
