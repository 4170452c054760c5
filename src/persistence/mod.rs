use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::ZukanError;

const APP_NAME: &str = "zukan";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        if let Err(e) = fs::create_dir_all(&app_dir) {
            tracing::warn!(path = %app_dir.display(), error = %e, "cannot create data dir");
        }
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), ZukanError> {
    save_json_to(data, &get_data_file_path(filename))
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> Result<T, ZukanError> {
    load_json_from(&get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(filename, error = %e, "failed to load, using defaults");
            T::default()
        }
    }
}

fn save_json_to<T: Serialize>(data: &T, file_path: &Path) -> Result<(), ZukanError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    tracing::debug!(path = %file_path.display(), "data saved");
    Ok(())
}

fn load_json_from<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, ZukanError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!(path = %file_path.display(), "data loaded");
    Ok(data)
}
