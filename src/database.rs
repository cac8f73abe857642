use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::connection::ConnectionType;

/// User-scoped state that survives application restarts: the wallet backend
/// last selected, the chain it was on, and the alternate-wallet account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub selected_connection: Option<ConnectionType>,
    pub last_chain_id: Option<u64>,
    pub cosmos_account: Option<String>,
}

#[async_trait]
pub trait Database: Debug {
    type Error: std::error::Error;

    async fn set_settings(&mut self, settings: &UserSettings) -> Result<(), Self::Error>;

    async fn get_settings(&self) -> Result<Option<UserSettings>, Self::Error>;

    async fn clear_settings(&mut self) -> Result<(), Self::Error>;
}

// Implementation using the file system.

#[derive(Debug, thiserror::Error)]
pub enum FileSystemDatabaseError {
    #[error("could not create file: {0}")]
    CreateFile(std::io::Error),

    #[error("could not convert settings to JSON: {0}")]
    ToJSON(serde_json::Error),

    #[error("could not write to file: {0}")]
    WriteToFile(std::io::Error),

    #[error("could not read file to string: {0}")]
    ReadFile(std::io::Error),

    #[error("could not parse JSON settings: {0}")]
    ParseJSON(serde_json::Error),

    #[error("could not delete file: {0}")]
    DeleteFile(std::io::Error),
}

#[derive(Debug)]
pub struct FileSystemDatabase {
    path: String,
}

impl FileSystemDatabase {
    pub fn new(path: String) -> FileSystemDatabase {
        FileSystemDatabase { path }
    }
}

#[async_trait]
impl Database for FileSystemDatabase {
    type Error = FileSystemDatabaseError;

    async fn set_settings(&mut self, settings: &UserSettings) -> Result<(), Self::Error> {
        let mut file = fs::File::create(self.path.clone())
            .await
            .map_err(Self::Error::CreateFile)?;

        let s = serde_json::to_string_pretty(settings).map_err(Self::Error::ToJSON)?;

        file.write_all(s.as_bytes())
            .await
            .map_err(Self::Error::WriteToFile)?;

        file.sync_all().await.map_err(Self::Error::WriteToFile)?;

        Ok(())
    }

    async fn get_settings(&self) -> Result<Option<UserSettings>, Self::Error> {
        let file = fs::File::open(self.path.clone()).await;

        match file {
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),

            Err(err) => Err(Self::Error::ReadFile(err)),

            Ok(mut file) => {
                let mut s = String::new();

                file.read_to_string(&mut s)
                    .await
                    .map_err(Self::Error::ReadFile)?;

                let settings = serde_json::de::from_str(&s).map_err(Self::Error::ParseJSON)?;

                Ok(Some(settings))
            }
        }
    }

    async fn clear_settings(&mut self) -> Result<(), Self::Error> {
        fs::remove_file(self.path.clone())
            .await
            .map_err(Self::Error::DeleteFile)
    }
}

// Unit tests for the file system database.
