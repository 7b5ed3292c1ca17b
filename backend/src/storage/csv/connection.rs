//! CSV storage connection: resolves and owns the data directory.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory location.
pub const DATA_DIR_ENV: &str = "BILLPAY_DATA_DIR";

/// CsvConnection manages the base data directory and the file paths
/// used by the repositories.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory, creating the
    /// directory if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default location: `$BILLPAY_DATA_DIR`
    /// if set, otherwise `Documents/Bill Pay`, otherwise a directory
    /// under the system temp dir.
    pub fn new_default() -> Result<Self> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => match dirs::document_dir() {
                Some(docs) => docs.join("Bill Pay"),
                None => std::env::temp_dir().join("bill_pay"),
            },
        };
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the bill catalog file.
    pub fn bills_file_path(&self) -> PathBuf {
        self.base_directory.join("bills.csv")
    }

    /// Path of one user's payment records file.
    pub fn payments_file_path(&self, user_id: &str) -> PathBuf {
        self.base_directory
            .join(format!("{}_payments.csv", sanitize_scope(user_id)))
    }
}

/// Keep user-supplied ids filesystem-safe when used as a file name
/// component.
fn sanitize_scope(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
