//! Dataset catalog (record source)
//!
//! Reads the CSV catalog of datasets. Each data row becomes a
//! [`DatasetRecord`] carrying the `NAME` and `MAIN_LINK` columns; other
//! columns are ignored. Header problems are reported by [`Catalog::open`]
//! before any record is produced. A file without any header line is an
//! empty catalog.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Column holding the display name
pub const NAME_COLUMN: &str = "NAME";

/// Column holding the URL to probe
pub const LINK_COLUMN: &str = "MAIN_LINK";

/// One catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub name: String,
    pub url: String,
}

/// Errors raised while reading the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed catalog row{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Malformed { line: Option<u64>, message: String },
}

/// A catalog loaded into memory with a validated header
#[derive(Debug, Clone)]
pub struct Catalog {
    contents: Vec<u8>,
    name_index: usize,
    link_index: usize,
}

impl Catalog {
    /// Read and validate the catalog at `path`
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            _ => CatalogError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_bytes(contents)
    }

    /// Validate an in-memory catalog
    pub fn from_bytes(contents: Vec<u8>) -> Result<Self, CatalogError> {
        let (name_index, link_index) = {
            let mut reader = reader_for(&contents);
            let headers = reader.headers().map_err(malformed)?;
            if headers.is_empty() {
                // No header and therefore no rows
                return Ok(Self {
                    contents,
                    name_index: 0,
                    link_index: 0,
                });
            }

            let position = |column: &'static str| {
                headers
                    .iter()
                    .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
                    .ok_or(CatalogError::MissingColumn(column))
            };
            (position(NAME_COLUMN)?, position(LINK_COLUMN)?)
        };

        Ok(Self {
            contents,
            name_index,
            link_index,
        })
    }

    /// Records in file order. Each call starts again from the first data row.
    pub fn records(&self) -> impl Iterator<Item = Result<DatasetRecord, CatalogError>> + '_ {
        let name_index = self.name_index;
        let link_index = self.link_index;

        reader_for(&self.contents)
            .into_records()
            .map(move |row| {
                let row = row.map_err(malformed)?;
                let field = |index: usize| row.get(index).unwrap_or_default().trim().to_string();
                Ok(DatasetRecord {
                    name: field(name_index),
                    url: field(link_index),
                })
            })
    }

    /// SHA-256 of the raw catalog bytes, hex encoded
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.contents);
        hex::encode(hasher.finalize())
    }
}

fn reader_for(contents: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(contents)
}

fn malformed(err: csv::Error) -> CatalogError {
    let line = err.position().map(|p| p.line());
    CatalogError::Malformed {
        line,
        message: err.to_string(),
    }
}
