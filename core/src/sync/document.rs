//! Reading and rewriting a single client config file.
//!
//! Only the top-level `mcpServers` key is ever touched. It is replaced as a
//! whole; every other key survives the rewrite with its value unchanged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use super::ServerMap;

pub const MCP_SERVERS_KEY: &str = "mcpServers";

pub type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} does not hold a JSON object at the top level", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("failed to create {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize the config for {}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads the document at `path`, or an empty one when the file is missing.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let content: String = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
        Err(source) => {
            return Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let value: Value = serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(document) => Ok(document),
        _ => Err(DocumentError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Writes `document` with two-space indentation, replacing prior contents.
pub fn write_document(path: &Path, document: &Document) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DocumentError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json: String =
        serde_json::to_string_pretty(document).map_err(|source| DocumentError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, json).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the `mcpServers` entry of `document` with `servers`.
pub fn set_servers(document: &mut Document, servers: &ServerMap) -> serde_json::Result<()> {
    let entries: Value = serde_json::to_value(servers)?;
    document.insert(MCP_SERVERS_KEY.to_string(), entries);
    Ok(())
}

/// Load, replace `mcpServers`, write back.
pub fn update_config(path: &Path, servers: &ServerMap) -> Result<(), DocumentError> {
    let mut document: Document = load_document(path)?;
    set_servers(&mut document, servers).map_err(|source| DocumentError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    write_document(path, &document)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
