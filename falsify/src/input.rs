// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Article acquisition: pasted text, an uploaded UTF-8 file, or stdin

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read article file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("article file {path} is not valid UTF-8 (byte offset {offset})")]
    Decode { path: PathBuf, offset: usize },
    #[error("failed to read article from stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Where the article text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Pasted(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Read the raw article text
    pub fn read(&self) -> Result<String, InputError> {
        match self {
            InputSource::Pasted(text) => Ok(text.clone()),
            InputSource::File(path) => read_utf8_file(path),
            InputSource::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(InputError::Stdin)?;
                decode(bytes, Path::new("<stdin>"))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Pasted(text) => format!("pasted text ({} bytes)", text.len()),
            InputSource::File(path) => format!("file {}", path.display()),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Read a text file, rejecting anything that is not UTF-8
pub fn read_utf8_file(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(bytes, path)
}

fn decode(bytes: Vec<u8>, path: &Path) -> Result<String, InputError> {
    String::from_utf8(bytes).map_err(|err| InputError::Decode {
        path: path.to_path_buf(),
        offset: err.utf8_error().valid_up_to(),
    })
}
