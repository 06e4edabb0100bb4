//! JSON snapshot artifacts
//!
//! Snapshots are pretty-printed JSON arrays written in one go at the end of a
//! stage. Reading them back is used when the summary is rebuilt offline.

use crate::{ArtifactError, ArtifactResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes `value` to `path` as pretty-printed JSON
pub fn write_json_snapshot<T: Serialize + ?Sized>(path: &Path, value: &T) -> ArtifactResult<()> {
    let file = File::create(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    writer.flush().map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Reads a JSON snapshot previously written by [`write_json_snapshot`]
pub fn read_json_snapshot<T: DeserializeOwned>(path: &Path) -> ArtifactResult<T> {
    let file = File::open(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
