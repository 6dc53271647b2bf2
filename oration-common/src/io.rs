//! JSON data-file helpers.
//!
//! Every data file in the pipeline is a UTF-8, 2-space indented JSON array.
//! Writes go to a temp file next to the destination and are renamed into
//! place, so a reader never observes a half-written file.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{OrationError, Result};

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> OrationError + '_ {
    move |source| OrationError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path).map_err(io_err(path))?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
///
/// Missing parent directories are created.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = parent_dir(path);
    ensure_dir(&dir)?;

    let tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err(&dir))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(io_err(path))?;
    }
    tmp.as_file().sync_all().map_err(io_err(path))?;
    tmp.persist(path).map_err(|e| OrationError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), "json.write.complete");
    Ok(())
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(io_err(dir))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
