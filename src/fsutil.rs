//! Escritura atómica a disco: archivo temporal único + rename.
//! Dentro del mismo filesystem el rename es atómico, así que un lector
//! concurrente nunca observa un archivo a medio escribir.

use std::fs;
use std::io::Write;
use std::path::Path;

use uuid::Uuid;

use crate::errors::PipelineError;

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    let parent = path
        .parent()
        .ok_or_else(|| PipelineError::Io(format!("path sin directorio padre: {}", path.display())))?;
    fs::create_dir_all(parent)?;
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("entry");
    let tmp = parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));
    let written = write_then_rename(&tmp, path, bytes);
    if written.is_err() {
        // una escritura fallida no deja el temporal colgando
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    {
        let mut file = fs::File::create(tmp)?;
        file.write_all(bytes)?;
    }
    fs::rename(tmp, target)?;
    Ok(())
}
