//! Journal de ejecuciones: un objeto JSON por evento, una línea por objeto.
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tasks_core::TaskEvent;

#[derive(Serialize)]
struct JournalLine<'a> {
    target: &'a str,
    #[serde(flatten)]
    event: &'a TaskEvent,
}

/// Añade los eventos al final del journal (lo crea si no existe) y devuelve
/// cuántas líneas escribió.
pub fn append_events(path: &Path, target: &str, events: &[TaskEvent]) -> io::Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut buf = String::new();
    for event in events {
        buf.push_str(&serde_json::to_string(&JournalLine { target, event }).map_err(io::Error::other)?);
        buf.push('\n');
    }
    file.write_all(buf.as_bytes())?;
    Ok(events.len())
}
