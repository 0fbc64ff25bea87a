//! Append-mode file writer for the logger

use crate::logger::config::FileConfig;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Buffered file writer shared by the tracing file layer
///
/// Each run opens the log file once (append or truncate per configuration)
/// and every layer write goes through a shared buffered handle.
pub struct AppendFileWriter {
    state: Arc<Mutex<BufWriter<File>>>,
}

impl AppendFileWriter {
    pub fn new(config: &FileConfig) -> anyhow::Result<Self> {
        // Create directory if it doesn't exist
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;

        Ok(Self {
            state: Arc::new(Mutex::new(file)),
        })
    }
}

impl<'a> MakeWriter<'a> for AppendFileWriter {
    type Writer = FileWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriterGuard {
            state: self.state.clone(),
        }
    }
}

/// Guard handed to the tracing layer for a single write
pub struct FileWriterGuard {
    state: Arc<Mutex<BufWriter<File>>>,
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "Failed to acquire writer lock"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "Failed to acquire writer lock"))?;
        file.flush()
    }
}

impl Drop for FileWriterGuard {
    fn drop(&mut self) {
        // Ensure buffered content reaches the file when the guard goes away
        if let Ok(mut file) = self.state.lock() {
            let _ = file.flush();
        }
    }
}

/// Open the log file in append or truncate mode
fn open_log_file(path: &PathBuf, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    Ok(BufWriter::new(file))
}
