use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// A file writer that only creates its file on first write
#[derive(Clone)]
pub struct LazyFileWriter {
    path: PathBuf,
    file: Arc<Mutex<Option<File>>>,
}

impl LazyFileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: Arc::new(Mutex::new(None)),
        }
    }
}

/// Writer handed out per event; shares the lazily opened file handle
pub struct LazyWriter {
    path: PathBuf,
    file: Arc<Mutex<Option<File>>>,
}

impl LazyWriter {
    fn open(&self) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
    }
}

impl Write for LazyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file_guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("Mutex poisoned"))?;

        // Reopen if the log was deleted out from under us
        if file_guard.is_none() || !self.path.exists() {
            *file_guard = Some(self.open()?);
        }

        if let Some(file) = file_guard.as_mut()
            && let Ok(bytes) = file.write(buf)
        {
            return Ok(bytes);
        }

        // Stale handle, recreate once
        let mut new_file = self.open()?;
        let bytes = new_file.write(buf)?;
        *file_guard = Some(new_file);
        Ok(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file_guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("Mutex poisoned"))?;

        if !self.path.exists() {
            *file_guard = None;
            return Ok(());
        }

        if let Some(file) = file_guard.as_mut()
            && file.flush().is_err()
        {
            *file_guard = Some(self.open()?);
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LazyFileWriter {
    type Writer = LazyWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LazyWriter {
            path: self.path.clone(),
            file: Arc::clone(&self.file),
        }
    }
}
