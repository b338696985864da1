//! Session recording
//!
//! - `format.rs`: the line format and its parser
//! - `sink.rs`: the file writer sampling the registry
//!
//! [`Recorder`] is what the session holds: an on/off switch around an
//! optional sink. A failed write is logged and turns recording off; it never
//! interrupts the simulation.

pub mod format;
pub mod sink;

pub use format::{EntityRecord, FORMAT_HEADER, FrameRecord, ParsedRecording, read_frames};
pub use sink::RecordingSink;

use crate::config::RecordingConfig;
use crate::error::RecordingError;
use crate::registry::EntityRegistry;
use std::path::PathBuf;

/// Toggleable recording state owned by a session
#[derive(Debug)]
pub struct Recorder {
    directory: Option<PathBuf>,
    sample_interval: f32,
    sink: Option<RecordingSink>,
}

impl Recorder {
    pub fn new(config: &RecordingConfig) -> Self {
        Recorder {
            directory: config.directory.clone().or_else(RecordingSink::default_directory),
            sample_interval: config.sample_interval,
            sink: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.sink.is_some()
    }

    /// Path of the file being written, if any
    pub fn current_path(&self) -> Option<&std::path::Path> {
        self.sink.as_ref().map(RecordingSink::path)
    }

    /// Starts or stops recording; returns whether recording is now on
    pub fn toggle(&mut self) -> bool {
        if self.sink.is_some() {
            self.stop();
        } else if let Err(e) = self.start() {
            log::error!("cannot start recording: {}", e);
        }
        self.is_recording()
    }

    /// Opens a new sink; a no-op if one is already open
    pub fn start(&mut self) -> Result<(), RecordingError> {
        if self.sink.is_some() {
            return Ok(());
        }
        let directory = self.directory.as_ref().ok_or(RecordingError::NoDirectory)?;
        self.sink = Some(RecordingSink::create(directory, self.sample_interval)?);
        Ok(())
    }

    pub fn stop(&mut self) -> Option<PathBuf> {
        let sink = self.sink.take()?;
        match sink.finish() {
            Ok(path) => Some(path),
            Err(e) => {
                log::error!("recording did not close cleanly: {}", e);
                None
            }
        }
    }

    /// Feeds one tick to the sink, if recording
    pub fn sample(&mut self, dt: f32, registry: &EntityRegistry) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(e) = sink.sample(dt, registry) {
            log::error!("recording stopped: {}", e);
            self.sink = None;
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.stop();
    }
}
