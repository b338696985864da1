//! Recording sink
//!
//! Writes one [`FrameRecord`] line every `sample_interval` seconds of
//! simulated time into a timestamped file. Files are named
//! `recording_YYYYMMDD_HHMMSS_mmm.txt` so consecutive sessions never clash.

use super::format::{EntityRecord, FORMAT_HEADER, FrameRecord};
use crate::error::RecordingError;
use crate::registry::EntityRegistry;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Open recording file plus its sampling clock
#[derive(Debug)]
pub struct RecordingSink {
    path: PathBuf,
    writer: BufWriter<File>,
    sample_interval: f32,
    since_sample: f32,
    elapsed: f32,
    samples_written: usize,
}

impl RecordingSink {
    /// `<local data dir>/hulu_brawl/recordings`, if the platform has one
    pub fn default_directory() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("hulu_brawl").join("recordings"))
    }

    /// Creates the directory if needed, opens a new file and writes the header
    pub fn create(directory: impl AsRef<Path>, sample_interval: f32) -> Result<Self, RecordingError> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|source| RecordingError::Io {
            path: directory.to_path_buf(),
            source,
        })?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
        let path = directory.join(format!("recording_{}.txt", timestamp));
        let file = File::create(&path).map_err(|source| RecordingError::Io {
            path: path.clone(),
            source,
        })?;

        let mut sink = RecordingSink {
            path,
            writer: BufWriter::new(file),
            sample_interval: sample_interval.max(f32::EPSILON),
            since_sample: 0.0,
            elapsed: 0.0,
            samples_written: 0,
        };
        sink.write_line(FORMAT_HEADER)?;

        log::info!("recording to {}", sink.path.display());
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Simulated seconds since the sink opened
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn samples_written(&self) -> usize {
        self.samples_written
    }

    /// Advances the sampling clock and writes a line when it is due
    ///
    /// Returns whether a line was written.
    pub fn sample(&mut self, dt: f32, registry: &EntityRegistry) -> Result<bool, RecordingError> {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        self.since_sample += dt;
        if self.since_sample < self.sample_interval {
            return Ok(false);
        }
        // Keep the remainder so the period does not depend on the frame rate;
        // one line per call at most
        self.since_sample -= self.sample_interval;
        if self.since_sample >= self.sample_interval {
            self.since_sample %= self.sample_interval;
        }

        let frame = FrameRecord {
            elapsed: self.elapsed,
            entities: snapshot(registry),
        };
        self.write_line(&frame.encode())?;
        self.samples_written += 1;
        Ok(true)
    }

    /// Flushes and closes the file, returning its path
    pub fn finish(mut self) -> Result<PathBuf, RecordingError> {
        self.writer.flush().map_err(|source| RecordingError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!(
            "recording closed after {} sample(s): {}",
            self.samples_written,
            self.path.display()
        );
        Ok(self.path)
    }

    fn write_line(&mut self, line: &str) -> Result<(), RecordingError> {
        writeln!(self.writer, "{}", line).map_err(|source| RecordingError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Active entities with a transform, in registry order
fn snapshot(registry: &EntityRegistry) -> Vec<EntityRecord> {
    registry
        .iter_active()
        .filter_map(|entity| {
            entity.position().map(|position| EntityRecord {
                kind: entity.kind(),
                position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TransformComponent;
    use crate::entity::{Entity, EntityKind};
    use crate::math::Vector2;
    use crate::recording::format::read_frames;
    use std::io::BufReader;

    fn registry_with_player() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.add(
            Entity::new(EntityKind::Player).with(TransformComponent::new(Vector2::new(5.0, 6.0))),
        );
        // No transform: not recorded
        registry.add(Entity::new(EntityKind::Neutral));
        registry
    }

    #[test]
    fn test_samples_on_interval() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_with_player();
        let mut sink = RecordingSink::create(dir.path(), 0.1).unwrap();

        assert!(!sink.sample(0.05, &registry).unwrap());
        assert!(sink.sample(0.05, &registry).unwrap());
        assert!(!sink.sample(0.05, &registry).unwrap());
        assert!(sink.sample(0.1, &registry).unwrap());
        assert_eq!(sink.samples_written(), 2);

        let path = sink.finish().unwrap();
        let file = File::open(&path).unwrap();
        let parsed = read_frames(BufReader::new(file)).unwrap();

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.frames.len(), 2);
        assert!(parsed.frames[0].elapsed < parsed.frames[1].elapsed);
        assert_eq!(
            parsed.frames[0].entities,
            vec![EntityRecord {
                kind: EntityKind::Player,
                position: Vector2::new(5.0, 6.0)
            }]
        );
    }

    #[test]
    fn test_sampling_rate_independent_of_frame_rate() {
        let registry = registry_with_player();
        for frames_per_second in [60u32, 100] {
            let dir = tempfile::tempdir().unwrap();
            let mut sink = RecordingSink::create(dir.path(), 0.02).unwrap();
            let dt = 1.0 / frames_per_second as f32;
            for _ in 0..frames_per_second {
                sink.sample(dt, &registry).unwrap();
            }
            let written = sink.samples_written();
            assert!(
                (49..=50).contains(&written),
                "{} samples over 1s at {} fps",
                written,
                frames_per_second
            );
        }
    }

    #[test]
    fn test_long_frame_writes_single_line() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_with_player();
        let mut sink = RecordingSink::create(dir.path(), 0.25).unwrap();

        assert!(sink.sample(1.0, &registry).unwrap());
        assert_eq!(sink.samples_written(), 1);
        // Backlog is dropped, not replayed on the next frames
        assert!(!sink.sample(0.125, &registry).unwrap());
        assert!(sink.sample(0.125, &registry).unwrap());
    }

    #[test]
    fn test_file_starts_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::create(dir.path().join("nested"), 0.02).unwrap();
        let path = sink.finish().unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().next(), Some(FORMAT_HEADER));
    }
}
