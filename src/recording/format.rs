//! Recording line format, version 1
//!
//! ```text
//! #hulu-recording v1
//! deltaTime=0.02;{GameIdentity=Player,TransformComponent=800|600},{GameIdentity=EnemySoldier,TransformComponent=120.5|88}
//! deltaTime=0.04;{GameIdentity=Player,TransformComponent=803.8|600}
//! ```
//!
//! - One line per sample. `deltaTime` is the simulated time elapsed since
//!   recording started, not the frame delta.
//! - Fields inside a record always appear in the order shown.
//! - Lines starting with `#` are comments; the first one carries the version.
//!
//! The parser is strict per line and lenient per file: a bad line is reported
//! with a [`RecordParseError`] and [`read_frames`] skips it.

use crate::entity::EntityKind;
use crate::error::RecordParseError;
use crate::math::Vector2;
use std::fmt::Write as _;
use std::io::{self, BufRead};

pub const FORMAT_HEADER: &str = "#hulu-recording v1";

const DELTA_PREFIX: &str = "deltaTime=";
const IDENTITY_FIELD: &str = "GameIdentity";
const TRANSFORM_FIELD: &str = "TransformComponent";

/// One entity inside a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub position: Vector2,
}

/// One sampled line
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Seconds since recording started
    pub elapsed: f32,
    pub entities: Vec<EntityRecord>,
}

impl FrameRecord {
    /// Renders the line without a trailing newline
    pub fn encode(&self) -> String {
        let mut line = format!("{}{};", DELTA_PREFIX, self.elapsed);
        for (i, entity) in self.entities.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            // Writing to a String cannot fail
            let _ = write!(
                line,
                "{{{}={},{}={}|{}}}",
                IDENTITY_FIELD,
                entity.kind,
                TRANSFORM_FIELD,
                entity.position.x,
                entity.position.y
            );
        }
        line
    }

    /// Parses one line
    pub fn parse(line: &str) -> Result<Self, RecordParseError> {
        let line = line.trim();
        let body = line
            .strip_prefix(DELTA_PREFIX)
            .ok_or(RecordParseError::MissingHeader)?;
        let (elapsed, list) = body
            .split_once(';')
            .ok_or(RecordParseError::MissingSeparator)?;
        let elapsed = parse_number(elapsed)?;

        let list = list.trim();
        let entities = if list.is_empty() {
            Vec::new()
        } else {
            let inner = list
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .ok_or_else(|| RecordParseError::MalformedEntity(list.to_string()))?;
            inner
                .split("},{")
                .map(parse_entity)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(FrameRecord { elapsed, entities })
    }
}

fn parse_number(text: &str) -> Result<f32, RecordParseError> {
    let value: f32 = text
        .trim()
        .parse()
        .map_err(|_| RecordParseError::InvalidNumber(text.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordParseError::InvalidNumber(text.to_string()))
    }
}

fn parse_field<'a>(field: &'a str, expected: &str) -> Result<&'a str, RecordParseError> {
    let (key, value) = field
        .split_once('=')
        .ok_or_else(|| RecordParseError::MalformedEntity(field.to_string()))?;
    if key != expected {
        return Err(RecordParseError::UnknownField(key.to_string()));
    }
    Ok(value)
}

fn parse_entity(record: &str) -> Result<EntityRecord, RecordParseError> {
    let mut fields = record.split(',');
    let (Some(identity), Some(transform), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(RecordParseError::MalformedEntity(record.to_string()));
    };

    let tag = parse_field(identity, IDENTITY_FIELD)?;
    let kind: EntityKind = tag
        .parse()
        .map_err(|_| RecordParseError::UnknownKind(tag.to_string()))?;

    let position = parse_field(transform, TRANSFORM_FIELD)?;
    let (x, y) = position
        .split_once('|')
        .ok_or_else(|| RecordParseError::MalformedEntity(record.to_string()))?;

    Ok(EntityRecord {
        kind,
        position: Vector2::new(parse_number(x)?, parse_number(y)?),
    })
}

/// Frames read from a recording plus how many lines were rejected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecording {
    pub frames: Vec<FrameRecord>,
    pub skipped: usize,
}

/// Reads every frame, skipping comments, blank lines, and malformed lines
pub fn read_frames(reader: impl BufRead) -> io::Result<ParsedRecording> {
    let mut parsed = ParsedRecording::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match FrameRecord::parse(trimmed) {
            Ok(frame) => parsed.frames.push(frame),
            Err(e) => {
                log::warn!("skipping recording line {}: {}", index + 1, e);
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_line_format() {
        let frame = FrameRecord {
            elapsed: 0.5,
            entities: vec![
                EntityRecord {
                    kind: EntityKind::Player,
                    position: Vector2::new(800.0, 600.0),
                },
                EntityRecord {
                    kind: EntityKind::EnemyKing,
                    position: Vector2::new(10.5, -3.25),
                },
            ],
        };
        assert_eq!(
            frame.encode(),
            "deltaTime=0.5;{GameIdentity=Player,TransformComponent=800|600},{GameIdentity=EnemyKing,TransformComponent=10.5|-3.25}"
        );
    }

    #[test]
    fn test_parse_empty_entity_list() {
        let frame = FrameRecord::parse("deltaTime=1.25;").unwrap();
        assert_eq!(frame.elapsed, 1.25);
        assert!(frame.entities.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(FrameRecord::parse("time=1;"), Err(RecordParseError::MissingHeader));
        assert_eq!(FrameRecord::parse("deltaTime=1"), Err(RecordParseError::MissingSeparator));
        assert!(matches!(
            FrameRecord::parse("deltaTime=abc;"),
            Err(RecordParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            FrameRecord::parse("deltaTime=1;{GameIdentity=Dragon,TransformComponent=1|2}"),
            Err(RecordParseError::UnknownKind(_))
        ));
        assert!(matches!(
            FrameRecord::parse("deltaTime=1;{TransformComponent=1|2,GameIdentity=Player}"),
            Err(RecordParseError::UnknownField(_))
        ));
        assert!(matches!(
            FrameRecord::parse("deltaTime=1;{GameIdentity=Player,TransformComponent=1;2}"),
            Err(RecordParseError::MalformedEntity(_))
        ));
    }

    #[test]
    fn test_read_frames_skips_bad_lines() {
        let text = "\
#hulu-recording v1
deltaTime=0.02;{GameIdentity=Player,TransformComponent=1|2}
this line is garbage
deltaTime=0.04;{GameIdentity=Player,TransformComponent=3|4
deltaTime=0.06;{GameIdentity=Player,TransformComponent=5|6}
";
        let parsed = read_frames(text.as_bytes()).unwrap();

        assert_eq!(parsed.skipped, 2);
        let elapsed: Vec<f32> = parsed.frames.iter().map(|f| f.elapsed).collect();
        assert_eq!(elapsed, vec![0.02, 0.06]);
        assert_eq!(parsed.frames[1].entities[0].position, Vector2::new(5.0, 6.0));
    }
}
