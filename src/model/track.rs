use super::fields::TrackField;
use super::value::{Record, Value};
use crate::error::{CspfError, Result};
use crate::validation::{self, is_track_shape, ShapePolicy};
use std::any::Any;
use std::fmt;

/// A single playlist entry
///
/// Fields are private; every mutation goes through a setter that checks
/// the value first and leaves the field untouched when it is rejected.
#[derive(Debug, Clone, Default)]
pub struct Track {
    location: String,
    identifier: String,
    title: String,
    creator: String,
    annotation: String,
    info: String,
    image: String,
    album: String,
    track_num: f64,
    duration: f64,
    link: Vec<Record>,
    meta: Vec<Record>,
    extension: Record,
}

/// Typed, partial initializer for [`Track::new`]
///
/// Missing fields take their defaults (`""`, `0`, empty collections).
#[derive(Debug, Clone, Default)]
pub struct TrackInit {
    pub location: Option<String>,
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub annotation: Option<String>,
    pub info: Option<String>,
    pub image: Option<String>,
    pub album: Option<String>,
    pub track_num: Option<f64>,
    pub duration: Option<f64>,
    pub link: Option<Vec<Record>>,
    pub meta: Option<Vec<Record>>,
    pub extension: Option<Record>,
}

impl TrackInit {
    /// Build an initializer from a partial track shape
    pub fn from_shape(shape: &Value) -> Result<Self> {
        if !is_track_shape(shape, ShapePolicy::Partial) {
            return Err(CspfError::TrackNotParsable);
        }

        let text = |field: TrackField| shape.get(field.name()).and_then(Value::as_str).map(str::to_owned);
        let number = |field: TrackField| shape.get(field.name()).and_then(Value::as_f64);
        let records = |field: TrackField| shape.get(field.name()).and_then(Value::to_record_vec);

        Ok(Self {
            location: text(TrackField::Location),
            identifier: text(TrackField::Identifier),
            title: text(TrackField::Title),
            creator: text(TrackField::Creator),
            annotation: text(TrackField::Annotation),
            info: text(TrackField::Info),
            image: text(TrackField::Image),
            album: text(TrackField::Album),
            track_num: number(TrackField::TrackNum),
            duration: number(TrackField::Duration),
            link: records(TrackField::Link),
            meta: records(TrackField::Meta),
            extension: shape
                .get(TrackField::Extension.name())
                .and_then(Value::as_record)
                .cloned(),
        })
    }
}

/// Anything that can be turned into a [`Track`] at a trust boundary
#[derive(Debug, Clone)]
pub enum TrackEntry {
    /// An existing track, passed through as is
    Track(Track),
    /// A raw shape that must pass strict validation
    Shape(Value),
}

impl From<Track> for TrackEntry {
    fn from(track: Track) -> Self {
        TrackEntry::Track(track)
    }
}

impl From<&Track> for TrackEntry {
    fn from(track: &Track) -> Self {
        TrackEntry::Track(track.clone())
    }
}

impl From<Value> for TrackEntry {
    fn from(shape: Value) -> Self {
        TrackEntry::Shape(shape)
    }
}

impl From<&Value> for TrackEntry {
    fn from(shape: &Value) -> Self {
        TrackEntry::Shape(shape.clone())
    }
}

impl Track {
    /// Create a track from a typed initializer
    ///
    /// Fails only when a numeric field is `NaN` or infinite.
    pub fn new(init: TrackInit) -> Result<Self> {
        let mut track = Track::default();

        let TrackInit {
            location,
            identifier,
            title,
            creator,
            annotation,
            info,
            image,
            album,
            track_num,
            duration,
            link,
            meta,
            extension,
        } = init;

        track.location = location.unwrap_or_default();
        track.identifier = identifier.unwrap_or_default();
        track.title = title.unwrap_or_default();
        track.creator = creator.unwrap_or_default();
        track.annotation = annotation.unwrap_or_default();
        track.info = info.unwrap_or_default();
        track.image = image.unwrap_or_default();
        track.album = album.unwrap_or_default();
        if !track.set_track_num(track_num.unwrap_or_default()) {
            return Err(CspfError::InvalidField {
                field: TrackField::TrackNum.name(),
            });
        }
        if !track.set_duration(duration.unwrap_or_default()) {
            return Err(CspfError::InvalidField {
                field: TrackField::Duration.name(),
            });
        }
        track.link = link.unwrap_or_default();
        track.meta = meta.unwrap_or_default();
        track.extension = extension.unwrap_or_default();

        Ok(track)
    }

    /// Convert an entry into a track
    ///
    /// Existing tracks pass through untouched; raw shapes must satisfy
    /// [`Track::is_parsable`].
    pub fn from_entry(entry: impl Into<TrackEntry>) -> Result<Self> {
        match entry.into() {
            TrackEntry::Track(track) => Ok(track),
            TrackEntry::Shape(shape) => {
                if !Self::is_parsable(&shape) {
                    return Err(CspfError::TrackNotParsable);
                }

                let mut track = Track::default();
                for field in TrackField::ALL {
                    let applied = shape
                        .get(field.name())
                        .is_some_and(|value| track.set(field, value));
                    if !applied {
                        return Err(CspfError::TrackNotParsable);
                    }
                }
                Ok(track)
            }
        }
    }

    /// Strict shape check: every field present and well-typed
    pub fn is_parsable(value: &Value) -> bool {
        is_track_shape(value, ShapePolicy::Strict)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> bool {
        self.location = location.into();
        true
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> bool {
        self.identifier = identifier.into();
        true
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        self.title = title.into();
        true
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) -> bool {
        self.creator = creator.into();
        true
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn set_annotation(&mut self, annotation: impl Into<String>) -> bool {
        self.annotation = annotation.into();
        true
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn set_info(&mut self, info: impl Into<String>) -> bool {
        self.info = info.into();
        true
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn set_image(&mut self, image: impl Into<String>) -> bool {
        self.image = image.into();
        true
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn set_album(&mut self, album: impl Into<String>) -> bool {
        self.album = album.into();
        true
    }

    pub fn track_num(&self) -> f64 {
        self.track_num
    }

    /// Rejects `NaN` and infinities
    pub fn set_track_num(&mut self, track_num: f64) -> bool {
        if !track_num.is_finite() {
            return false;
        }
        self.track_num = track_num;
        true
    }

    /// Duration as stored in the document (milliseconds by XSPF convention)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Rejects `NaN` and infinities
    pub fn set_duration(&mut self, duration: f64) -> bool {
        if !duration.is_finite() {
            return false;
        }
        self.duration = duration;
        true
    }

    pub fn link(&self) -> &[Record] {
        &self.link
    }

    pub fn set_link(&mut self, link: Vec<Record>) -> bool {
        self.link = link;
        true
    }

    pub fn meta(&self) -> &[Record] {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: Vec<Record>) -> bool {
        self.meta = meta;
        true
    }

    pub fn extension(&self) -> &Record {
        &self.extension
    }

    pub fn set_extension(&mut self, extension: Record) -> bool {
        self.extension = extension;
        true
    }

    /// Read any field as an untyped value
    pub fn get(&self, field: TrackField) -> Value {
        match field {
            TrackField::Location => Value::from(self.location.as_str()),
            TrackField::Identifier => Value::from(self.identifier.as_str()),
            TrackField::Title => Value::from(self.title.as_str()),
            TrackField::Creator => Value::from(self.creator.as_str()),
            TrackField::Annotation => Value::from(self.annotation.as_str()),
            TrackField::Info => Value::from(self.info.as_str()),
            TrackField::Image => Value::from(self.image.as_str()),
            TrackField::Album => Value::from(self.album.as_str()),
            TrackField::TrackNum => Value::Number(self.track_num),
            TrackField::Duration => Value::Number(self.duration),
            TrackField::Link => Value::from(self.link.clone()),
            TrackField::Meta => Value::from(self.meta.clone()),
            TrackField::Extension => Value::Record(self.extension.clone()),
        }
    }

    /// Set any field from an untyped value
    ///
    /// Returns `false` and keeps the old value when `value` has the wrong type.
    pub fn set(&mut self, field: TrackField, value: &Value) -> bool {
        if !validation::is_field_value(field.kind(), value, ShapePolicy::Strict) {
            return false;
        }

        match (field, value) {
            (TrackField::TrackNum, Value::Number(n)) => self.set_track_num(*n),
            (TrackField::Duration, Value::Number(n)) => self.set_duration(*n),
            (TrackField::Link, _) => value.to_record_vec().is_some_and(|l| self.set_link(l)),
            (TrackField::Meta, _) => value.to_record_vec().is_some_and(|m| self.set_meta(m)),
            (TrackField::Extension, Value::Record(r)) => self.set_extension(r.clone()),
            (_, Value::String(s)) => {
                let slot = match field {
                    TrackField::Location => &mut self.location,
                    TrackField::Identifier => &mut self.identifier,
                    TrackField::Title => &mut self.title,
                    TrackField::Creator => &mut self.creator,
                    TrackField::Annotation => &mut self.annotation,
                    TrackField::Info => &mut self.info,
                    TrackField::Image => &mut self.image,
                    TrackField::Album => &mut self.album,
                    _ => return false,
                };
                slot.clone_from(s);
                true
            }
            _ => false,
        }
    }

    /// Field-wise equality, deep for `link`, `meta` and `extension`
    pub fn compare(&self, other: &Track) -> bool {
        self.location == other.location
            && self.identifier == other.identifier
            && self.title == other.title
            && self.creator == other.creator
            && self.annotation == other.annotation
            && self.info == other.info
            && self.image == other.image
            && self.album == other.album
            && self.track_num == other.track_num
            && self.duration == other.duration
            && validation::equal_record_lists(&self.link, &other.link)
            && validation::equal_record_lists(&self.meta, &other.meta)
            && validation::equal_records(&self.extension, &other.extension)
    }

    /// Plain record mirroring the current field values
    pub fn to_transport_shape(&self) -> Value {
        Value::Record(
            TrackField::ALL
                .iter()
                .map(|field| (field.name().to_string(), self.get(*field)))
                .collect(),
        )
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.to_transport_shape()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Is `value` a [`Track`] instance (identity, not shape)?
pub fn is_track_instance(value: &dyn Any) -> bool {
    value.is::<Track>()
}
