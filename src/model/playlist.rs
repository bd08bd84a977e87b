use super::fields::{PlaylistField, TrackField};
use super::track::{Track, TrackEntry, TrackInit};
use super::value::{Record, Value};
use crate::codec::{self, CodecConfig};
use crate::error::{CspfError, Result};
use crate::validation::{self, is_playlist_shape, ShapePolicy};
use chrono::{DateTime, SecondsFormat, Utc};
use std::any::Any;
use std::fmt;

/// Message passed to load callbacks on success
pub const LOAD_SUCCESS_MESSAGE: &str = "Playlist loaded successfully";

/// Playlist creation date: free text or a concrete timestamp
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistDate {
    Text(String),
    Date(DateTime<Utc>),
}

impl PlaylistDate {
    /// Transport form; timestamps render as ISO-8601 with milliseconds
    pub fn to_value(&self) -> Value {
        match self {
            PlaylistDate::Text(text) => Value::from(text.as_str()),
            PlaylistDate::Date(date) => {
                Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

impl Default for PlaylistDate {
    fn default() -> Self {
        PlaylistDate::Text(String::new())
    }
}

impl From<&str> for PlaylistDate {
    fn from(text: &str) -> Self {
        PlaylistDate::Text(text.to_string())
    }
}

impl From<String> for PlaylistDate {
    fn from(text: String) -> Self {
        PlaylistDate::Text(text)
    }
}

impl From<DateTime<Utc>> for PlaylistDate {
    fn from(date: DateTime<Utc>) -> Self {
        PlaylistDate::Date(date)
    }
}

/// Typed, partial initializer for [`Playlist::new`]
#[derive(Debug, Clone, Default)]
pub struct PlaylistInit {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub annotation: Option<String>,
    pub info: Option<String>,
    pub location: Option<String>,
    pub identifier: Option<String>,
    pub image: Option<String>,
    pub date: Option<PlaylistDate>,
    pub license: Option<String>,
    pub attribution: Option<Vec<Record>>,
    pub link: Option<Vec<Record>>,
    pub meta: Option<Vec<Record>>,
    pub extension: Option<Record>,
    /// Entries are converted with [`Track::from_entry`]
    pub track: Vec<TrackEntry>,
}

impl PlaylistInit {
    /// Build an initializer from a partial playlist shape
    ///
    /// Metadata fields may be missing. Track entries are kept as raw
    /// shapes and still face strict validation in [`Playlist::new`].
    pub fn from_shape(shape: &Value) -> Result<Self> {
        let Value::Record(record) = shape else {
            return Err(CspfError::NotAPlaylist);
        };
        let metadata_ok = PlaylistField::ALL
            .iter()
            .filter(|field| **field != PlaylistField::Track)
            .all(|field| {
                record
                    .get(field.name())
                    .map_or(true, |v| validation::is_field_value(field.kind(), v, ShapePolicy::Partial))
            });
        if !metadata_ok {
            return Err(CspfError::NotAPlaylist);
        }

        let text = |field: PlaylistField| record.get(field.name()).and_then(Value::as_str).map(str::to_owned);
        let records = |field: PlaylistField| record.get(field.name()).and_then(Value::to_record_vec);

        let track = match record.get(PlaylistField::Track.name()) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(TrackEntry::from).collect(),
            Some(_) => return Err(CspfError::NotAPlaylist),
        };

        Ok(Self {
            title: text(PlaylistField::Title),
            creator: text(PlaylistField::Creator),
            annotation: text(PlaylistField::Annotation),
            info: text(PlaylistField::Info),
            location: text(PlaylistField::Location),
            identifier: text(PlaylistField::Identifier),
            image: text(PlaylistField::Image),
            date: text(PlaylistField::Date).map(PlaylistDate::Text),
            license: text(PlaylistField::License),
            attribution: records(PlaylistField::Attribution),
            link: records(PlaylistField::Link),
            meta: records(PlaylistField::Meta),
            extension: record
                .get(PlaylistField::Extension.name())
                .and_then(Value::as_record)
                .cloned(),
            track,
        })
    }
}

/// A CSPF playlist document
///
/// Owns its tracks; their order is significant and index-addressable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    title: String,
    creator: String,
    annotation: String,
    info: String,
    location: String,
    identifier: String,
    image: String,
    date: PlaylistDate,
    license: String,
    attribution: Vec<Record>,
    link: Vec<Record>,
    meta: Vec<Record>,
    extension: Record,
    track: Vec<Track>,
}

impl Playlist {
    /// Create a playlist from a typed initializer
    ///
    /// Fails if any track entry is not parsable.
    pub fn new(init: PlaylistInit) -> Result<Self> {
        let track = init
            .track
            .into_iter()
            .map(Track::from_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title: init.title.unwrap_or_default(),
            creator: init.creator.unwrap_or_default(),
            annotation: init.annotation.unwrap_or_default(),
            info: init.info.unwrap_or_default(),
            location: init.location.unwrap_or_default(),
            identifier: init.identifier.unwrap_or_default(),
            image: init.image.unwrap_or_default(),
            date: init.date.unwrap_or_default(),
            license: init.license.unwrap_or_default(),
            attribution: init.attribution.unwrap_or_default(),
            link: init.link.unwrap_or_default(),
            meta: init.meta.unwrap_or_default(),
            extension: init.extension.unwrap_or_default(),
            track,
        })
    }

    /// Strict shape check for a whole playlist, tracks included
    pub fn is_parsable(value: &Value) -> bool {
        is_playlist_shape(value, ShapePolicy::Strict)
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

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn set_image(&mut self, image: impl Into<String>) -> bool {
        self.image = image.into();
        true
    }

    pub fn date(&self) -> &PlaylistDate {
        &self.date
    }

    /// Accepts free text or a timestamp
    pub fn set_date(&mut self, date: impl Into<PlaylistDate>) -> bool {
        self.date = date.into();
        true
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn set_license(&mut self, license: impl Into<String>) -> bool {
        self.license = license.into();
        true
    }

    pub fn attribution(&self) -> &[Record] {
        &self.attribution
    }

    pub fn set_attribution(&mut self, attribution: Vec<Record>) -> bool {
        self.attribution = attribution;
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
    pub fn get(&self, field: PlaylistField) -> Value {
        match field {
            PlaylistField::Title => Value::from(self.title.as_str()),
            PlaylistField::Creator => Value::from(self.creator.as_str()),
            PlaylistField::Annotation => Value::from(self.annotation.as_str()),
            PlaylistField::Info => Value::from(self.info.as_str()),
            PlaylistField::Location => Value::from(self.location.as_str()),
            PlaylistField::Identifier => Value::from(self.identifier.as_str()),
            PlaylistField::Image => Value::from(self.image.as_str()),
            PlaylistField::Date => self.date.to_value(),
            PlaylistField::License => Value::from(self.license.as_str()),
            PlaylistField::Attribution => Value::from(self.attribution.clone()),
            PlaylistField::Link => Value::from(self.link.clone()),
            PlaylistField::Meta => Value::from(self.meta.clone()),
            PlaylistField::Extension => Value::Record(self.extension.clone()),
            PlaylistField::Track => Value::Array(
                self.track
                    .iter()
                    .map(Track::to_transport_shape)
                    .collect(),
            ),
        }
    }

    /// Set any field from an untyped value
    ///
    /// Returns `false` and keeps the old value when `value` has the wrong
    /// type. Dates given as strings are kept as text.
    pub fn set(&mut self, field: PlaylistField, value: &Value) -> bool {
        if !validation::is_field_value(field.kind(), value, ShapePolicy::Strict) {
            return false;
        }

        match (field, value) {
            (PlaylistField::Date, Value::String(s)) => self.set_date(s.as_str()),
            (PlaylistField::Attribution, _) => value
                .to_record_vec()
                .is_some_and(|a| self.set_attribution(a)),
            (PlaylistField::Link, _) => value.to_record_vec().is_some_and(|l| self.set_link(l)),
            (PlaylistField::Meta, _) => value.to_record_vec().is_some_and(|m| self.set_meta(m)),
            (PlaylistField::Extension, Value::Record(r)) => self.set_extension(r.clone()),
            (PlaylistField::Track, Value::Array(items)) => self.set_track(items),
            (_, Value::String(s)) => {
                let slot = match field {
                    PlaylistField::Title => &mut self.title,
                    PlaylistField::Creator => &mut self.creator,
                    PlaylistField::Annotation => &mut self.annotation,
                    PlaylistField::Info => &mut self.info,
                    PlaylistField::Location => &mut self.location,
                    PlaylistField::Identifier => &mut self.identifier,
                    PlaylistField::Image => &mut self.image,
                    PlaylistField::License => &mut self.license,
                    _ => return false,
                };
                slot.clone_from(s);
                true
            }
            _ => false,
        }
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.track
    }

    /// Track at `index`, or `None` when out of range
    pub fn track_by_id(&self, index: usize) -> Option<&Track> {
        self.track.get(index)
    }

    pub fn track_count(&self) -> usize {
        self.track.len()
    }

    /// Is `value` an array of strictly parsable track shapes?
    ///
    /// An empty record does not count as a track.
    pub fn is_track_collection(value: &Value) -> bool {
        matches!(value, Value::Array(items) if items.iter().all(Track::is_parsable))
    }

    /// Would every entry survive [`Track::from_entry`]?
    pub fn are_tracks_parsable(entries: &[TrackEntry]) -> bool {
        entries.iter().all(|entry| match entry {
            TrackEntry::Track(_) => true,
            TrackEntry::Shape(shape) => Track::is_parsable(shape),
        })
    }

    /// Replace the whole track list
    ///
    /// All-or-nothing: the first entry that fails conversion aborts the
    /// call and the current list is kept.
    pub fn set_track<I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<TrackEntry>,
    {
        let next: Result<Vec<Track>> = entries.into_iter().map(Track::from_entry).collect();
        match next {
            Ok(tracks) => {
                self.track = tracks;
                true
            }
            Err(_) => false,
        }
    }

    /// Append one converted entry
    pub fn push_track(&mut self, entry: impl Into<TrackEntry>) -> bool {
        match Track::from_entry(entry) {
            Ok(track) => {
                self.track.push(track);
                true
            }
            Err(_) => false,
        }
    }

    /// Build a track from typed fields and append it
    ///
    /// Fails only for non-finite `track_num` or `duration`.
    pub fn add_track(&mut self, init: TrackInit) -> bool {
        match Track::new(init) {
            Ok(track) => {
                self.track.push(track);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove the first track equal to `candidate`
    pub fn remove_track(&mut self, candidate: impl Into<TrackEntry>) -> bool {
        let Ok(candidate) = Track::from_entry(candidate) else {
            return false;
        };

        match self.track.iter().position(|track| track.compare(&candidate)) {
            Some(index) => {
                self.track.remove(index);
                true
            }
            None => false,
        }
    }

    fn update_track(&mut self, index: usize, update: impl FnOnce(&mut Track) -> bool) -> bool {
        self.track.get_mut(index).is_some_and(update)
    }

    pub fn set_track_location(&mut self, index: usize, location: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_location(location))
    }

    pub fn set_track_identifier(&mut self, index: usize, identifier: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_identifier(identifier))
    }

    pub fn set_track_title(&mut self, index: usize, title: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_title(title))
    }

    pub fn set_track_creator(&mut self, index: usize, creator: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_creator(creator))
    }

    pub fn set_track_annotation(&mut self, index: usize, annotation: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_annotation(annotation))
    }

    pub fn set_track_info(&mut self, index: usize, info: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_info(info))
    }

    pub fn set_track_image(&mut self, index: usize, image: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_image(image))
    }

    pub fn set_track_album(&mut self, index: usize, album: impl Into<String>) -> bool {
        self.update_track(index, |t| t.set_album(album))
    }

    pub fn set_track_track_num(&mut self, index: usize, track_num: f64) -> bool {
        self.update_track(index, |t| t.set_track_num(track_num))
    }

    pub fn set_track_duration(&mut self, index: usize, duration: f64) -> bool {
        self.update_track(index, |t| t.set_duration(duration))
    }

    pub fn set_track_link(&mut self, index: usize, link: Vec<Record>) -> bool {
        self.update_track(index, |t| t.set_link(link))
    }

    pub fn set_track_meta(&mut self, index: usize, meta: Vec<Record>) -> bool {
        self.update_track(index, |t| t.set_meta(meta))
    }

    pub fn set_track_extension(&mut self, index: usize, extension: Record) -> bool {
        self.update_track(index, |t| t.set_extension(extension))
    }

    /// Untyped per-index setter
    pub fn set_track_field(&mut self, index: usize, field: TrackField, value: &Value) -> bool {
        self.update_track(index, |t| t.set(field, value))
    }

    /// Plain record of the whole playlist, tracks in order
    pub fn to_transport_shape(&self) -> Value {
        Value::Record(
            PlaylistField::ALL
                .iter()
                .map(|field| (field.name().to_string(), self.get(*field)))
                .collect(),
        )
    }

    /// Canonical bytes of the transport shape
    ///
    /// Fails if an opaque record holds a non-finite number or nests past
    /// the default [`CodecConfig`] limits, so every successful result is
    /// accepted by [`Playlist::from_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with_config(&CodecConfig::default())
    }

    /// Like [`Playlist::to_bytes`] with explicit limits
    pub fn to_bytes_with_config(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        let bytes = codec::encode_with(&self.to_transport_shape(), config)?;
        log::debug!(
            "Encoded playlist '{}' ({} tracks) into {} bytes",
            self.title,
            self.track.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Decode and validate bytes into a new playlist
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        Self::from_bytes_with_config(bytes, &CodecConfig::default())
    }

    /// Like [`Playlist::from_bytes`] with explicit limits
    pub fn from_bytes_with_config(bytes: impl AsRef<[u8]>, config: &CodecConfig) -> Result<Self> {
        let decoded = codec::decode_with(bytes.as_ref(), config)?;
        if !Self::is_parsable(&decoded) {
            log::debug!("Decoded {} does not match the playlist shape", decoded.kind());
            return Err(CspfError::NotAPlaylist);
        }
        Self::hydrate(&decoded)
    }

    /// Replace this playlist with the one stored in `bytes`
    pub fn load_from_bytes(&mut self, bytes: impl AsRef<[u8]>) -> Result<()> {
        self.load_from_bytes_with(bytes, |_, _, _| {})
    }

    /// Replace this playlist with the one stored in `bytes`, reporting
    /// the outcome to `callback` as `(is_error, message, error)`
    ///
    /// The callback is a notification only: failures are still returned.
    /// On failure the playlist is left exactly as it was.
    pub fn load_from_bytes_with<F>(&mut self, bytes: impl AsRef<[u8]>, mut callback: F) -> Result<()>
    where
        F: FnMut(bool, &str, Option<&CspfError>),
    {
        match Self::from_bytes(bytes) {
            Ok(loaded) => {
                *self = loaded;
                log::debug!("Loaded playlist with {} tracks", self.track.len());
                callback(false, LOAD_SUCCESS_MESSAGE, None);
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected playlist payload: {}", err);
                callback(true, &err.to_string(), Some(&err));
                Err(err)
            }
        }
    }

    /// Build a fresh playlist from an already validated shape
    fn hydrate(shape: &Value) -> Result<Self> {
        let mut playlist = Playlist::default();
        for field in PlaylistField::ALL {
            let applied = shape
                .get(field.name())
                .is_some_and(|value| playlist.set(field, value));
            if !applied {
                return Err(CspfError::NotAPlaylist);
            }
        }
        Ok(playlist)
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.to_transport_shape()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Is `value` a [`Playlist`] instance (identity, not shape)?
pub fn is_playlist_instance(value: &dyn Any) -> bool {
    value.is::<Playlist>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use crate::model::record;
    use chrono::TimeZone;

    fn track_shape(title: &str) -> Value {
        let mut track = Track::default();
        track.set_location("loc");
        track.set_identifier("id");
        track.set_title(title);
        track.set_track_num(1.0);
        track.set_duration(100.0);
        track.to_transport_shape()
    }

    #[test]
    fn test_metadata_setters() {
        let mut playlist = Playlist::default();
        assert!(is_playlist_instance(&playlist));
        assert!(!is_playlist_instance(&Track::default()));

        assert!(playlist.set_title("My Playlist"));
        assert_eq!(playlist.title(), "My Playlist");
        assert!(playlist.set_license("MIT"));
        assert!(playlist.set_attribution(vec![record([("role", Value::from("dj"))])]));
        assert_eq!(playlist.attribution().len(), 1);

        assert!(!playlist.set(PlaylistField::Title, &Value::Number(1.0)));
        assert_eq!(playlist.title(), "My Playlist");
        assert!(!playlist.set(PlaylistField::Attribution, &Value::from("dj")));
        assert_eq!(playlist.attribution().len(), 1);

        assert!(playlist.to_string().contains("My Playlist"));
        assert!(Playlist::is_parsable(&playlist.to_transport_shape()));
    }

    #[test]
    fn test_date_variants() {
        let mut playlist = Playlist::default();
        assert!(playlist.set_date("2024-01-01"));
        assert_eq!(playlist.get(PlaylistField::Date), Value::from("2024-01-01"));

        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        assert!(playlist.set_date(date));
        assert_eq!(playlist.date(), &PlaylistDate::Date(date));
        assert_eq!(
            playlist.get(PlaylistField::Date),
            Value::from("2024-01-01T12:30:00.000Z")
        );

        assert!(!playlist.set(PlaylistField::Date, &Value::Number(0.0)));
    }

    #[test]
    fn test_track_by_id_out_of_range() {
        let playlist = Playlist::new(PlaylistInit {
            track: vec![track_shape("title").into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(playlist.track_by_id(0).map(Track::title), Some("title"));
        assert!(playlist.track_by_id(10).is_none());
    }

    #[test]
    fn test_new_rejects_bad_track_entry() {
        let init = PlaylistInit {
            track: vec![Value::Record(Record::new()).into()],
            ..Default::default()
        };
        assert!(matches!(Playlist::new(init), Err(CspfError::TrackNotParsable)));
    }

    #[test]
    fn test_track_collection_checks() {
        assert!(Playlist::is_track_collection(&Value::Array(vec![track_shape("a")])));
        assert!(!Playlist::is_track_collection(&Value::Array(vec![Value::Record(Record::new())])));
        assert!(!Playlist::is_track_collection(&Value::Record(Record::new())));

        let entries = vec![TrackEntry::from(Track::default()), TrackEntry::from(track_shape("b"))];
        assert!(Playlist::are_tracks_parsable(&entries));
        let entries = vec![TrackEntry::from(Value::Number(42.0))];
        assert!(!Playlist::are_tracks_parsable(&entries));
    }

    #[test]
    fn test_set_track_field_by_index() {
        let mut playlist = Playlist::default();
        playlist.add_track(TrackInit::default());
        assert!(playlist.set_track_field(0, TrackField::Album, &Value::from("album")));
        assert!(!playlist.set_track_field(0, TrackField::Album, &Value::Null));
        assert!(!playlist.set_track_field(1, TrackField::Album, &Value::from("album")));
        assert_eq!(playlist.tracks()[0].album(), "album");
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut playlist = Playlist::default();
        playlist.set_title("kept");
        let bad = codec::encode(&Value::Record(record([("track", Value::Null)]))).unwrap();

        let mut seen = Vec::new();
        let result = playlist.load_from_bytes_with(&bad, |is_error, message, err| {
            seen.push((is_error, message.to_string(), err.is_some()));
        });

        assert!(matches!(result, Err(CspfError::NotAPlaylist)));
        assert_eq!(playlist.title(), "kept");
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0);
        assert!(seen[0].1.contains("not a CSPF playlist"));
        assert!(seen[0].2);
    }

    #[test]
    fn test_to_bytes_rejects_nan_in_extension() {
        let mut playlist = Playlist::default();
        playlist.set_extension(record([("x", Value::Number(f64::NAN))]));
        assert!(matches!(playlist.to_bytes(), Err(CspfError::Encode(_))));
    }

    #[test]
    fn test_to_bytes_rejects_what_from_bytes_would() {
        let mut nested = Record::new();
        for _ in 0..70 {
            nested = record([("inner", Value::Record(nested))]);
        }
        let mut playlist = Playlist::default();
        playlist.set_extension(nested);

        assert!(matches!(
            playlist.to_bytes(),
            Err(CspfError::Encode(EncodeError::TooDeep { limit: 64 }))
        ));
    }
}
