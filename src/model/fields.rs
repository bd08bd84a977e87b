//! Field catalogues for tracks and playlists
//!
//! The names here are the exact keys of the transport shape and of the
//! binary encoding.

/// Expected type of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String
    Text,
    /// Finite number
    Number,
    /// Array of plain records
    RecordArray,
    /// Plain record
    Record,
    /// String or date-like value
    Date,
    /// Array of track shapes
    Tracks,
}

/// Fields of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Location,
    Identifier,
    Title,
    Creator,
    Annotation,
    Info,
    Image,
    Album,
    TrackNum,
    Duration,
    Link,
    Meta,
    Extension,
}

impl TrackField {
    /// All track fields in transport order
    pub const ALL: [TrackField; 13] = [
        TrackField::Location,
        TrackField::Identifier,
        TrackField::Title,
        TrackField::Creator,
        TrackField::Annotation,
        TrackField::Info,
        TrackField::Image,
        TrackField::Album,
        TrackField::TrackNum,
        TrackField::Duration,
        TrackField::Link,
        TrackField::Meta,
        TrackField::Extension,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrackField::Location => "location",
            TrackField::Identifier => "identifier",
            TrackField::Title => "title",
            TrackField::Creator => "creator",
            TrackField::Annotation => "annotation",
            TrackField::Info => "info",
            TrackField::Image => "image",
            TrackField::Album => "album",
            TrackField::TrackNum => "trackNum",
            TrackField::Duration => "duration",
            TrackField::Link => "link",
            TrackField::Meta => "meta",
            TrackField::Extension => "extension",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            TrackField::TrackNum | TrackField::Duration => FieldKind::Number,
            TrackField::Link | TrackField::Meta => FieldKind::RecordArray,
            TrackField::Extension => FieldKind::Record,
            _ => FieldKind::Text,
        }
    }

    /// Look a field up by its transport key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Fields of a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaylistField {
    Title,
    Creator,
    Annotation,
    Info,
    Location,
    Identifier,
    Image,
    Date,
    License,
    Attribution,
    Link,
    Meta,
    Extension,
    Track,
}

impl PlaylistField {
    /// All playlist fields in transport order
    pub const ALL: [PlaylistField; 14] = [
        PlaylistField::Title,
        PlaylistField::Creator,
        PlaylistField::Annotation,
        PlaylistField::Info,
        PlaylistField::Location,
        PlaylistField::Identifier,
        PlaylistField::Image,
        PlaylistField::Date,
        PlaylistField::License,
        PlaylistField::Attribution,
        PlaylistField::Link,
        PlaylistField::Meta,
        PlaylistField::Extension,
        PlaylistField::Track,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlaylistField::Title => "title",
            PlaylistField::Creator => "creator",
            PlaylistField::Annotation => "annotation",
            PlaylistField::Info => "info",
            PlaylistField::Location => "location",
            PlaylistField::Identifier => "identifier",
            PlaylistField::Image => "image",
            PlaylistField::Date => "date",
            PlaylistField::License => "license",
            PlaylistField::Attribution => "attribution",
            PlaylistField::Link => "link",
            PlaylistField::Meta => "meta",
            PlaylistField::Extension => "extension",
            PlaylistField::Track => "track",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            PlaylistField::Date => FieldKind::Date,
            PlaylistField::Attribution | PlaylistField::Link | PlaylistField::Meta => {
                FieldKind::RecordArray
            }
            PlaylistField::Extension => FieldKind::Record,
            PlaylistField::Track => FieldKind::Tracks,
            _ => FieldKind::Text,
        }
    }

    /// Look a field up by its transport key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}
