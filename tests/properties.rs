//! Property-based tests for the playlist model
//!
//! Uses proptest to check the setter and round-trip laws across random
//! documents.

use chrono::{TimeZone, Utc};
use cspf::model::{record, Playlist, PlaylistInit, Record, Track, TrackEntry, TrackField, TrackInit, Value};
use cspf::PlaylistDate;
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,12}".prop_map(Value::from),
        "\\PC{0,200}".prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::Number),
        any::<i64>().prop_map(|n| Value::Number(n as f64)),
        any::<bool>().prop_map(Value::Bool),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bytes),
        Just(Value::Null),
    ]
}

/// Nested values: arrays and records of scalars, several levels deep
fn arbitrary_value() -> impl Strategy<Value = Value> {
    arbitrary_scalar().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4).prop_map(Value::Record),
        ]
    })
}

fn arbitrary_record() -> impl Strategy<Value = Record> {
    prop::collection::btree_map("[a-z]{1,8}", arbitrary_value(), 0..4)
}

fn arbitrary_date() -> impl Strategy<Value = PlaylistDate> {
    prop_oneof![
        "[0-9A-Za-z: -]{0,20}".prop_map(PlaylistDate::from),
        (0i64..4_102_444_800_000).prop_map(|millis| {
            PlaylistDate::from(Utc.timestamp_millis_opt(millis).unwrap())
        }),
    ]
}

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        prop::collection::vec("[A-Za-z0-9 ./:]{0,20}", 8),
        0u32..500,
        0.0f64..1.0e7,
        prop::collection::vec(arbitrary_record(), 0..3),
        prop::collection::vec(arbitrary_record(), 0..3),
        arbitrary_record(),
    )
        .prop_map(|(text, track_num, duration, link, meta, extension)| {
            Track::new(TrackInit {
                location: Some(text[0].clone()),
                identifier: Some(text[1].clone()),
                title: Some(text[2].clone()),
                creator: Some(text[3].clone()),
                annotation: Some(text[4].clone()),
                info: Some(text[5].clone()),
                image: Some(text[6].clone()),
                album: Some(text[7].clone()),
                track_num: Some(track_num as f64),
                duration: Some(duration),
                link: Some(link),
                meta: Some(meta),
                extension: Some(extension),
            })
            .expect("finite numbers always build a track")
        })
}

fn arbitrary_playlist() -> impl Strategy<Value = Playlist> {
    (
        "[A-Za-z0-9 ]{0,30}",
        "[A-Za-z ]{0,20}",
        arbitrary_date(),
        prop::collection::vec(arbitrary_record(), 0..3),
        arbitrary_record(),
        prop::collection::vec(arbitrary_track(), 0..8),
    )
        .prop_map(|(title, creator, date, attribution, extension, tracks)| {
            Playlist::new(PlaylistInit {
                title: Some(title),
                creator: Some(creator),
                date: Some(date),
                attribution: Some(attribution),
                extension: Some(extension),
                track: tracks.into_iter().map(TrackEntry::from).collect(),
                ..Default::default()
            })
            .expect("tracks are already typed")
        })
}

// ===== Property Tests =====

proptest! {
    /// Property: decoding the encoded bytes reproduces the transport shape
    #[test]
    fn bytes_round_trip(playlist in arbitrary_playlist()) {
        let bytes = playlist.to_bytes().unwrap();
        let loaded = Playlist::from_bytes(&bytes).unwrap();
        prop_assert_eq!(loaded.to_transport_shape(), playlist.to_transport_shape());
    }

    /// Property: hydrating an existing playlist replaces all of its state
    #[test]
    fn load_into_existing_replaces_state(a in arbitrary_playlist(), b in arbitrary_playlist()) {
        let mut target = a;
        target.load_from_bytes(b.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(target.to_transport_shape(), b.to_transport_shape());
    }

    /// Property: accepted values read back unchanged
    #[test]
    fn set_then_get(text in "[A-Za-z0-9 ]{0,20}", n in -1.0e9f64..1.0e9, ext in arbitrary_record()) {
        let mut track = Track::default();
        prop_assert!(track.set_title(text.clone()));
        prop_assert_eq!(track.title(), text.as_str());
        prop_assert!(track.set_duration(n));
        prop_assert_eq!(track.duration(), n);
        prop_assert!(track.set_extension(ext.clone()));
        prop_assert_eq!(track.extension(), &ext);
    }

    /// Property: rejected values leave the field unchanged
    #[test]
    fn rejected_values_keep_state(track in arbitrary_track(), field_index in 0usize..13) {
        let field = TrackField::ALL[field_index];
        let before = track.get(field);
        let mut track = track;

        // a bool never matches any track field
        prop_assert!(!track.set(field, &Value::Bool(true)));
        prop_assert_eq!(track.get(field), before);
    }

    /// Property: equal shapes give equal tracks; any edit breaks equality
    #[test]
    fn compare_tracks_edits(track in arbitrary_track(), suffix in "[a-z]{1,5}") {
        let shape = track.to_transport_shape();
        let a = Track::from_entry(&shape).unwrap();
        let mut b = Track::from_entry(&shape).unwrap();
        prop_assert!(a.compare(&a));
        prop_assert!(a.compare(&b));

        let title = format!("{}{}", b.title(), suffix);
        b.set_title(title);
        prop_assert!(!a.compare(&b));
    }

    /// Property: removing a present track shrinks the list by exactly one
    #[test]
    fn remove_shrinks_by_one(tracks in prop::collection::vec(arbitrary_track(), 1..8), pick in any::<prop::sample::Index>()) {
        let mut playlist = Playlist::default();
        prop_assert!(playlist.set_track(tracks.clone()));
        let candidate = tracks[pick.index(tracks.len())].clone();

        let len = playlist.track_count();
        prop_assert!(playlist.remove_track(&candidate));
        prop_assert_eq!(playlist.track_count(), len - 1);
    }
}

#[test]
fn nan_extension_values_never_compare_equal() {
    let mut track = Track::default();
    track.set_extension(record([("x", Value::Number(f64::NAN))]));
    assert!(!track.compare(&track.clone()));
}
