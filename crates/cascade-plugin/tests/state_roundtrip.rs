//! State save/restore roundtrip tests.
//!
//! Verifies that parameter state survives the 24-byte codec, including
//! extremes, files on disk and malformed streams.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use cascade_core::ParamId;
use cascade_plugin::{ShaperShared, StateError};

fn save(shared: &ShaperShared) -> Vec<u8> {
    let mut bytes = Vec::new();
    shared.save_state(&mut bytes).unwrap();
    bytes
}

#[test]
fn state_roundtrip_defaults() {
    let shared = ShaperShared::new();
    let bytes = save(&shared);
    assert_eq!(bytes.len(), cascade_plugin::STATE_LEN);

    let restored = ShaperShared::new();
    restored.load_state(&mut bytes.as_slice()).unwrap();
    assert_eq!(restored.values(), shared.values());
}

#[test]
fn state_roundtrip_extremes() {
    for use_max in [true, false] {
        let shared = ShaperShared::new();
        for (i, param) in shared.descriptors().iter().enumerate() {
            shared.set_value(i, if use_max { param.max } else { param.min });
        }
        let bytes = save(&shared);

        let restored = ShaperShared::new();
        restored.load_state(&mut bytes.as_slice()).unwrap();
        for i in 0..shared.param_count() {
            assert_eq!(
                shared.get_value(i),
                restored.get_value(i),
                "param {i} mismatch (max = {use_max})"
            );
        }
    }
}

#[test]
fn restored_state_drives_normalized_view() {
    let shared = ShaperShared::new();
    shared.set_value(1, 2.0);
    shared.set_value(2, 1.0);
    shared.set_value(3, 0.0);
    let bytes = save(&shared);

    let restored = ShaperShared::new();
    restored.load_state(&mut bytes.as_slice()).unwrap();
    assert_eq!(restored.normalized_value(ParamId(102)), Some(1.0));
    assert_eq!(restored.normalized_value(ParamId(103)), Some(0.0));
    assert_eq!(restored.normalized_value(ParamId(104)), Some(0.0));
}

#[test]
fn state_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preset.bin");

    let shared = ShaperShared::new();
    shared.set_value(0, 1.75);
    shared.set_value(4, 0.4);
    shared.set_value(5, 1.0);
    {
        let mut writer = BufWriter::new(File::create(&path).unwrap());
        shared.save_state(&mut writer).unwrap();
        writer.flush().unwrap();
    }

    let restored = ShaperShared::new();
    let mut reader = BufReader::new(File::open(&path).unwrap());
    restored.load_state(&mut reader).unwrap();
    assert_eq!(restored.values(), shared.values());
    assert!(restored.is_bypassed());
}

#[test]
fn truncated_stream_is_rejected_without_changes() {
    let shared = ShaperShared::new();
    shared.set_value(0, 1.9);
    let bytes = save(&shared);

    let target = ShaperShared::new();
    let before = target.values();
    for cut in [0, 1, 4, 12, 23] {
        let err = target.load_state(&mut &bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, StateError::Truncated { expected: 24, found } if found == cut),
            "cut {cut}: {err}"
        );
        assert_eq!(target.values(), before);
    }
}

#[test]
fn infinite_field_is_rejected_without_changes() {
    let mut bytes = save(&ShaperShared::new());
    bytes[4..8].copy_from_slice(&f32::INFINITY.to_le_bytes());

    let target = ShaperShared::new();
    target.set_value(0, 0.2);
    let before = target.values();
    let err = target.load_state(&mut bytes.as_slice()).unwrap_err();
    assert!(matches!(
        err,
        StateError::NonFinite {
            field: "coef_negative",
            ..
        }
    ));
    assert_eq!(target.values(), before);
}
