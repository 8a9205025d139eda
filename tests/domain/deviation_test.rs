use deviation_analyzer::domain::{Deviation, MediaId};

#[test]
fn given_comment_only_deviation_when_checking_media_then_has_none() {
    let deviation = Deviation::new(vec![], vec![], "Breaker trips".to_string());
    assert!(!deviation.has_media());
}

#[test]
fn given_deviation_with_recording_when_checking_media_then_has_media() {
    let deviation = Deviation::new(vec![], vec![MediaId::new()], String::new());
    assert!(deviation.has_media());
}

#[test]
fn given_new_deviation_when_serialized_then_carries_wire_fields() {
    let image = MediaId::from_raw("img-1");
    let deviation = Deviation::new(vec![image], vec![], "note".to_string());

    let json = serde_json::to_value(&deviation).unwrap();

    assert_eq!(json["id"], deviation.id.as_str());
    assert_eq!(json["images"][0], "img-1");
    assert_eq!(json["recordings"].as_array().unwrap().len(), 0);
    assert_eq!(json["comment"], "note");
    assert!(json["timestamp"].as_str().unwrap().contains('T'));
}

#[test]
fn given_record_without_optional_fields_when_deserialized_then_defaults_apply() {
    let deviation: Deviation =
        serde_json::from_str(r#"{"id":"d-1","timestamp":"2024-05-01T10:00:00"}"#).unwrap();

    assert!(deviation.images.is_empty());
    assert!(deviation.recordings.is_empty());
    assert_eq!(deviation.comment, "");
}
