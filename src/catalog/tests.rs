use super::*;

fn track(id: &str, liked: bool, upvotes: u32) -> Track {
    Track {
        id: id.into(),
        title: format!("track {id}"),
        handle: "artist".into(),
        display_name: "Artist".into(),
        image_url: String::new(),
        audio_url: String::new(),
        is_liked: liked,
        upvote_count: upvotes,
    }
}

#[test]
fn toggle_like_from_zero_then_back() {
    let mut catalog = Catalog::new(vec![track("t1", false, 0)]);

    catalog.toggle_like("t1");
    let t = catalog.get(0).unwrap();
    assert!(t.is_liked);
    assert_eq!(t.upvote_count, 1);

    catalog.toggle_like("t1");
    let t = catalog.get(0).unwrap();
    assert!(!t.is_liked);
    assert_eq!(t.upvote_count, 0);
}

#[test]
fn double_toggle_round_trips() {
    let mut catalog = Catalog::new(vec![track("t1", true, 7)]);
    let original = catalog.get(0).unwrap().clone();

    catalog.toggle_like("t1");
    catalog.toggle_like("t1");

    assert_eq!(catalog.get(0).unwrap(), &original);
}

#[test]
fn unlike_at_zero_saturates() {
    // A liked track whose count is already zero must not underflow.
    let mut catalog = Catalog::new(vec![track("t1", true, 0)]);

    catalog.toggle_like("t1");
    let t = catalog.get(0).unwrap();
    assert!(!t.is_liked);
    assert_eq!(t.upvote_count, 0);
}

#[test]
fn unknown_id_is_a_no_op() {
    let mut catalog = Catalog::new(vec![track("t1", false, 3)]);
    let before = catalog.get(0).unwrap().clone();

    catalog.toggle_like("nope");

    assert_eq!(catalog.get(0).unwrap(), &before);
}

#[test]
fn toggle_only_touches_the_target_record() {
    let mut catalog = Catalog::new(vec![track("a", false, 1), track("b", false, 2)]);

    catalog.toggle_like("b");

    assert!(!catalog.get(0).unwrap().is_liked);
    assert_eq!(catalog.get(0).unwrap().upvote_count, 1);
    assert!(catalog.get(1).unwrap().is_liked);
    assert_eq!(catalog.get(1).unwrap().upvote_count, 3);
}

#[test]
fn track_decodes_from_snake_case_json() {
    let json = r#"{
        "id": "s1",
        "title": "First Light",
        "handle": "aurora",
        "display_name": "Aurora",
        "image_url": "https://cdn.example/s1.jpg",
        "audio_url": "https://cdn.example/s1.mp3",
        "is_liked": false,
        "upvote_count": 12
    }"#;

    let t: Track = serde_json::from_str(json).unwrap();
    assert_eq!(t.id, "s1");
    assert_eq!(t.display_name, "Aurora");
    assert!(t.has_audio());
    assert_eq!(t.upvote_count, 12);
}

#[test]
fn missing_optional_fields_default() {
    let json = r#"{
        "id": "s2",
        "title": "Silent",
        "handle": "aurora",
        "display_name": "Aurora",
        "image_url": ""
    }"#;

    let t: Track = serde_json::from_str(json).unwrap();
    assert!(!t.has_audio());
    assert!(!t.is_liked);
    assert_eq!(t.upvote_count, 0);
}
