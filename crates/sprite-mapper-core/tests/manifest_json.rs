use sprite_mapper_core::prelude::*;

#[test]
fn json_hash_keeps_field_names_and_nesting() {
    let cfg = PackerConfig::builder()
        .with_sheet_size(512, 512)
        .image_name("icons.png")
        .build();
    let atlas = pack_layout(vec![("arrow", 100, 50), ("dot", 8, 8)], cfg).expect("layout");
    let v = to_json_hash(&atlas);

    let arrow = &v["frames"]["arrow"];
    assert_eq!(arrow["frame"]["x"], 2);
    assert_eq!(arrow["frame"]["y"], 2);
    assert_eq!(arrow["frame"]["w"], 100);
    assert_eq!(arrow["frame"]["h"], 50);
    assert_eq!(arrow["rotated"], false);
    assert_eq!(arrow["trimmed"], false);
    assert_eq!(arrow["spriteSourceSize"]["x"], 0);
    assert_eq!(arrow["spriteSourceSize"]["y"], 0);
    assert_eq!(arrow["spriteSourceSize"]["w"], 100);
    assert_eq!(arrow["spriteSourceSize"]["h"], 50);
    assert_eq!(arrow["sourceSize"]["w"], 100);
    assert_eq!(arrow["sourceSize"]["h"], 50);
    assert_eq!(arrow.as_object().expect("object").len(), 5);

    let meta = &v["meta"];
    assert_eq!(meta["app"], "Sprite Mapper");
    assert_eq!(meta["image"], "icons.png");
    assert_eq!(meta["format"], "RGBA8888");
    assert_eq!(meta["size"]["w"], 512);
    assert_eq!(meta["size"]["h"], 512);
    assert_eq!(meta["scale"], "1");
    assert!(meta["version"].is_string());
}

#[test]
fn empty_layout_has_empty_frames_object() {
    let atlas =
        pack_layout(Vec::<(&str, u32, u32)>::new(), PackerConfig::default()).expect("layout");
    let v = to_json_hash(&atlas);
    assert!(v["frames"].as_object().expect("frames").is_empty());
    assert_eq!(v["meta"]["size"]["w"], 512);
}

#[test]
fn linear_manifest_reports_grown_size() {
    let cfg = PackerConfig::builder().algorithm(Algorithm::Linear).build();
    let atlas = pack_layout(vec![("a", 10, 20), ("b", 5, 5)], cfg).expect("layout");
    assert_eq!((atlas.width, atlas.height), (23, 24));
    let v = to_json_hash(&atlas);
    assert_eq!(v["meta"]["size"]["w"], 23);
    assert_eq!(v["meta"]["size"]["h"], 24);
}

#[test]
fn pretty_string_round_trips_through_serde_json() {
    let atlas = pack_layout(vec![("a", 4, 4)], PackerConfig::default()).expect("layout");
    let s = sprite_mapper_core::to_json_hash_string(&atlas).expect("string");
    let back: serde_json::Value = serde_json::from_str(&s).expect("parse");
    assert_eq!(back, to_json_hash(&atlas));
}
