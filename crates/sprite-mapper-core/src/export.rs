use crate::model::Atlas;
use serde_json::{Value, json};

/// Manifest in the TexturePacker "JSON hash" shape, frames keyed by sprite name.
/// Shape: `{ frames: { name: { frame, rotated, trimmed, spriteSourceSize, sourceSize } }, meta }`.
pub fn to_json_hash<K: ToString>(atlas: &Atlas<K>) -> Value {
    let mut frames = serde_json::Map::new();
    for fr in &atlas.frames {
        let frame = json!({"x": fr.frame.x, "y": fr.frame.y, "w": fr.frame.w, "h": fr.frame.h});
        let sprite_source_size =
            json!({"x": fr.source.x, "y": fr.source.y, "w": fr.source.w, "h": fr.source.h});
        let source_size = json!({"w": fr.source_size.0, "h": fr.source_size.1});
        frames.insert(
            fr.key.to_string(),
            json!({
                "frame": frame,
                "rotated": fr.rotated,
                "trimmed": fr.trimmed,
                "spriteSourceSize": sprite_source_size,
                "sourceSize": source_size,
            }),
        );
    }
    let meta = &atlas.meta;
    json!({
        "frames": frames,
        "meta": {
            "app": meta.app,
            "version": meta.version,
            "image": meta.image,
            "format": meta.format,
            "size": {"w": meta.size.0, "h": meta.size.1},
            "scale": meta.scale,
        }
    })
}

/// Pretty-printed [`to_json_hash`].
pub fn to_json_hash_string<K: ToString>(atlas: &Atlas<K>) -> crate::error::Result<String> {
    Ok(serde_json::to_string_pretty(&to_json_hash(atlas))?)
}
