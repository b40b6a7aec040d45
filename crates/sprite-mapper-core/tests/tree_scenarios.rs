use sprite_mapper_core::prelude::*;
use sprite_mapper_core::packer::{Packer, TreePacker};

#[test]
fn single_sprite_goes_inside_both_paddings() {
    let res = pack(1, 1, 512, 512, &[Sprite::new("icon", 100, 50)]).expect("pack");
    assert_eq!((res.width, res.height), (512, 512));
    let s = &res.sprites[0];
    assert_eq!((s.x, s.y, s.width, s.height), (2, 2, 100, 50));

    let cfg = PackerConfig::default();
    let atlas = sprite_mapper_core::build_atlas(&res, &cfg);
    assert_eq!(atlas.frames[0].frame, Rect::new(2, 2, 100, 50));
}

#[test]
fn second_large_sprite_runs_out_of_space() {
    let sprites = vec![Sprite::new("a", 300, 300), Sprite::new("b", 300, 300)];
    match pack(1, 1, 512, 512, &sprites) {
        Err(SpriteMapperError::InsufficientSpace {
            name, placed, total, ..
        }) => {
            assert_eq!(name, "b");
            assert_eq!(placed, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected InsufficientSpace, got {:?}", other),
    }
}

#[test]
fn sprite_filling_the_interior_consumes_the_root() {
    let (sheet, border) = (128, 3);
    let inner = sheet - 2 * border;
    let res = pack(0, border, sheet, sheet, &[Sprite::new("full", inner, inner)]).expect("pack");
    assert_eq!((res.sprites[0].x, res.sprites[0].y), (border, border));

    let mut tree = TreePacker::new(0, border, sheet, sheet, FitPolicy::Symmetric);
    let frame = tree
        .pack("full", &Rect::new(0, 0, inner, inner))
        .expect("fits exactly");
    assert_eq!(frame.frame, Rect::new(border, border, inner, inner));
    let root = tree.root();
    assert_eq!(root.occupant, Some(0));
    assert!(root.first.is_none());
    assert!(root.second.is_none());
    assert_eq!(tree.nodes().len(), 1);
}

#[test]
fn empty_input_leaves_sheet_free() {
    let res = pack(1, 1, 512, 256, &[]).expect("empty pack");
    assert_eq!((res.width, res.height), (512, 256));
    assert!(res.sprites.is_empty());

    let atlas = pack_layout(Vec::<(String, u32, u32)>::new(), PackerConfig::default())
        .expect("empty layout");
    assert!(atlas.frames.is_empty());
    assert_eq!(atlas.meta.size, (512, 512));
}

#[test]
fn oversized_sprite_fails_at_root() {
    let wide = pack(0, 0, 64, 64, &[Sprite::new("wide", 65, 10)]);
    assert!(matches!(
        wide,
        Err(SpriteMapperError::InsufficientSpace { placed: 0, .. })
    ));
    let tall = pack(0, 0, 64, 64, &[Sprite::new("tall", 10, 65)]);
    assert!(matches!(
        tall,
        Err(SpriteMapperError::InsufficientSpace { placed: 0, .. })
    ));

    let tree = TreePacker::new(0, 0, 64, 64, FitPolicy::Symmetric);
    assert!(!<TreePacker as Packer<&str>>::can_pack(&tree, &Rect::new(0, 0, 65, 10)));
    assert!(tree.root().is_free_leaf());
}

#[test]
fn zero_sized_sprite_is_invalid_input() {
    let res = pack(1, 1, 64, 64, &[Sprite::new("ok", 4, 4), Sprite::new("bad", 0, 4)]);
    assert!(matches!(res, Err(SpriteMapperError::InvalidInput(_))));
}

#[test]
fn padding_that_eats_the_sheet_is_invalid_input() {
    let res = pack(0, 32, 64, 128, &[]);
    assert!(matches!(res, Err(SpriteMapperError::InvalidInput(_))));
    let res = pack(0, 0, 0, 64, &[]);
    assert!(matches!(
        res,
        Err(SpriteMapperError::InvalidDimensions {
            width: 0,
            height: 64
        })
    ));
}

#[test]
fn second_sprite_goes_below_after_taller_split() {
    // 510x510 interior; the first footprint (102x52) leaves 408 on the right
    // and 458 below, so the region below becomes the first child.
    let sprites = vec![Sprite::new("a", 100, 50), Sprite::new("b", 40, 40)];
    let res = pack(1, 1, 512, 512, &sprites).expect("pack");
    let b = &res.sprites[1];
    assert_eq!((b.x, b.y), (2, 54));
}

#[test]
fn legacy_fit_packs_where_symmetric_does_not() {
    // Interior is 20x11. After the first sprite a 20x5 strip is left, one row
    // short of the 6 a symmetric fit needs for the second.
    let sprites = vec![Sprite::new("a", 18, 4), Sprite::new("b", 18, 4)];
    let sym = pack_tree(1, 0, 20, 11, FitPolicy::Symmetric, &sprites);
    assert!(matches!(sym, Err(SpriteMapperError::InsufficientSpace { .. })));

    let legacy = pack_tree(1, 0, 20, 11, FitPolicy::Legacy, &sprites).expect("legacy fits");
    assert_eq!((legacy.sprites[1].x, legacy.sprites[1].y), (1, 7));
}

#[test]
fn padding_past_u32_fits_nowhere() {
    // 2 * 0x8000_0000 does not fit in u32, so no node can hold the footprint.
    let res = pack(0x8000_0000, 0, u32::MAX, u32::MAX, &[Sprite::new("a", 1, 1)]);
    assert!(matches!(
        res,
        Err(SpriteMapperError::InsufficientSpace { placed: 0, .. })
    ));
}

#[test]
fn footprint_spanning_all_of_u32_still_places() {
    let pad = 0x7FFF_FFFF;
    let res = pack(pad, 0, u32::MAX, u32::MAX, &[Sprite::new("a", 1, 1)]).expect("pack");
    assert_eq!((res.sprites[0].x, res.sprites[0].y), (pad, pad));
}

#[test]
fn legacy_footprint_hanging_past_u32_places_without_overflow() {
    // Width footprint is exactly u32::MAX; the height footprint (2 + 2 * pad)
    // only fits under the single-padding height test.
    let pad = 0x7FFF_FFFF;
    let sprites = [Sprite::new("tall", 1, 2)];
    let res = pack_tree(pad, 0, u32::MAX, u32::MAX, FitPolicy::Legacy, &sprites).expect("pack");
    assert_eq!((res.sprites[0].x, res.sprites[0].y), (pad, pad));

    let res = pack_tree(pad, 0, u32::MAX, u32::MAX, FitPolicy::Symmetric, &sprites);
    assert!(matches!(
        res,
        Err(SpriteMapperError::InsufficientSpace { .. })
    ));
}

#[test]
fn footprint_saturates_at_u32_edges() {
    let mut s = Sprite::new("a", 10, 4);
    s.x = 3;
    s.y = 1;
    assert_eq!(s.footprint(2), Rect::new(1, 0, 14, 8));
    assert_eq!(s.footprint(u32::MAX), Rect::new(0, 0, u32::MAX, u32::MAX));
}
