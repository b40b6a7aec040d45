use sprite_mapper_core::config::{Algorithm, FitPolicy, PackerConfig, SortOrder};
use sprite_mapper_core::error::SpriteMapperError;

#[test]
fn defaults_match_the_stock_sheet() {
    let cfg = PackerConfig::default();
    assert_eq!((cfg.sheet_width, cfg.sheet_height), (512, 512));
    assert_eq!((cfg.sprite_padding, cfg.sheet_padding), (1, 1));
    assert_eq!(cfg.algorithm, Algorithm::Tree);
    assert_eq!(cfg.sort_order, SortOrder::MaxSideDesc);
    assert_eq!(cfg.fit_policy, FitPolicy::Symmetric);
    assert_eq!(cfg.image_name, "icons.png");
    assert!(cfg.validate().is_ok());
}

#[test]
fn zero_sheet_is_rejected() {
    let cfg = PackerConfig {
        sheet_width: 0,
        ..Default::default()
    };
    match cfg.validate() {
        Err(SpriteMapperError::InvalidDimensions { width, height }) => {
            assert_eq!((width, height), (0, 512));
        }
        other => panic!("Expected InvalidDimensions, got {:?}", other),
    }
}

#[test]
fn border_leaving_no_interior_is_rejected() {
    let cfg = PackerConfig {
        sheet_width: 100,
        sheet_height: 300,
        sheet_padding: 50,
        ..Default::default()
    };
    match cfg.validate() {
        Err(SpriteMapperError::InvalidInput(msg)) => assert!(msg.contains("sheet_padding")),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }

    let ok = PackerConfig {
        sheet_padding: 49,
        ..cfg
    };
    assert!(ok.validate().is_ok());
    assert_eq!(ok.interior().w, 2);
}

#[test]
fn enum_names_parse_case_insensitively() {
    assert_eq!("LINEAR".parse::<Algorithm>(), Ok(Algorithm::Linear));
    assert_eq!("legacy".parse::<FitPolicy>(), Ok(FitPolicy::Legacy));
    assert_eq!("Max_Side_Desc".parse::<SortOrder>(), Ok(SortOrder::MaxSideDesc));
    assert!("spiral".parse::<Algorithm>().is_err());
}

#[test]
fn config_deserializes_with_defaults_for_missing_fields() {
    let cfg: PackerConfig = serde_json::from_str(
        r#"{"sheet_width":256,"sheet_height":128,"sprite_padding":0,"sheet_padding":2,"fit_policy":"legacy"}"#,
    )
    .expect("parse");
    assert_eq!(cfg.fit_policy, FitPolicy::Legacy);
    assert_eq!(cfg.algorithm, Algorithm::Tree);
    assert_eq!(cfg.sort_order, SortOrder::MaxSideDesc);
    assert_eq!(cfg.interior().h, 124);
}
