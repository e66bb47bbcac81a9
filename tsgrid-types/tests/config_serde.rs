use tsgrid_types::{ArtifactNaming, NormalizeConfig};

#[test]
fn config_roundtrip_preserves_fields() {
    let cfg = NormalizeConfig {
        delimiter: b';',
        time_header: "Timestamp".into(),
        timestamp_formats: vec!["%d-%m-%Y %H.%M".into()],
        preview_rows: 3,
        max_grid_points: Some(10_000),
        artifact_naming: ArtifactNaming::StripExtension,
    };
    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: NormalizeConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(de, cfg);
}

#[test]
fn partial_config_fills_defaults() {
    let de: NormalizeConfig =
        serde_json::from_str(r#"{ "preview_rows": 5 }"#).expect("deserialize partial config");
    let def = NormalizeConfig::default();
    assert_eq!(de.preview_rows, 5);
    assert_eq!(de.delimiter, b',');
    assert_eq!(de.time_header, "Time");
    assert_eq!(de.max_grid_points, None);
    assert_eq!(de.artifact_naming, def.artifact_naming);
}
