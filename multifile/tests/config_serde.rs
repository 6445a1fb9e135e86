use multifile::{MarkupConfig, SizeUnits, WidgetConfig};

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg: WidgetConfig = serde_json::from_str(
        r#"{ "markup": { "highlight_class": "is-dragover" }, "units": { "labels": ["Б", "КБ", "МБ", "ГБ"] } }"#,
    )
    .unwrap();

    assert_eq!(cfg.markup.highlight_class, "is-dragover");
    assert_eq!(cfg.markup.field_class, MarkupConfig::default().field_class);
    assert_eq!(cfg.units, SizeUnits::russian());
    cfg.markup.validate().unwrap();
}

#[test]
fn empty_object_is_the_default_config() {
    let cfg: WidgetConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, WidgetConfig::default());
}
