use super::*;

#[test]
fn defaults_point_at_shipped_assets() {
    let paths = AssetPaths::default();
    assert_eq!(paths.template, PathBuf::from("assets/vinyl_template.png"));
    assert_eq!(paths.font, PathBuf::from("assets/fonts/DejaVuSans.ttf"));
}

#[test]
fn rooted_at_keeps_absolute_paths() {
    let paths = AssetPaths {
        template: PathBuf::from("/abs/template.png"),
        font: PathBuf::from("fonts/a.ttf"),
    }
    .rooted_at(Path::new("/srv"));
    assert_eq!(paths.template, PathBuf::from("/abs/template.png"));
    assert_eq!(paths.font, PathBuf::from("/srv/fonts/a.ttf"));
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let paths: AssetPaths = serde_json::from_str(r#"{"font": "x.ttf"}"#).unwrap();
    assert_eq!(paths.font, PathBuf::from("x.ttf"));
    assert_eq!(paths.template, AssetPaths::default().template);
}
