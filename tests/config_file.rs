use lignum_paint::{AppConfig, Application, ConfigError, InputEvent, Outcome, Rgba};
use pretty_assertions::assert_eq;

#[test_log::test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(dir.path().join("nope.json")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test_log::test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lignum_paint.json");
    let mut config = AppConfig::default();
    config.canvas_width = 240;
    config.palette = vec![Rgba::rgb(1, 2, 3)];
    config.history.limit = Some(10);
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

#[test_log::test]
fn broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ canvas_width: ").unwrap();

    assert!(matches!(AppConfig::load(&path), Err(ConfigError::Json(_))));
}

#[test_log::test]
fn configured_keys_and_palette_reach_the_window() {
    let config = AppConfig::from_json(
        r##"{
            "canvas_width": 64,
            "canvas_height": 64,
            "background": "#000000",
            "palette": ["#00ff00"],
            "undo_key": 85,
            "redo_key": 82
        }"##,
    )
    .unwrap();
    let mut app = Application::new(&config).unwrap();
    let green = Rgba::rgb(0, 255, 0);

    app.dispatch(InputEvent::PointerDown { x: 10, y: 10 });
    app.dispatch(InputEvent::PointerMove { x: 20, y: 10 });
    app.dispatch(InputEvent::PointerUp);
    assert_eq!(app.window().surface().pixel(15, 10), Some(green));

    assert_eq!(app.dispatch(InputEvent::KeyPress(90)), Outcome::Ignored);
    assert_eq!(app.dispatch(InputEvent::KeyPress(85)), Outcome::Undone);
    assert_eq!(app.window().surface().pixel(15, 10), Some(Rgba::BLACK));
    assert_eq!(app.dispatch(InputEvent::KeyPress(82)), Outcome::Redone);
    assert_eq!(app.window().surface().pixel(15, 10), Some(green));
}

#[test_log::test]
fn oversized_canvas_is_rejected_before_allocation() {
    let config = AppConfig {
        canvas_width: 70_000,
        ..AppConfig::default()
    };
    assert!(matches!(
        Application::new(&config),
        Err(lignum_paint::AppError::Config(ConfigError::InvalidCanvasSize { width: 70_000, .. }))
    ));
}
