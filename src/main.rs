use lignum_paint::config::CONFIG_FILE_NAME;
use lignum_paint::{AppConfig, Application, InputEvent, Outcome, Rgba};
use log::{error, info};
use macroquad::miniquad::window::{order_quit, set_mouse_cursor};
use macroquad::miniquad::CursorIcon;
use macroquad::prelude::*;
use std::path::PathBuf;
#[cfg(target_os = "linux")]
use std::sync::mpsc;

const MARGIN: f32 = 16.0;
const SWATCH_SIZE: f32 = 32.0;
const SWATCH_GAP: f32 = 6.0;
const WINDOW_BACKGROUND: Color = Color::new(0.192, 0.196, 0.204, 1.0);

fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn window_conf() -> Conf {
    let config = AppConfig::load(config_path()).unwrap_or_default();
    Conf {
        window_title: "Lignum Paint".to_owned(),
        window_width: config.canvas_width.saturating_add(2 * MARGIN as i32),
        window_height: config
            .canvas_height
            .saturating_add(3 * MARGIN as i32 + SWATCH_SIZE as i32),
        window_resizable: false,
        ..Default::default()
    }
}

fn to_mq(color: Rgba) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn swatch_origin(index: usize, canvas_height: f32) -> Vec2 {
    vec2(
        MARGIN + index as f32 * (SWATCH_SIZE + SWATCH_GAP),
        2.0 * MARGIN + canvas_height,
    )
}

fn swatch_at(pos: Vec2, count: usize, canvas_height: f32) -> Option<usize> {
    (0..count).find(|&i| {
        let center = swatch_origin(i, canvas_height) + Vec2::splat(SWATCH_SIZE / 2.0);
        pos.distance(center) <= SWATCH_SIZE / 2.0
    })
}

#[cfg(target_os = "linux")]
fn spawn_stylus(config: &AppConfig) -> Option<mpsc::Receiver<lignum_paint::stylus::StylusEvent>> {
    let device = config.stylus_device.clone()?;
    let (sender, receiver) = mpsc::channel();
    lignum_paint::stylus::read_input(device, sender);
    Some(receiver)
}

async fn run() -> anyhow::Result<()> {
    let path = config_path();
    let config = AppConfig::load(&path)?;
    let mut app = Application::new(&config)?;

    #[cfg(target_os = "linux")]
    let stylus = spawn_stylus(&config);

    let (width, height) = {
        let surface = app.window().surface();
        (surface.width(), surface.height())
    };
    let canvas_origin = vec2(MARGIN, MARGIN);
    let texture = Texture2D::from_rgba8(
        u16::try_from(width)?,
        u16::try_from(height)?,
        app.window().surface().snapshot().pixels,
    );
    texture.set_filter(FilterMode::Nearest);

    prevent_quit();
    let mut last_pos: Option<(i32, i32)> = None;

    loop {
        if is_quit_requested() {
            break;
        }

        let screen_pos = Vec2::from(mouse_position());
        let local = screen_pos - canvas_origin;
        let canvas_pos = (local.x.floor() as i32, local.y.floor() as i32);
        let over_canvas = local.x >= 0.0
            && local.y >= 0.0
            && local.x < width as f32
            && local.y < height as f32;
        let mut events = Vec::new();

        if is_mouse_button_pressed(MouseButton::Left) {
            let palette_len = app.window().palette().len();
            if let Some(index) = swatch_at(screen_pos, palette_len, height as f32) {
                app.window_mut().select_swatch(index)?;
            } else if over_canvas {
                events.push(InputEvent::PointerDown {
                    x: canvas_pos.0,
                    y: canvas_pos.1,
                });
            }
        }

        #[cfg(target_os = "linux")]
        {
            if let Some(receiver) = &stylus {
                while let Ok(lignum_paint::stylus::StylusEvent::Contact(touching)) = receiver.try_recv() {
                    if touching && over_canvas {
                        events.push(InputEvent::PointerDown {
                            x: canvas_pos.0,
                            y: canvas_pos.1,
                        });
                    } else if !touching {
                        events.push(InputEvent::PointerUp);
                    }
                }
            }
        }

        if app.window().history().is_drawing() && last_pos != Some(canvas_pos) {
            events.push(InputEvent::PointerMove {
                x: canvas_pos.0,
                y: canvas_pos.1,
            });
        }
        last_pos = Some(canvas_pos);

        if is_mouse_button_released(MouseButton::Left) {
            events.push(InputEvent::PointerUp);
        }

        while let Some(c) = get_char_pressed() {
            events.push(InputEvent::KeyPress(c.to_ascii_uppercase() as u32));
        }

        for event in events {
            if let outcome @ (Outcome::Undone | Outcome::Redone) = app.dispatch(event) {
                info!("{outcome:?}");
            }
        }

        if app.window_mut().take_damage().is_some() {
            texture.update_from_bytes(width, height, app.window().surface().snapshot().pixels);
        }

        set_mouse_cursor(if over_canvas {
            CursorIcon::Crosshair
        } else {
            CursorIcon::Default
        });

        clear_background(WINDOW_BACKGROUND);
        draw_texture(&texture, canvas_origin.x, canvas_origin.y, WHITE);

        let selected = app.window().selected_color();
        for (i, color) in app.window().palette().iter().enumerate() {
            let center = swatch_origin(i, height as f32) + Vec2::splat(SWATCH_SIZE / 2.0);
            draw_circle(center.x, center.y, SWATCH_SIZE / 2.0 - 1.0, to_mq(*color));
            if *color == selected {
                draw_circle_lines(center.x, center.y, SWATCH_SIZE / 2.0, 2.0, WHITE);
            }
        }

        next_frame().await;
    }

    app.shutdown();
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{e:#}");
    }
    order_quit();
}
