use hulu_brawl::config::{DEFAULT_CONFIG_PATH, GameConfig};
use hulu_brawl::game::GameSession;
use hulu_brawl::input::InputState;

mod host;

use host::{HostCommand, SdlRenderer, poll_events};

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Largest window that fits the desktop, never larger than the map itself
fn calculate_window_size(video_subsystem: &sdl2::VideoSubsystem, width: u32, height: u32) -> (u32, u32) {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = display_mode.w as f32 * 0.9;
            let usable_h = display_mode.h as f32 * 0.9;
            let scale = (usable_w / width as f32).min(usable_h / height as f32).min(1.0);
            ((width as f32 * scale) as u32, (height as f32 * scale) as u32)
        }
        Err(e) => {
            log::warn!("could not detect monitor size ({}), using half scale", e);
            (width / 2, height / 2)
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_or_default(DEFAULT_CONFIG_PATH);
    let logical_width = config.map.width as u32;
    let logical_height = config.map.height as u32;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let (window_width, window_height) = calculate_window_size(&video_subsystem, logical_width, logical_height);
    log::info!("window {}x{} (logical {}x{})", window_width, window_height, logical_width, logical_height);

    let window = video_subsystem
        .window("Hulu Brawl", window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(logical_width, logical_height)
        .map_err(|e| e.to_string())?;
    canvas.set_blend_mode(sdl2::render::BlendMode::Blend);

    let mut event_pump = sdl_context.event_pump()?;
    let mut input = InputState::new();
    let mut session = GameSession::new(config.clone());

    'running: loop {
        input.begin_frame();
        if poll_events(&mut event_pump, &mut input) == HostCommand::Close {
            break 'running;
        }

        session.update(FRAME_TIME, &input.snapshot());

        if session.wants_exit() {
            if !session.is_game_over() {
                break 'running;
            }
            // No menu to return to: start over
            session = GameSession::new(config.clone());
            input.release_all();
        }

        canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        canvas.clear();
        {
            let mut renderer = SdlRenderer::new(&mut canvas, logical_width, logical_height);
            session.render(&mut renderer);
        }
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
