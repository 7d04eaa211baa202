use anyhow::Result;
use image::RgbaImage;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetManager;
use engine::clock::FrameClock;
use engine::input::{Action, InputManager};
use engine::renderer::SoftwareSurface;
use game::level::{assemble, standard_spawn_table, LevelGrid};
use game::World;

const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 384;

const SHEETS: [&str; 8] = [
    "map.png",
    "tilesheet.png",
    "potion.png",
    "life.png",
    "strength.png",
    "goblin.png",
    "beholder.png",
    "main_dude.png",
];

fn demo_grid() -> LevelGrid {
    LevelGrid::from_rows([
        vec!["W", "W", "W", "W", "W", "W", "W", "W", "W", "W"],
        vec!["W", "F", "F", "F", "F", "F", "F", "F", "E", "W"],
        vec!["W", "F", "pHealth", "F", "W", "F", "eGoblin", "F", "F", "W"],
        vec!["W", "F", "F", "F", "W", "F", "F", "F", "F", "W"],
        vec!["W", "pLife", "F", "F", "F", "F", "eBeholder", "F", "F", "W"],
        vec!["W", "F", "F", "S", "F", "F", "F", "pStrength", "F", "W"],
        vec!["W", "W", "W", "W", "W", "W", "W", "W", "W", "W"],
    ])
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Dungeon...");

    // Load every sheet up front
    let mut assets = AssetManager::new("assets");
    for name in SHEETS {
        assets.queue_sheet(name);
    }
    assets.load_all()?;

    // Assemble the level into the world
    let table = standard_spawn_table(&assets)?;
    let mut world = World::new();
    assemble(&demo_grid(), &table)?.register_into(&mut world);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Dungeon")
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(false)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut clock = FrameClock::new();
    let mut input = InputManager::new();
    let mut framebuffer = RgbaImage::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    ..
                } => {
                    input.process_keyboard_event(&event);
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    if input.state().just_pressed(Action::Pause) {
                        clock.toggle_pause();
                    }

                    let updates = clock.begin_frame();
                    let snapshot = input.snapshot();
                    for _ in 0..updates {
                        world.update_all(clock.fixed_timestep(), &snapshot);
                    }

                    let mut surface = SoftwareSurface::new(&mut framebuffer, &assets);
                    surface.clear([20, 16, 24, 255]);
                    let tick = if clock.is_paused() {
                        0.0
                    } else {
                        clock.render_tick()
                    };
                    world.draw_all(tick, &mut surface);

                    input.end_frame();
                }
                Event::AboutToWait => {
                    // Request redraw on next frame
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
