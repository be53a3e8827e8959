use anyhow::Result;
use glam::Vec3;
use lane_runner::core::Aabb;
use lane_runner::engine::assets::{AssetBundle, ClipAsset, SkinnedMesh};
use lane_runner::engine::game_loop::GameLoop;
use lane_runner::engine::input::InputConfig;
use lane_runner::game::runner::{Player, Pose, RunnerConfig};
use log::{debug, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Built-in character used when no asset pipeline is attached.
/// Sizes are in model units, the runner config scales them down.
fn demo_bundle() -> AssetBundle {
    let bind = Aabb::new(Vec3::new(-40.0, 0.0, -20.0), Vec3::new(40.0, 170.0, 20.0));
    let crouched = Aabb::new(Vec3::new(-45.0, 0.0, -30.0), Vec3::new(45.0, 90.0, 30.0));
    let airborne = Aabb::new(Vec3::new(-50.0, 0.0, -25.0), Vec3::new(50.0, 185.0, 25.0));
    let lying = Aabb::new(Vec3::new(-100.0, 0.0, -40.0), Vec3::new(100.0, 50.0, 40.0));

    let clips = [
        (Pose::Run, 0.7, bind),
        (Pose::Jump, 0.9, airborne),
        (Pose::Roll, 0.8, crouched),
        (Pose::Die, 1.2, lying),
        (Pose::StrafeLeft, 0.4, bind),
        (Pose::StrafeRight, 0.4, bind),
    ];

    let mut bundle = AssetBundle::new().with_mesh(SkinnedMesh::new("runner", bind));
    for (pose, duration, extent) in clips {
        let clip = ClipAsset::new(pose.name(), duration).with_extent(extent);
        bundle.insert_clip(pose.name(), clip);
    }
    bundle
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Lane Runner...");

    let config = RunnerConfig::default();
    let mut player = Player::new(config, demo_bundle())?;
    let input = InputConfig::default();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Lane Runner")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");
    info!("Controls: W/A/S/D or arrows, Enter to reset, K to die, P to pause, Esc to quit");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
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
                if let Some(action) = input.process_keyboard_event(&event) {
                    player.handle_action(action);
                    return;
                }
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                    PhysicalKey::Code(KeyCode::Enter) => player.reset(),
                    PhysicalKey::Code(KeyCode::KeyK) => player.die(),
                    PhysicalKey::Code(KeyCode::KeyP) => game_loop.toggle_pause(),
                    _ => {}
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let dt = game_loop.begin_frame();
                player.update(dt);

                if game_loop.frame_count() % 60 == 0 {
                    debug!(
                        "{:?} lane={} pos=({:.2}, {:.2}) pose={:?} bounds={:?} fps={:.1}",
                        player.state(),
                        player.lane().index(),
                        player.position().x,
                        player.position().y,
                        player.active_pose(),
                        player.bounding_box(),
                        game_loop.fps()
                    );
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
