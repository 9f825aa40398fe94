use crate::config::{self, Config};
use crate::core::input::{self, InputState};
use crate::game::chart;
use crate::game::gameplay;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use log::{debug, error, info};
use std::{error::Error, path::Path, sync::Arc, time::Instant};

pub struct App {
    window: Option<Arc<Window>>,
    gameplay_state: gameplay::State,
    input_state: InputState,
    max_delta_time: f32,
    frame_count: u32,
    last_title_update: Instant,
    last_frame_time: Instant,
    last_fps: f32,
}

impl App {
    fn new(config: Config) -> Self {
        // The only blocking read, done once before the first frame.
        let chart = chart::load(Path::new(&config.chart_path));
        let max_delta_time = config.max_delta_time;
        Self {
            window: None,
            gameplay_state: gameplay::init(config, chart),
            input_state: input::init_state(),
            max_delta_time,
            frame_count: 0,
            last_title_update: Instant::now(),
            last_frame_time: Instant::now(),
            last_fps: 0.0,
        }
    }

    fn title(&self) -> String {
        format!(
            "{} - {} | rail {} | notes {} | {:.0} FPS",
            config::WINDOW_TITLE,
            gameplay::load_message(&self.gameplay_state),
            self.gameplay_state.player.current_rail(),
            self.gameplay_state.field.len(),
            self.last_fps
        )
    }

    #[inline(always)]
    fn update_title(&mut self, window: &Window, now: Instant) {
        self.frame_count += 1;
        let elapsed = now.duration_since(self.last_title_update);
        if elapsed.as_secs_f32() >= 1.0 {
            self.last_fps = self.frame_count as f32 / elapsed.as_secs_f32();
            window.set_title(&self.title());
            self.frame_count = 0;
            self.last_title_update = now;
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let window_attributes = Window::default_attributes()
            .with_title(self.title())
            .with_resizable(true)
            .with_inner_size(PhysicalSize::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        self.window = Some(window);
        // Frame timing starts now, not at construction.
        self.last_frame_time = Instant::now();
        info!("Starting event loop...");
        Ok(())
    }

    fn render(&self) {
        let beat = gameplay::current_beat(&self.gameplay_state);
        for info in gameplay::note_render_info(&self.gameplay_state) {
            log::trace!(
                "Note rail {} at ({:.2}, {:.2}, {:.2}) beat {:.2}",
                info.note.rail,
                info.position.x,
                info.position.y,
                info.position.z,
                beat
            );
        }
        for effect in gameplay::hit_effects(&self.gameplay_state) {
            log::trace!(
                "Hit effect at x {:.2}, {:.2}s old",
                effect.position.x,
                effect.elapsed
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref().cloned() else { return; };
        if window_id != window.id() { return; }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested. Shutting down.");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state == ElementState::Pressed
                    && key_event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    info!("Escape pressed. Shutting down.");
                    event_loop.exit();
                    return;
                }
                if let Some(mv) = input::handle_keyboard_input(&key_event, &mut self.input_state) {
                    gameplay::handle_move(&mut self.gameplay_state, mv);
                    debug!("Player moved {:?} to rail {}", mv, self.gameplay_state.player.current_rail());
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let mut delta_time = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;
                if self.max_delta_time > 0.0 {
                    delta_time = delta_time.min(self.max_delta_time);
                }

                let report = gameplay::update(&mut self.gameplay_state, delta_time);
                for hit in &report.hits {
                    debug!(
                        "Hit on rail {} at beat {:.2} (note spawned at beat {:.2})",
                        hit.rail, hit.beat, hit.note_spawn_beat
                    );
                }
                self.render();
                self.update_title(&window, now);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(
            "Session ended at beat {:.2}: {} notes spawned, {} hit.",
            gameplay::current_beat(&self.gameplay_state),
            self.gameplay_state.notes_spawned,
            self.gameplay_state.hits_total
        );
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    config::load();
    let config = config::get();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
