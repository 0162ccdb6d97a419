use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use super::input::InputAggregator;
use super::metrics::MetricsAccumulator;

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub max_render_fps: Option<u32>,
    pub metrics_log_interval: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_title: "Handheld Shell".to_string(),
            window_width: 1280,
            window_height: 800,
            max_render_fps: Some(60),
            metrics_log_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    None,
    Exit,
}

/// The seam the application implements. `frame` runs exactly once per
/// display frame, after the aggregator has advanced its snapshot.
pub trait ShellApp {
    fn frame(&mut self, input: &mut InputAggregator, now: Instant) -> ShellCommand;

    fn on_exit(&mut self) {}
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Drives the per-frame loop: one `InputAggregator::update` plus one
/// `ShellApp::frame` per display frame. Input-layer degradation never
/// interrupts the loop; only window/event-loop failures surface as errors.
pub fn run_shell(config: ShellConfig, mut app: Box<dyn ShellApp>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(
            config.window_width as f64,
            config.window_height as f64,
        ))
        .build(&event_loop)
        .map_err(AppError::CreateWindow)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let frame_target = target_frame_duration(effective_render_cap);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(5));

    info!(
        render_fps_cap = %format_render_cap(effective_render_cap),
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut aggregator = InputAggregator::new();
    let mut metrics = MetricsAccumulator::new(metrics_log_interval);
    let mut last_frame_instant = Instant::now();

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    aggregator.keyboard_mut().handle_key_event(&event);
                }
                WindowEvent::RedrawRequested => {
                    // Single authoritative cap sleep point for frame pacing.
                    let elapsed = Instant::now().saturating_duration_since(last_frame_instant);
                    let cap_sleep = compute_cap_sleep(elapsed, frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    let now = Instant::now();
                    let frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    aggregator.update();
                    if app.frame(&mut aggregator, now) == ShellCommand::Exit {
                        info!(reason = "app_command", "shutdown_requested");
                        window_target.exit();
                    }

                    metrics.record_frame(frame_dt);
                    if let Some(snapshot) = metrics.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                app.on_exit();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}
