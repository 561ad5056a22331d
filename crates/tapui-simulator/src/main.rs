//! Desktop simulator for the tapui widgets.
//!
//! Renders a demo screen in an SDL2 window via `embedded-graphics-simulator`
//! and feeds the mouse to the dispatcher as a touch panel: holding the left
//! button is a finger on the glass.
//!
//! # Demo widgets
//!
//! | Widget | Behavior                                  |
//! |--------|-------------------------------------------|
//! | Greet  | Logs a greeting once per press            |
//! | +1     | Counts up on every tick while held        |
//! | LED    | Toggle, logs its new state                |
//! | Close  | Deletes itself                            |
//! | Quit   | Stops the simulator                       |
//!
//! Press Q or Escape to quit as well.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use tapui::ui::styling::{GREEN, RED, WHITE};
use tapui::{
    Bounds, Dispatcher, MomentaryButton, ToggleButton, TouchInput, TouchPoint, UiConfig,
    WidgetError, WidgetHandle, WidgetRegistry,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

type Display = SimulatorDisplay<Rgb565>;
type Ui = WidgetRegistry<NoopRawMutex, Display>;

static QUIT: AtomicBool = AtomicBool::new(false);
static COUNTER: AtomicU32 = AtomicU32::new(0);

// ---------------------------------------------------------------------------
// Mouse as touch panel
// ---------------------------------------------------------------------------

/// Left mouse button state, updated from SDL events between ticks.
#[derive(Default)]
struct MouseTouch {
    down: bool,
    position: TouchPoint,
}

impl MouseTouch {
    fn track(&mut self, point: Point) {
        self.position = TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16);
    }
}

impl TouchInput for MouseTouch {
    type Error = Infallible;

    async fn is_touching(&mut self) -> Result<bool, Infallible> {
        Ok(self.down)
    }

    async fn last_position(&mut self) -> Result<TouchPoint, Infallible> {
        Ok(self.position)
    }
}

// ---------------------------------------------------------------------------
// Demo screen
// ---------------------------------------------------------------------------

fn build_demo(ui: &Ui) -> Result<(), WidgetError> {
    let greet = MomentaryButton::new(Bounds::new(10, 20, 100, 50)?, "Greet", GREEN)?
        .with_pressed_color(WHITE);
    let plus = MomentaryButton::new(Bounds::new(130, 20, 60, 50)?, "+1", GREEN)?.with_hold(true);
    let led = ToggleButton::new(Bounds::new(210, 20, 100, 50)?, "LED")?;
    let close = MomentaryButton::new(Bounds::new(10, 170, 100, 50)?, "Close", RED)?;
    let quit = MomentaryButton::new(Bounds::new(210, 170, 100, 50)?, "Quit", RED)?;

    // SimulatorDisplay draws with `Infallible`, so these patterns are irrefutable
    let Ok(_) = ui.create_momentary(greet, Some(Box::new(|_: &Ui| info!("Hello!"))));
    let Ok(_) = ui.create_momentary(
        plus,
        Some(Box::new(|_: &Ui| {
            let count = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
            info!("Counter: {}", count);
        })),
    );
    let Ok(_) = ui.create_toggle(
        led,
        Some(Box::new(|_: &Ui, on: bool| {
            info!("LED {}", if on { "on" } else { "off" })
        })),
    );

    let me: Arc<Mutex<Option<WidgetHandle>>> = Arc::new(Mutex::new(None));
    let target = me.clone();
    let Ok(close_handle) = ui.create_momentary(
        close,
        Some(Box::new(move |ui: &Ui| {
            if let Ok(mut slot) = target.lock()
                && let Some(handle) = slot.take()
            {
                info!("Close pressed, removing it");
                let Ok(()) = ui.delete(handle);
            }
        })),
    );
    if let Ok(mut slot) = me.lock() {
        *slot = Some(close_handle);
    }

    let Ok(_) = ui.create_momentary(
        quit,
        Some(Box::new(|_: &Ui| QUIT.store(true, Ordering::Relaxed))),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting tapui simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );

    let config = UiConfig::default();
    let display = Display::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let ui = Ui::new(display, config.palette());

    if let Err(e) = build_demo(&ui) {
        error!("Demo screen rejected: {}", e);
        return;
    }

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("tapui Simulator", &output_settings);

    let mut dispatcher = match Dispatcher::new(&ui, MouseTouch::default(), &config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!("Invalid config: {}", e);
            return;
        }
    };
    let frame = Duration::from_millis(dispatcher.poll_interval().as_millis());

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    ui.with_display(|display| window.update(display));

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let mouse = dispatcher.touch_mut();
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse.down = true;
                    mouse.track(point);
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse.down = false;
                    mouse.track(point);
                }

                SimulatorEvent::MouseMove { point } => mouse.track(point),

                _ => {}
            }
        }

        // --- Dispatch -----------------------------------------------------
        if let Err(e) = block_on(dispatcher.tick()) {
            error!("Dispatch error: {:?}", e);
            break;
        }
        if QUIT.load(Ordering::Relaxed) {
            break;
        }

        ui.with_display(|display| window.update(display));

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }

    info!("Simulator exiting");
}
