mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{BrokenTouch, BusError, FlakyDisplay, PanelError, ScriptedTouch, Ui, ui};
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::signal::Signal;
use tapui::ui::styling::{GREEN, RED, WHITE, pressed_shade};
use tapui::{
    Bounds, DispatchError, Dispatcher, FrameBuffer, MomentaryButton, Palette, StopSignal,
    ToggleButton, TouchPoint, UiConfig, WidgetHandle, WidgetRegistry,
};

type Scripted<'r> = Dispatcher<'r, NoopRawMutex, FrameBuffer, ScriptedTouch>;

fn dispatcher(registry: &Ui, touch: ScriptedTouch) -> Scripted<'_> {
    Dispatcher::new(registry, touch, &UiConfig::default()).unwrap()
}

fn ticks(dispatcher: &mut Scripted<'_>, n: usize) {
    for _ in 0..n {
        block_on(dispatcher.tick()).unwrap();
    }
}

fn counter() -> (Arc<AtomicUsize>, Box<dyn FnMut(&Ui) + Send>) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = count.clone();
    let callback = Box::new(move |_: &Ui| {
        inner.fetch_add(1, Ordering::SeqCst);
    });
    (count, callback)
}

fn button(x: i32, y: i32, w: i32, h: i32) -> MomentaryButton {
    MomentaryButton::new(Bounds::new(x, y, w, h).unwrap(), "", GREEN).unwrap()
}

#[test]
fn test_greet_fires_once_per_press() {
    let ui = ui();
    let (count, callback) = counter();
    let greet = MomentaryButton::new(Bounds::new(10, 20, 100, 50).unwrap(), "Greet", GREEN).unwrap();
    let handle = ui.create_momentary(greet, Some(callback)).unwrap();

    let mut touch = ScriptedTouch::held(50, 40, 3);
    touch.push(None);
    touch.push(Some((50, 40)));
    let mut dispatcher = dispatcher(&ui, touch);

    ticks(&mut dispatcher, 3);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(ui.is_pressed(handle), Some(true));
    assert_eq!(
        ui.with_display(|fb| fb.pixel(11, 21)),
        Some(pressed_shade(GREEN))
    );

    ticks(&mut dispatcher, 1);
    assert_eq!(ui.is_pressed(handle), Some(false));
    assert_eq!(ui.with_display(|fb| fb.pixel(11, 21)), Some(GREEN));

    ticks(&mut dispatcher, 1);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_hold_fires_every_tick() {
    let ui = ui();
    let (count, callback) = counter();
    ui.create_momentary(button(0, 0, 40, 40).with_hold(true), Some(callback))
        .unwrap();

    let mut dispatcher = dispatcher(&ui, ScriptedTouch::held(20, 20, 5));
    ticks(&mut dispatcher, 5);

    assert_eq!(count.load(Ordering::SeqCst), 5);
}

#[test]
fn test_toggle_alternates_and_reports_state() {
    let ui = ui();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let toggle = ToggleButton::new(Bounds::new(0, 0, 80, 40).unwrap(), "LED")
        .unwrap()
        .with_colors(GREEN, RED);
    let handle = ui
        .create_toggle(
            toggle,
            Some(Box::new(move |_: &Ui, on: bool| log.lock().unwrap().push(on))),
        )
        .unwrap();
    assert_eq!(ui.with_display(|fb| fb.pixel(1, 1)), Some(RED));

    // press, hold, release, press, release, press
    let touch = ScriptedTouch::new([
        Some((10, 10)),
        Some((10, 10)),
        None,
        Some((10, 10)),
        None,
        Some((10, 10)),
    ]);
    let mut dispatcher = dispatcher(&ui, touch);
    ticks(&mut dispatcher, 6);

    assert_eq!(*seen.lock().unwrap(), vec![true, false, true]);
    assert_eq!(ui.is_toggled(handle), Some(true));
    assert_eq!(ui.with_display(|fb| fb.pixel(1, 1)), Some(GREEN));
}

#[test]
fn test_hit_test_includes_far_edge() {
    let ui = ui();
    let (count, callback) = counter();
    ui.create_momentary(button(10, 20, 100, 50), Some(callback))
        .unwrap();

    let touch = ScriptedTouch::new([Some((110, 70)), None, Some((111, 70)), None, Some((10, 20))]);
    let mut dispatcher = dispatcher(&ui, touch);

    let report = block_on(dispatcher.tick()).unwrap();
    assert_eq!(report.hits, 1);
    ticks(&mut dispatcher, 1);
    let report = block_on(dispatcher.tick()).unwrap();
    assert_eq!(report.hits, 0);
    ticks(&mut dispatcher, 2);

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_overlapping_widgets_all_fire() {
    let ui = ui();
    let (first, first_cb) = counter();
    let (second, second_cb) = counter();
    ui.create_momentary(button(0, 0, 50, 50), Some(first_cb)).unwrap();
    ui.create_momentary(button(25, 25, 50, 50), Some(second_cb))
        .unwrap();

    let mut dispatcher = dispatcher(&ui, ScriptedTouch::held(30, 30, 1));
    let report = block_on(dispatcher.tick()).unwrap();

    assert_eq!(report.hits, 2);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_slide_off_stays_pressed_until_panel_released() {
    let ui = ui();
    let handle = ui.create_momentary(button(0, 0, 40, 40), None).unwrap();

    let touch = ScriptedTouch::new([Some((20, 20)), Some((200, 200)), Some((200, 200)), None]);
    let mut dispatcher = dispatcher(&ui, touch);

    ticks(&mut dispatcher, 3);
    assert_eq!(ui.is_pressed(handle), Some(true));

    ticks(&mut dispatcher, 1);
    assert_eq!(ui.is_pressed(handle), Some(false));
}

#[test]
fn test_widget_without_callback_still_redraws() {
    let ui = ui();
    let button = button(0, 0, 40, 40).with_pressed_color(WHITE);
    ui.create_momentary(button, None).unwrap();

    let mut dispatcher = dispatcher(&ui, ScriptedTouch::held(5, 5, 1));
    ticks(&mut dispatcher, 1);

    assert_eq!(ui.with_display(|fb| fb.pixel(1, 1)), Some(WHITE));
}

#[test]
fn test_callback_can_delete_itself() {
    let ui = ui();
    let count = Arc::new(AtomicUsize::new(0));
    let me: Arc<Mutex<Option<WidgetHandle>>> = Arc::new(Mutex::new(None));

    let (inner_count, inner_me) = (count.clone(), me.clone());
    let handle = ui
        .create_momentary(
            button(0, 0, 40, 40),
            Some(Box::new(move |ui: &Ui| {
                inner_count.fetch_add(1, Ordering::SeqCst);
                if let Some(handle) = *inner_me.lock().unwrap() {
                    ui.delete(handle).unwrap();
                }
            })),
        )
        .unwrap();
    *me.lock().unwrap() = Some(handle);

    let touch = ScriptedTouch::new([Some((10, 10)), None, Some((10, 10))]);
    let mut dispatcher = dispatcher(&ui, touch);
    ticks(&mut dispatcher, 3);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!ui.contains(handle));
    assert!(ui.is_empty());
    assert_eq!(ui.with_display(|fb| fb.pixel(1, 1)), Some(Palette::default().background));
}

#[test]
fn test_widget_deleted_earlier_in_pass_is_skipped() {
    let ui = ui();
    let victim: Arc<Mutex<Option<WidgetHandle>>> = Arc::new(Mutex::new(None));
    let target = victim.clone();

    ui.create_momentary(
        button(0, 0, 50, 50),
        Some(Box::new(move |ui: &Ui| {
            if let Some(handle) = target.lock().unwrap().take() {
                ui.delete(handle).unwrap();
            }
        })),
    )
    .unwrap();
    let (count, callback) = counter();
    let b = ui.create_momentary(button(10, 10, 50, 50), Some(callback)).unwrap();
    *victim.lock().unwrap() = Some(b);

    let mut dispatcher = dispatcher(&ui, ScriptedTouch::held(20, 20, 1));
    let report = block_on(dispatcher.tick()).unwrap();

    assert_eq!(report.hits, 1);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(!ui.contains(b));
    assert_eq!(ui.len(), 1);
}

#[test]
fn test_widget_created_during_pass_waits_for_next_tick() {
    let ui = ui();
    let (late, late_cb) = counter();
    let late_cb = Arc::new(Mutex::new(Some(late_cb)));

    ui.create_momentary(
        button(0, 0, 50, 50),
        Some(Box::new(move |ui: &Ui| {
            if let Some(callback) = late_cb.lock().unwrap().take() {
                ui.create_momentary(button(0, 0, 50, 50), Some(callback))
                    .unwrap();
            }
        })),
    )
    .unwrap();

    let mut dispatcher = dispatcher(&ui, ScriptedTouch::held(20, 20, 2));

    let report = block_on(dispatcher.tick()).unwrap();
    assert_eq!(report.hits, 1);
    assert_eq!(late.load(Ordering::SeqCst), 0);
    assert_eq!(ui.len(), 2);

    let report = block_on(dispatcher.tick()).unwrap();
    assert_eq!(report.hits, 2);
    assert_eq!(late.load(Ordering::SeqCst), 1);
}

#[test]
fn test_display_error_ends_tick() {
    let registry: WidgetRegistry<NoopRawMutex, FlakyDisplay> =
        WidgetRegistry::new(FlakyDisplay { fail: false }, Palette::default());
    registry
        .create_momentary(button(0, 0, 40, 40), None)
        .unwrap();
    registry.with_display(|display| display.fail = true);

    let mut dispatcher =
        Dispatcher::new(&registry, ScriptedTouch::held(5, 5, 1), &UiConfig::default()).unwrap();

    assert!(matches!(
        block_on(dispatcher.tick()),
        Err(DispatchError::Display(PanelError))
    ));
}

#[test]
fn test_touch_error_ends_run() {
    static STOP: StopSignal<CriticalSectionRawMutex> = Signal::new();

    let ui = ui();
    let mut dispatcher = Dispatcher::new(&ui, BrokenTouch, &UiConfig::default()).unwrap();

    assert!(matches!(
        block_on(dispatcher.run(&STOP)),
        Err(DispatchError::Touch(BusError))
    ));
}

#[test]
fn test_run_stops_when_callback_signals() {
    static STOP: StopSignal<CriticalSectionRawMutex> = Signal::new();

    let ui = ui();
    let (count, callback) = counter();
    ui.create_momentary(button(0, 0, 40, 40), Some(callback))
        .unwrap();
    ui.create_momentary(
        button(100, 0, 40, 40),
        Some(Box::new(|_: &Ui| STOP.signal(()))),
    )
    .unwrap();

    // Tap the counter twice, then tap "quit"
    let touch = ScriptedTouch::new([
        Some((10, 10)),
        None,
        Some((10, 10)),
        None,
        Some((110, 10)),
        None,
        Some((10, 10)),
    ]);
    let config = UiConfig::default().with_poll_interval_ms(1);
    let mut dispatcher = Dispatcher::new(&ui, touch, &config).unwrap();

    block_on(dispatcher.run(&STOP)).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_last_position_is_only_read_while_touching() {
    let ui = ui();
    let mut dispatcher = dispatcher(&ui, ScriptedTouch::new([None, Some((3, 4))]));

    let idle = block_on(dispatcher.tick()).unwrap();
    assert_eq!(idle.touch, None);

    let active = block_on(dispatcher.tick()).unwrap();
    assert_eq!(active.touch, Some(TouchPoint::new(3, 4)));
}
