//! Widget registry shared between caller code and the dispatch task.
//!
//! The registry owns the display and an arena of widgets. Every slot carries a
//! generation counter so a [`WidgetHandle`] to a deleted widget never aliases a
//! widget created later in the same slot.
//!
//! All state sits behind an `embassy_sync` blocking mutex. The lock is held
//! only for bookkeeping and drawing, never while a user callback runs, so a
//! callback may create or delete widgets (including its own) through the
//! `&WidgetRegistry` it receives.
//!
//! # Snapshot semantics
//!
//! The dispatcher copies the live handles at the start of each tick and
//! re-validates every handle when it visits it:
//! - a widget deleted earlier in the same pass is skipped,
//! - a widget already processed is unaffected by a later deletion,
//! - a widget created during a pass is first seen on the next tick.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, warn};

use crate::ui::core::{Bounds, TouchPoint, WidgetHandle};
use crate::ui::styling::Palette;
use crate::ui::widget::{Fire, Widget};
use crate::ui::{MomentaryButton, ToggleButton};

/// Invoked when a momentary button fires.
pub type MomentaryCallback<M, D> = Box<dyn FnMut(&WidgetRegistry<M, D>) + Send>;

/// Invoked with the new state when a toggle flips.
pub type ToggleCallback<M, D> = Box<dyn FnMut(&WidgetRegistry<M, D>, bool) + Send>;

enum Callback<M, D> {
    Momentary(MomentaryCallback<M, D>),
    Toggle(ToggleCallback<M, D>),
}

impl<M, D> Callback<M, D> {
    fn invoke(&mut self, registry: &WidgetRegistry<M, D>, fire: Fire) {
        match (self, fire) {
            (Callback::Momentary(callback), _) => callback(registry),
            (Callback::Toggle(callback), Fire::Toggled(on)) => callback(registry, on),
            (Callback::Toggle(_), Fire::Pressed) => {
                warn!("toggle callback paired with a momentary press, skipped")
            }
        }
    }
}

struct Entry<M, D> {
    widget: Widget,
    callback: Option<Callback<M, D>>,
}

struct Slot<M, D> {
    generation: u32,
    entry: Option<Entry<M, D>>,
}

struct Inner<M, D> {
    display: D,
    palette: Palette,
    slots: Vec<Slot<M, D>>,
    free: Vec<usize>,
    live: usize,
}

impl<M, D> Inner<M, D> {
    fn entry(&self, handle: WidgetHandle) -> Option<&Entry<M, D>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)?
            .entry
            .as_ref()
    }

    /// Split borrow: the display, the palette and one live entry.
    fn parts(&mut self, handle: WidgetHandle) -> Option<(&mut D, &Palette, &mut Entry<M, D>)> {
        let entry = self
            .slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)?
            .entry
            .as_mut()?;
        Some((&mut self.display, &self.palette, entry))
    }

    fn insert(&mut self, entry: Entry<M, D>) -> WidgetHandle {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.entry = Some(entry);
            return WidgetHandle {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        WidgetHandle {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    fn remove(&mut self, handle: WidgetHandle) -> Option<Entry<M, D>> {
        let slot = self
            .slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)?;
        let entry = slot.entry.take()?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(entry)
    }
}

/// Owns the display and every live widget.
///
/// `M` picks the lock. Prefer `NoopRawMutex` with the dispatcher and every
/// caller on one executor. `CriticalSectionRawMutex` lets the registry be
/// shared across executors or interrupt priorities, but every widget draw and
/// every [`with_display`](Self::with_display) closure then runs with
/// interrupts disabled, for as long as the panel transfer takes.
///
/// Methods must not be called from inside [`with_display`](Self::with_display);
/// the inner state is already borrowed there and the call panics.
pub struct WidgetRegistry<M, D> {
    inner: Mutex<M, RefCell<Inner<M, D>>>,
}

impl<M, D> WidgetRegistry<M, D>
where
    M: RawMutex,
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(display: D, palette: Palette) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                display,
                palette,
                slots: Vec::new(),
                free: Vec::new(),
                live: 0,
            })),
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner<M, D>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Draw a momentary button and register it.
    pub fn create_momentary(
        &self,
        button: MomentaryButton,
        on_press: Option<MomentaryCallback<M, D>>,
    ) -> Result<WidgetHandle, D::Error> {
        self.create(Widget::Momentary(button), on_press.map(Callback::Momentary))
    }

    /// Draw a toggle button in its initial state and register it.
    pub fn create_toggle(
        &self,
        toggle: ToggleButton,
        on_toggle: Option<ToggleCallback<M, D>>,
    ) -> Result<WidgetHandle, D::Error> {
        self.create(Widget::Toggle(toggle), on_toggle.map(Callback::Toggle))
    }

    fn create(
        &self,
        widget: Widget,
        callback: Option<Callback<M, D>>,
    ) -> Result<WidgetHandle, D::Error> {
        self.with_inner(|inner| -> Result<WidgetHandle, D::Error> {
            widget.render(&mut inner.display, &inner.palette)?;

            let bounds = widget.bounds();
            let handle = inner.insert(Entry { widget, callback });
            debug!(
                "Created widget {:?} at ({}, {}) {}x{}",
                handle,
                bounds.x(),
                bounds.y(),
                bounds.width(),
                bounds.height()
            );
            Ok(handle)
        })
    }

    /// Erase a widget and drop it from the registry.
    ///
    /// Deleting a stale handle is a no-op. If erasing fails the widget stays
    /// registered.
    pub fn delete(&self, handle: WidgetHandle) -> Result<(), D::Error> {
        self.with_inner(|inner| -> Result<(), D::Error> {
            let Some((display, palette, entry)) = inner.parts(handle) else {
                debug!("Ignoring delete of stale widget {:?}", handle);
                return Ok(());
            };
            entry.widget.erase(display, palette)?;

            inner.remove(handle);
            debug!("Deleted widget {:?}", handle);
            Ok(())
        })
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.with_inner(|inner| inner.live)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, handle: WidgetHandle) -> bool {
        self.with_inner(|inner| inner.entry(handle).is_some())
    }

    pub fn bounds(&self, handle: WidgetHandle) -> Option<Bounds> {
        self.with_inner(|inner| inner.entry(handle).map(|entry| entry.widget.bounds()))
    }

    /// Whether the widget is between a press and its release.
    pub fn is_pressed(&self, handle: WidgetHandle) -> Option<bool> {
        self.with_inner(|inner| inner.entry(handle).map(|entry| entry.widget.is_pressed()))
    }

    /// Toggle state, or `None` for stale handles and momentary buttons.
    pub fn is_toggled(&self, handle: WidgetHandle) -> Option<bool> {
        self.with_inner(|inner| inner.entry(handle).and_then(|entry| entry.widget.is_toggled()))
    }

    /// Borrow the display for drawing outside any widget.
    pub fn with_display<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        self.with_inner(|inner| f(&mut inner.display))
    }

    /// Redraw every live widget, e.g. after the caller cleared the screen.
    pub fn redraw_all(&self) -> Result<(), D::Error> {
        self.with_inner(|inner| -> Result<(), D::Error> {
            let Inner {
                display,
                palette,
                slots,
                ..
            } = inner;
            for entry in slots.iter().filter_map(|slot| slot.entry.as_ref()) {
                entry.widget.render(display, palette)?;
            }
            Ok(())
        })
    }

    /// Replace `out` with the handles live right now, in slot order.
    pub fn snapshot_into(&self, out: &mut Vec<WidgetHandle>) {
        out.clear();
        self.with_inner(|inner| {
            out.extend(inner.slots.iter().enumerate().filter_map(|(index, slot)| {
                slot.entry.as_ref().map(|_| WidgetHandle {
                    index,
                    generation: slot.generation,
                })
            }));
        });
    }

    /// Hit-test one widget and, if touched, run its press transition.
    ///
    /// The callback runs after the lock is released and is put back only if
    /// the widget survived it. Returns whether the widget was hit.
    pub fn press_if_hit(&self, handle: WidgetHandle, point: TouchPoint) -> Result<bool, D::Error> {
        let pending = self.with_inner(|inner| -> Result<_, D::Error> {
            let Some((display, palette, entry)) = inner.parts(handle) else {
                return Ok(None);
            };
            if !entry.widget.hit_test(point) {
                return Ok(None);
            }

            let fire = entry.widget.on_press(display, palette)?;
            Ok(Some(fire.and_then(|fire| {
                entry.callback.take().map(|callback| (callback, fire))
            })))
        })?;

        let Some(fired) = pending else {
            return Ok(false);
        };

        if let Some((mut callback, fire)) = fired {
            debug!("Widget {:?} fired {:?}", handle, fire);
            callback.invoke(self, fire);

            self.with_inner(|inner| {
                if let Some((_, _, entry)) = inner.parts(handle)
                    && entry.callback.is_none()
                {
                    entry.callback = Some(callback);
                }
            });
        }
        Ok(true)
    }

    /// Run the release transition of one widget. Stale handles are skipped.
    pub fn release(&self, handle: WidgetHandle) -> Result<(), D::Error> {
        self.with_inner(|inner| -> Result<(), D::Error> {
            match inner.parts(handle) {
                Some((display, palette, entry)) => entry.widget.on_release(display, palette),
                None => Ok(()),
            }
        })
    }
}
