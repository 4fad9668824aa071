// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration and dispatch for one bound target.
//!
//! ## Overview
//!
//! [`GestureListeners`] is a table of handlers keyed by [`GestureKind`].
//! [`GestureBinding`] pairs that table with a [`GestureClassifier`]: it derives
//! whether drag evaluation is needed from the subscribed kinds, feeds samples to the
//! classifier, and calls the handlers for each classified gesture in order.
//!
//! Attaching to a platform event source is left to the host; call
//! [`GestureBinding::handle`] from whatever delivers raw touch events.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use understory_gesture::listeners::{GestureBinding, GestureListeners};
//! use understory_gesture::types::{GestureKind, TouchPhase, TouchSample};
//!
//! let taps = Cell::new(0);
//! let mut listeners = GestureListeners::new();
//! listeners.on(GestureKind::Tap, |_| taps.set(taps.get() + 1));
//!
//! let mut binding = GestureBinding::new(listeners);
//! binding.handle(TouchPhase::Start, &TouchSample::new(0, 5.0, 5.0, 0));
//! binding.handle(TouchPhase::End, &TouchSample::new(0, 6.0, 5.0, 40));
//! assert_eq!(taps.get(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::classifier::GestureClassifier;
use crate::types::{
    GestureEvent, GestureKind, GestureKinds, TouchPhase, TouchSample, UnknownGesture,
};

/// A gesture callback.
pub type GestureHandler<'a> = Box<dyn FnMut(&GestureEvent) + 'a>;

/// Handlers registered per [`GestureKind`].
pub struct GestureListeners<'a> {
    handlers: [Vec<GestureHandler<'a>>; GestureKind::ALL.len()],
}

impl fmt::Debug for GestureListeners<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in GestureKind::ALL {
            map.entry(&kind.name(), &self.handlers[kind.index()].len());
        }
        map.finish()
    }
}

impl Default for GestureListeners<'_> {
    fn default() -> Self {
        Self {
            handlers: core::array::from_fn(|_| Vec::new()),
        }
    }
}

impl<'a> GestureListeners<'a> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler for `kind`. Earlier handlers for the same kind are kept.
    pub fn on(
        &mut self,
        kind: GestureKind,
        handler: impl FnMut(&GestureEvent) + 'a,
    ) -> &mut Self {
        self.handlers[kind.index()].push(Box::new(handler));
        self
    }

    /// Add a handler by event name, e.g. `"dragstart"`.
    ///
    /// Names outside the fixed set of gestures are rejected.
    pub fn on_named(
        &mut self,
        name: &str,
        handler: impl FnMut(&GestureEvent) + 'a,
    ) -> Result<&mut Self, UnknownGesture> {
        let kind = name.parse()?;
        Ok(self.on(kind, handler))
    }

    /// The kinds that have at least one handler.
    pub fn subscribed(&self) -> GestureKinds {
        GestureKind::ALL
            .into_iter()
            .filter(|k| !self.handlers[k.index()].is_empty())
            .collect()
    }

    /// `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.subscribed().is_empty()
    }

    /// Call every handler registered for the event's kind, in registration order.
    ///
    /// Returns the number of handlers called.
    pub fn emit(&mut self, event: &GestureEvent) -> usize {
        let handlers = &mut self.handlers[event.kind().index()];
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    /// Remove every handler.
    pub fn clear(&mut self) {
        self.handlers.iter_mut().for_each(Vec::clear);
    }
}

/// What a [`GestureBinding`] did with one raw sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Handled {
    /// Gestures delivered to the handlers, in order. Empty while disabled.
    pub events: Vec<GestureEvent>,
    /// The sample was consumed by a drag; the host should suppress native scrolling.
    ///
    /// Set for drag moves even while disabled.
    pub prevent_default: bool,
}

/// A classifier bound to a listener table.
#[derive(Debug)]
pub struct GestureBinding<'a> {
    classifier: GestureClassifier,
    listeners: GestureListeners<'a>,
}

impl<'a> GestureBinding<'a> {
    /// Bind `listeners` to a classifier with the default thresholds.
    pub fn new(listeners: GestureListeners<'a>) -> Self {
        Self::with_classifier(GestureClassifier::new(), listeners)
    }

    /// Bind `listeners` to an existing classifier.
    ///
    /// Drag evaluation is switched on if any drag-family gesture is subscribed.
    pub fn with_classifier(
        mut classifier: GestureClassifier,
        listeners: GestureListeners<'a>,
    ) -> Self {
        if listeners.subscribed().wants_drag() {
            classifier.set_drag_listeners_present(true);
        }
        debug!("binding gestures: {:?}", listeners.subscribed());
        Self {
            classifier,
            listeners,
        }
    }

    /// Register another handler.
    ///
    /// A drag-family handler switches drag evaluation on; it is never switched off again.
    pub fn listen(&mut self, kind: GestureKind, handler: impl FnMut(&GestureEvent) + 'a) {
        self.listeners.on(kind, handler);
        if kind.is_drag_family() {
            self.classifier.set_drag_listeners_present(true);
        }
    }

    /// Feed a raw sample and call the handlers for the resulting gestures.
    pub fn handle(&mut self, phase: TouchPhase, sample: &TouchSample) -> Handled {
        let events = self.classifier.dispatch(phase, sample);
        let prevent_default = phase == TouchPhase::Move
            && self
                .classifier
                .tracker()
                .session()
                .is_some_and(|s| s.pointer_id() == sample.id && s.is_dragging());
        for event in &events {
            self.listeners.emit(event);
        }
        Handled {
            events,
            prevent_default,
        }
    }

    /// Resume delivering gestures.
    pub fn enable(&mut self) {
        self.classifier.set_enabled(true);
    }

    /// Stop delivering gestures; sessions keep being tracked.
    pub fn disable(&mut self) {
        self.classifier.set_enabled(false);
    }

    /// See [`enable`](Self::enable) and [`disable`](Self::disable).
    pub fn is_enabled(&self) -> bool {
        self.classifier.is_enabled()
    }

    /// Forget the active session without delivering anything, e.g. after the
    /// host lost a contact's release.
    pub fn reset(&mut self) {
        self.classifier.reset();
    }

    /// The bound classifier.
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// The bound listener table.
    pub fn listeners(&self) -> &GestureListeners<'a> {
        &self.listeners
    }

    /// Tear down the binding, dropping all session state and returning the listeners.
    pub fn destroy(self) -> GestureListeners<'a> {
        debug!("unbinding gestures: {:?}", self.listeners.subscribed());
        self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<GestureKind>>>;

    fn recorder(log: &Log) -> impl FnMut(&GestureEvent) + 'static {
        let log = Rc::clone(log);
        move |e: &GestureEvent| log.borrow_mut().push(e.kind())
    }

    fn sample(x: f64, y: f64, t: u64) -> TouchSample {
        TouchSample::new(1, x, y, t)
    }

    #[test]
    fn subscribed_reflects_registrations() {
        let mut l = GestureListeners::new();
        assert!(l.is_empty());
        l.on(GestureKind::Tap, |_| {}).on(GestureKind::Swipe, |_| {});
        assert_eq!(l.subscribed(), GestureKinds::TAP | GestureKinds::SWIPE);
        assert!(!l.subscribed().wants_drag());
        assert!(l.on_named("dragend", |_| {}).is_ok());
        assert!(l.subscribed().wants_drag());
        assert!(l.on_named("pinch", |_| {}).is_err());
        l.clear();
        assert!(l.is_empty());
    }

    #[test]
    fn emit_calls_handlers_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut l = GestureListeners::new();
        for i in 0..3 {
            let order = Rc::clone(&order);
            l.on(GestureKind::Tap, move |_| order.borrow_mut().push(i));
        }
        let tap = GestureEvent::Tap(crate::types::TapInfo {
            pointer_id: 0,
            start_time_ms: 0,
            end_time_ms: 1,
            duration_ms: 1,
        });
        assert_eq!(l.emit(&tap), 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn binding_without_drag_listeners_never_drags() {
        let log = Log::default();
        let mut l = GestureListeners::new();
        l.on(GestureKind::Swipe, recorder(&log));
        let mut b = GestureBinding::new(l);
        assert!(!b.classifier().drag_listeners_present());

        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        let moved = b.handle(TouchPhase::Move, &sample(60.0, 0.0, 20));
        assert!(moved.events.is_empty());
        assert!(!moved.prevent_default);
        b.handle(TouchPhase::End, &sample(100.0, 0.0, 40));
        assert_eq!(*log.borrow(), vec![GestureKind::Swipe]);
    }

    #[test]
    fn binding_dispatches_drag_sequence() {
        let log = Log::default();
        let mut l = GestureListeners::new();
        l.on(GestureKind::DragStart, recorder(&log))
            .on(GestureKind::Drag, recorder(&log))
            .on(GestureKind::DragEnd, recorder(&log));
        let mut b = GestureBinding::new(l);
        assert!(b.classifier().drag_listeners_present());

        assert!(!b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0)).prevent_default);
        assert!(!b.handle(TouchPhase::Move, &sample(4.0, 0.0, 5)).prevent_default);
        assert!(b.handle(TouchPhase::Move, &sample(14.0, 0.0, 10)).prevent_default);
        assert!(b.handle(TouchPhase::Move, &sample(30.0, 0.0, 20)).prevent_default);
        let end = b.handle(TouchPhase::End, &sample(30.0, 0.0, 200));
        assert!(!end.prevent_default);
        assert_eq!(end.events.len(), 1);
        assert_eq!(*log.borrow(), vec![
            GestureKind::DragStart,
            GestureKind::Drag,
            GestureKind::DragEnd
        ]);
    }

    #[test]
    fn unsubscribed_kinds_are_classified_but_not_delivered() {
        let log = Log::default();
        let mut l = GestureListeners::new();
        l.on(GestureKind::DragEnd, recorder(&log));
        let mut b = GestureBinding::new(l);

        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        let started = b.handle(TouchPhase::Move, &sample(20.0, 0.0, 10));
        assert_eq!(started.events.len(), 1);
        b.handle(TouchPhase::End, &sample(20.0, 0.0, 30));
        assert_eq!(*log.borrow(), vec![GestureKind::DragEnd]);
    }

    #[test]
    fn disable_gates_delivery_and_enable_restores_it() {
        let log = Log::default();
        let mut l = GestureListeners::new();
        l.on(GestureKind::Tap, recorder(&log));
        let mut b = GestureBinding::new(l);

        b.disable();
        assert!(!b.is_enabled());
        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        let out = b.handle(TouchPhase::End, &sample(0.0, 0.0, 20));
        assert!(out.events.is_empty());
        assert!(log.borrow().is_empty());

        b.enable();
        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 100));
        b.handle(TouchPhase::Cancel, &sample(0.0, 0.0, 120));
        assert_eq!(*log.borrow(), vec![GestureKind::Tap]);
    }

    #[test]
    fn disabled_drag_still_prevents_default() {
        let mut l = GestureListeners::new();
        l.on(GestureKind::Drag, |_| {});
        let mut b = GestureBinding::new(l);
        b.disable();
        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        let out = b.handle(TouchPhase::Move, &sample(20.0, 0.0, 10));
        assert!(out.events.is_empty());
        assert!(out.prevent_default);
    }

    #[test]
    fn late_drag_listener_turns_drag_on() {
        let log = Log::default();
        let mut b = GestureBinding::new(GestureListeners::new());
        assert!(!b.classifier().drag_listeners_present());
        b.listen(GestureKind::Tap, |_| {});
        assert!(!b.classifier().drag_listeners_present());
        b.listen(GestureKind::DragStart, recorder(&log));
        assert!(b.classifier().drag_listeners_present());

        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        b.handle(TouchPhase::Move, &sample(0.5, 12.0, 10));
        // |dy/dx| = 24: that is a scroll, not a drag.
        assert!(log.borrow().is_empty());
        b.handle(TouchPhase::End, &sample(0.5, 12.0, 20));

        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 100));
        b.handle(TouchPhase::Move, &sample(12.0, 0.5, 110));
        assert_eq!(*log.borrow(), vec![GestureKind::DragStart]);
    }

    #[test]
    fn reset_lets_a_new_contact_take_over() {
        let log = Log::default();
        let mut l = GestureListeners::new();
        l.on(GestureKind::Tap, recorder(&log));
        let mut b = GestureBinding::new(l);

        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        let next = |t| TouchSample::new(2, 0.0, 0.0, t);
        b.handle(TouchPhase::Start, &next(1000));
        assert!(b.handle(TouchPhase::End, &next(1020)).events.is_empty());

        b.reset();
        assert!(b.classifier().tracker().session().is_none());
        b.handle(TouchPhase::Start, &next(2000));
        b.handle(TouchPhase::End, &next(2020));
        assert_eq!(*log.borrow(), vec![GestureKind::Tap]);
    }

    #[test]
    fn destroy_returns_listeners() {
        let mut l = GestureListeners::new();
        l.on(GestureKind::Swipe, |_| {});
        let mut b = GestureBinding::new(l);
        b.handle(TouchPhase::Start, &sample(0.0, 0.0, 0));
        let l = b.destroy();
        assert_eq!(l.subscribed(), GestureKinds::SWIPE);
    }
}
