// requestAnimationFrame scheduler with cancellation
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[derive(Default)]
struct LoopState {
    /// Pending frame request, if any.
    frame: Cell<Option<i32>>,
    active: Cell<bool>,
}

/// Drives a step function once per display frame.
///
/// At most one frame request is pending at any time. `stop` (and drop)
/// cancel it, so no callback runs after teardown.
pub struct FrameLoop {
    state: Rc<LoopState>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: Rc::new(LoopState::default()),
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.active.get()
    }

    /// Run `step` every frame until it returns `false` or `stop` is called.
    pub fn start(&self, mut step: impl FnMut(f64) -> bool + 'static) -> Result<(), JsValue> {
        self.stop();

        let state = self.state.clone();
        let slot = Rc::downgrade(&self.callback);
        let closure = Closure::wrap(Box::new(move |t: f64| {
            state.frame.set(None);
            if !state.active.get() {
                return;
            }
            if !step(t) || !state.active.get() {
                state.active.set(false);
                return;
            }
            let Some(slot) = slot.upgrade() else {
                state.active.set(false);
                return;
            };
            let requested = slot
                .borrow()
                .as_ref()
                .and_then(|cb| request_frame(cb.as_ref().unchecked_ref()).ok());
            match requested {
                Some(id) => state.frame.set(Some(id)),
                None => state.active.set(false),
            }
        }) as Box<dyn FnMut(f64)>);

        let id = request_frame(closure.as_ref().unchecked_ref())?;
        *self.callback.borrow_mut() = Some(closure);
        self.state.active.set(true);
        self.state.frame.set(Some(id));
        Ok(())
    }

    /// Cancel the pending frame. The step function will not run again.
    pub fn stop(&self) {
        self.state.active.set(false);
        if let Some(id) = self.state.frame.take() {
            if let Some(window) = web_sys::window() {
                window.cancel_animation_frame(id).ok();
            }
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: &js_sys::Function) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .request_animation_frame(callback)
}
