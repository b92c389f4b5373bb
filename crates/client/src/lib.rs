// WASM client entry point for Neon Dodge
// Wires the platform-neutral game core to the canvas, the keyboard and fetch

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{KeyboardEvent, MouseEvent, window};

// Module structure - each module handles a specific concern
mod app;      // Session, key state, painter and panels for one page
mod frame;    // requestAnimationFrame scheduling and cancellation
mod identity; // Username lookup and polling
mod input;    // Keyboard filtering
mod network;  // Relay submissions, lookups, timers
mod render;   // Canvas 2D painter backend
mod ui;       // Dashboard, identity panel, confetti
mod utils;    // Clock and console logging

pub use app::GameClient;

use frame::FrameLoop;
use identity::UsernamePoller;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Handle JS keeps for the lifetime of the page
#[wasm_bindgen]
pub struct NeonDodge {
    client: Rc<RefCell<GameClient>>,
    frames: Rc<FrameLoop>,
    poller: Rc<UsernamePoller>,
    listeners: Vec<Listener>,
}

/// A registered DOM listener, removed on teardown.
struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(JsValue)>,
}

#[wasm_bindgen]
impl NeonDodge {
    /// Attach to `canvas_id`. `relay_url` is the submit endpoint,
    /// `lookup_url` the username lookup, `username_site` the reservation page.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, relay_url: &str, lookup_url: &str, username_site: &str) -> Result<NeonDodge, JsValue> {
        init();

        let client = Rc::new(RefCell::new(GameClient::new(canvas_id, relay_url, lookup_url, username_site)?));
        let mut game = NeonDodge {
            client,
            frames: Rc::new(FrameLoop::new()),
            poller: UsernamePoller::new(),
            listeners: Vec::new(),
        };

        game.setup_input_handlers()?;
        game.client.borrow_mut().paint_overlay(utils::now());
        Ok(game)
    }

    /// Start a run if none is in progress.
    pub fn start(&self) -> Result<bool, JsValue> {
        start_run(&self.client, &self.frames)
    }

    pub fn is_running(&self) -> bool {
        self.client.borrow().is_running()
    }

    pub fn score(&self) -> u32 {
        self.client.borrow().score()
    }

    /// Wallet linked (address) or unlinked (`undefined`). Triggers a lookup.
    pub fn set_wallet(&self, address: Option<String>) {
        match address.filter(|a| !a.is_empty()) {
            Some(address) => {
                self.client.borrow_mut().update_gate(|g| g.wallet_linked(address));
                identity::check_username(self.client.clone());
            }
            None => {
                self.poller.stop(&self.client);
                self.client.borrow_mut().update_gate(|g| g.wallet_missing());
            }
        }
    }

    /// Wallet lookup started on the JS side.
    pub fn set_loading(&self) {
        self.client.borrow_mut().update_gate(|g| g.begin_loading());
    }

    /// Username supplied directly by the JS side.
    pub fn set_username(&self, username: Option<String>) {
        self.client.borrow_mut().update_gate(|g| match username {
            Some(name) => g.username_found(name),
            None => g.username_missing(),
        });
    }

    pub fn can_submit(&self) -> bool {
        self.client.borrow().gate().can_submit()
    }

    pub fn start_username_polling(&self) -> Result<(), JsValue> {
        self.poller.start(self.client.clone())
    }

    pub fn stop_username_polling(&self) {
        self.poller.stop(&self.client);
    }

    /// Stop the frame loop and polling and detach every listener.
    pub fn destroy(&mut self) {
        self.frames.stop();
        self.poller.stop(&self.client);
        self.client.borrow_mut().release_keys();
        for listener in self.listeners.drain(..) {
            listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for NeonDodge {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl NeonDodge {
    fn listen(
        &mut self,
        target: web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(JsValue) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target, event, closure });
        Ok(())
    }

    fn setup_input_handlers(&mut self) -> Result<(), JsValue> {
        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas: web_sys::EventTarget = self.client.borrow().canvas().clone().into();

        // Keydown handler
        {
            let client = self.client.clone();
            self.listen(document.clone().into(), "keydown", move |event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                if input::is_text_input_focused() {
                    return;
                }
                let key = event.key();
                if input::is_game_key(&key) {
                    event.prevent_default();
                }
                if let Ok(mut c) = client.try_borrow_mut() {
                    c.set_key(&key, true);
                }
            })?;
        }

        // Keyup handler
        {
            let client = self.client.clone();
            self.listen(document.into(), "keyup", move |event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                if let Ok(mut c) = client.try_borrow_mut() {
                    c.set_key(&event.key(), false);
                }
            })?;
        }

        // Forget held keys when the window loses focus
        {
            let client = self.client.clone();
            self.listen(window.into(), "blur", move |_| {
                if let Ok(mut c) = client.try_borrow_mut() {
                    c.release_keys();
                }
            })?;
        }

        // Canvas click starts a run when none is in progress
        {
            let client = self.client.clone();
            let frames = self.frames.clone();
            self.listen(canvas, "click", move |event| {
                if event.dyn_ref::<MouseEvent>().is_none() {
                    return;
                }
                if let Err(e) = start_run(&client, &frames) {
                    console_error!("Failed to start: {:?}", e);
                }
            })?;
        }

        Ok(())
    }
}

/// Reset the session and drive it until it ends.
fn start_run(client: &Rc<RefCell<GameClient>>, frames: &Rc<FrameLoop>) -> Result<bool, JsValue> {
    if !client.borrow_mut().start(utils::now()) {
        return Ok(false);
    }

    let step_client = client.clone();
    frames.start(move |t| {
        let over = match step_client.try_borrow_mut() {
            Ok(mut c) => c.frame(t),
            Err(_) => return true,
        };
        match over {
            Some(over) => {
                submit_score(step_client.clone(), over);
                false
            }
            None => true,
        }
    })?;
    Ok(true)
}

/// Submit a finished run in the background.
fn submit_score(client: Rc<RefCell<GameClient>>, over: game::GameOver) {
    let (gate, pipeline) = {
        let c = client.borrow();
        (c.gate().clone(), c.pipeline())
    };
    console_log!("Run over with score {}", over.score);
    spawn_local(async move {
        let outcome = pipeline.run(&gate, over.score as u64, None).await;
        match client.try_borrow_mut() {
            Ok(mut c) => c.record(&outcome),
            Err(_) => console_error!("Dropped submission outcome: {:?}", outcome),
        }
    });
}
