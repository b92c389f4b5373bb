// Username lookup: one-shot check and interval polling
use crate::app::GameClient;
use crate::network::lookup_username;
use crate::{console_error, console_log};
use game::identity::USERNAME_POLL_INTERVAL_MS;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Look the username up once and feed the answer to the gate.
pub fn check_username(client: Rc<RefCell<GameClient>>) {
    let (base, wallet) = {
        let c = client.borrow();
        match c.gate().address() {
            Some(wallet) => (c.lookup_url().to_string(), wallet.to_string()),
            None => return,
        }
    };
    spawn_local(async move {
        let found = lookup_username(&base, &wallet).await;
        let Ok(mut c) = client.try_borrow_mut() else {
            return;
        };
        match found {
            Ok(Some(name)) => c.update_gate(|g| g.username_found(name)),
            Ok(None) => c.update_gate(|g| g.username_missing()),
            Err(e) => {
                console_error!("Username lookup failed: {}", e);
                c.update_gate(|g| g.username_missing());
            }
        }
    });
}

/// Polls the lookup until a username shows up.
pub struct UsernamePoller {
    interval: Cell<Option<i32>>,
    in_flight: Rc<Cell<bool>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl UsernamePoller {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            interval: Cell::new(None),
            in_flight: Rc::new(Cell::new(false)),
            callback: RefCell::new(None),
        })
    }

    pub fn is_polling(&self) -> bool {
        self.interval.get().is_some()
    }

    /// Start polling. Does nothing if already polling or no wallet is linked.
    pub fn start(self: &Rc<Self>, client: Rc<RefCell<GameClient>>) -> Result<(), JsValue> {
        if self.is_polling() {
            return Ok(());
        }
        let mut started = false;
        client.borrow_mut().update_gate(|g| started = g.start_waiting());
        if !started {
            return Ok(());
        }

        let window = web_sys::window().ok_or("No window")?;
        let poller: Weak<Self> = Rc::downgrade(self);
        let in_flight = self.in_flight.clone();
        let closure = Closure::wrap(Box::new(move || {
            if in_flight.get() {
                return;
            }
            let (base, wallet) = match client.try_borrow() {
                Ok(c) => match c.gate().address() {
                    Some(wallet) => (c.lookup_url().to_string(), wallet.to_string()),
                    None => return,
                },
                Err(_) => return,
            };
            in_flight.set(true);

            let client = client.clone();
            let poller = poller.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                if let Ok(Some(name)) = lookup_username(&base, &wallet).await {
                    console_log!("Username reserved: {}", name);
                    if let Ok(mut c) = client.try_borrow_mut() {
                        c.update_gate(|g| g.username_found(name));
                    }
                    if let Some(poller) = poller.upgrade() {
                        poller.clear();
                    }
                }
                in_flight.set(false);
            });
        }) as Box<dyn FnMut()>);

        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            USERNAME_POLL_INTERVAL_MS as i32,
        )?;
        self.interval.set(Some(id));
        *self.callback.borrow_mut() = Some(closure);
        Ok(())
    }

    /// Stop polling and leave the waiting state.
    pub fn stop(&self, client: &RefCell<GameClient>) {
        self.clear();
        if let Ok(mut c) = client.try_borrow_mut() {
            c.update_gate(|g| g.stop_waiting());
        }
    }

    /// Clear the interval. The closure is released on the next start or drop.
    fn clear(&self) {
        if let Some(id) = self.interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
        }
    }
}

impl Drop for UsernamePoller {
    fn drop(&mut self) {
        self.clear();
        self.callback.borrow_mut().take();
    }
}
