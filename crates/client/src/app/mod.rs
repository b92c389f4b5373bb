// Browser-side game client: session, input, painter and side panels
use crate::network::{FetchTransport, TimeoutSleeper};
use crate::render::Renderer;
use crate::ui::UI;
use game::scene;
use game::{Dashboard, GameConfig, GameOver, IdentityGate, KeyState, Session, SubmitOutcome, SubmitPipeline};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub type Pipeline = SubmitPipeline<FetchTransport, TimeoutSleeper>;

pub struct GameClient {
    session: Session,
    keys: KeyState,
    renderer: Renderer,
    ui: UI,
    gate: IdentityGate,
    dashboard: Dashboard,
    relay_url: String,
    lookup_url: String,
}

impl GameClient {
    pub fn new(canvas_id: &str, relay_url: &str, lookup_url: &str, username_site: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = GameConfig::default();
        let renderer = Renderer::new(canvas, config.arena.width, config.arena.height)?;

        let client = Self {
            session: Session::new(config),
            keys: KeyState::new(),
            renderer,
            ui: UI::new(document, username_site),
            gate: IdentityGate::new(),
            dashboard: Dashboard::new(),
            relay_url: relay_url.to_string(),
            lookup_url: lookup_url.to_string(),
        };
        client.ui.update_dashboard(&client.dashboard);
        client.ui.update_identity(&client.gate);
        Ok(client)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        self.renderer.canvas()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Begin a new run. Returns `false` if one is already running.
    pub fn start(&mut self, now: f64) -> bool {
        self.session.start(now)
    }

    /// One display frame: tick, then paint.
    pub fn frame(&mut self, now: f64) -> Option<GameOver> {
        let report = self.session.tick(now, self.keys.controls());
        scene::paint(&mut self.renderer, &self.session, now);
        report.game_over
    }

    /// Paint the backdrop and card while the loop is stopped.
    pub fn paint_overlay(&mut self, now: f64) {
        scene::paint_overlay(&mut self.renderer, &self.session, now);
    }

    pub fn set_key(&mut self, key: &str, down: bool) {
        self.keys.set(key, down);
    }

    pub fn release_keys(&mut self) {
        self.keys.release_all();
    }

    pub fn gate(&self) -> &IdentityGate {
        &self.gate
    }

    /// Mutate the identity gate and refresh its panel.
    pub fn update_gate(&mut self, f: impl FnOnce(&mut IdentityGate)) {
        f(&mut self.gate);
        self.ui.update_identity(&self.gate);
    }

    pub fn lookup_url(&self) -> &str {
        &self.lookup_url
    }

    pub fn pipeline(&self) -> Pipeline {
        SubmitPipeline::new(FetchTransport::new(self.relay_url.clone()), TimeoutSleeper)
    }

    /// Fold a submission outcome into the dashboard.
    pub fn record(&mut self, outcome: &SubmitOutcome) {
        self.dashboard.apply(outcome);
        self.ui.update_dashboard(&self.dashboard);
        if outcome.is_confirmed() {
            self.ui.confetti();
        }
    }
}
