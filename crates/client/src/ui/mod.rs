// DOM side panels: identity status, dashboard metrics, confetti
use game::{Dashboard, IdentityGate, IdentityStatus};
use game::identity::username_site_url;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement};

const CONFETTI_COUNT: usize = 100;
const CONFETTI_LIFETIME_MS: i32 = 1600;

pub struct UI {
    document: Document,
    username_site: String,
}

impl UI {
    pub fn new(document: Document, username_site: impl Into<String>) -> Self {
        Self {
            document,
            username_site: username_site.into(),
        }
    }

    fn get_el(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.get_el(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Best / total / submits / last tx and the status note.
    pub fn update_dashboard(&self, dash: &Dashboard) {
        self.set_text("dashBest", &dash.best.to_string());
        self.set_text("dashTotal", &dash.total.to_string());
        self.set_text("dashCount", &dash.count.to_string());
        self.set_text("dashNote", dash.status_note());
        self.set_text("dashLastTx", &dash.last_tx_label());

        if let Some(link) = self
            .get_el("dashLastTxLink")
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        {
            match dash.last_tx_url() {
                Some(url) => link.set_href(&url),
                None => {
                    link.remove_attribute("href").ok();
                }
            }
        }
    }

    /// Wallet / username line and the reservation link.
    pub fn update_identity(&self, gate: &IdentityGate) {
        let status = match gate.status() {
            IdentityStatus::Idle => "Sign in to play",
            IdentityStatus::Loading => "Loading\u{2026}",
            IdentityStatus::Ready => "Ready",
            IdentityStatus::NeedUsername => "Reserve a username to submit scores",
            IdentityStatus::WaitingUsername => "Waiting for username\u{2026}",
        };
        self.set_text("identityStatus", status);
        self.set_text("identityWallet", gate.address().unwrap_or("\u{2014}"));
        self.set_text("identityUsername", gate.username().unwrap_or("\u{2014}"));

        if let Some(link) = self
            .get_el("usernameLink")
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        {
            let show = matches!(
                gate.status(),
                IdentityStatus::NeedUsername | IdentityStatus::WaitingUsername
            );
            match (show, gate.address()) {
                (true, Some(wallet)) => {
                    link.set_href(&username_site_url(&self.username_site, wallet));
                    link.class_list().remove_1("hidden").ok();
                }
                _ => {
                    link.class_list().add_1("hidden").ok();
                }
            }
        }
    }

    /// Short burst of falling confetti pieces, each removed after its animation.
    pub fn confetti(&self) {
        let Some(layer) = self.get_el("confetti-layer") else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        for _ in 0..CONFETTI_COUNT {
            let Ok(piece) = self.document.create_element("i") else {
                continue;
            };
            piece.set_class_name("confetti");
            if let Ok(el) = piece.clone().dyn_into::<HtmlElement>() {
                let style = el.style();
                style.set_property("left", &format!("{}%", rand::random::<f64>() * 100.0)).ok();
                style.set_property("--tx", &format!("{}px", rand::random::<f64>() * 60.0 - 30.0)).ok();
                style.set_property("--rot", &format!("{}deg", rand::random::<f64>() * 360.0)).ok();
                style
                    .set_property("animation-delay", &format!("{}s", rand::random::<f64>() * 0.2))
                    .ok();
            }
            if layer.append_child(&piece).is_err() {
                continue;
            }

            let remove = Closure::once_into_js(move || piece.remove());
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                CONFETTI_LIFETIME_MS,
            );
        }
    }
}
