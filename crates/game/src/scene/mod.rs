//! Scene painting.
//!
//! The painter walks a [`Session`] and issues immediate-mode drawing calls
//! through the [`Painter`] trait. The browser client implements it on top
//! of a 2D canvas context; tests implement it with a call recorder.

mod layers;
mod style;

pub use style::{Color, Composite, Paint, TextAlign};

use crate::session::Session;
use glam::Vec2;

/// Immediate-mode 2D drawing surface.
pub trait Painter {
    /// Push the drawing state (transform, styles, alpha, composite).
    fn save(&mut self);
    /// Pop the drawing state.
    fn restore(&mut self);
    fn clear(&mut self, width: f32, height: f32);

    fn set_composite(&mut self, mode: Composite);
    fn set_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, paint: &Paint);
    fn set_stroke(&mut self, paint: &Paint, width: f32);
    fn set_shadow(&mut self, color: Color, blur: f32);

    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
    fn fill_polygon(&mut self, points: &[Vec2]);
    /// Fill and stroke a rounded rectangle with the current styles.
    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, align: TextAlign);
}

/// Draw one full frame of `session` at host time `t`.
pub fn paint(p: &mut impl Painter, session: &Session, t: f64) {
    let arena = &session.config().arena;
    let (w, h) = (arena.width, arena.height);

    p.clear(w, h);
    layers::background(p, w, h);
    layers::floor(p, w, h, t);
    layers::particles(p, &session.effects.particles);
    layers::orbs(p, &session.world.orbs);
    layers::hazards(p, &session.world.hazards);
    layers::player(p, &session.player, session.effects.trail.iter().copied(), t);
    layers::waves(p, &session.effects.waves);
    layers::hud(p, w, h, session.score(), session.phase());
}

/// Draw the backdrop and the HUD only.
///
/// Used while the frame loop is not running, so the idle card and the
/// game-over card stay visible without any entity layers.
pub fn paint_overlay(p: &mut impl Painter, session: &Session, t: f64) {
    let arena = &session.config().arena;
    let (w, h) = (arena.width, arena.height);

    p.clear(w, h);
    layers::background(p, w, h);
    layers::floor(p, w, h, t);
    layers::hud(p, w, h, session.score(), session.phase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::{Hazard, Orb};
    use crate::input::Controls;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Save,
        Restore,
        Clear,
        Composite(Composite),
        Alpha(f32),
        Fill(Paint),
        Stroke(Paint, f32),
        Shadow,
        Translate(f32, f32),
        Rotate(f32),
        Rect,
        Circle(Vec2, f32),
        Ring(Vec2, f32),
        Line,
        Polygon(usize),
        RoundRect,
        Text(String, TextAlign),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(s, _) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }
    }

    impl Painter for Recorder {
        fn save(&mut self) {
            self.calls.push(Call::Save);
        }
        fn restore(&mut self) {
            self.calls.push(Call::Restore);
        }
        fn clear(&mut self, _: f32, _: f32) {
            self.calls.push(Call::Clear);
        }
        fn set_composite(&mut self, mode: Composite) {
            self.calls.push(Call::Composite(mode));
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.calls.push(Call::Alpha(alpha));
        }
        fn set_fill(&mut self, paint: &Paint) {
            self.calls.push(Call::Fill(paint.clone()));
        }
        fn set_stroke(&mut self, paint: &Paint, width: f32) {
            self.calls.push(Call::Stroke(paint.clone(), width));
        }
        fn set_shadow(&mut self, _: Color, _: f32) {
            self.calls.push(Call::Shadow);
        }
        fn translate(&mut self, x: f32, y: f32) {
            self.calls.push(Call::Translate(x, y));
        }
        fn rotate(&mut self, angle: f32) {
            self.calls.push(Call::Rotate(angle));
        }
        fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32) {
            self.calls.push(Call::Rect);
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32) {
            self.calls.push(Call::Circle(center, radius));
        }
        fn stroke_circle(&mut self, center: Vec2, radius: f32) {
            self.calls.push(Call::Ring(center, radius));
        }
        fn stroke_line(&mut self, _: Vec2, _: Vec2) {
            self.calls.push(Call::Line);
        }
        fn fill_polygon(&mut self, points: &[Vec2]) {
            self.calls.push(Call::Polygon(points.len()));
        }
        fn round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32) {
            self.calls.push(Call::RoundRect);
        }
        fn fill_text(&mut self, text: &str, _: f32, _: f32, _: &str, align: TextAlign) {
            self.calls.push(Call::Text(text.to_string(), align));
        }
    }

    fn balanced(rec: &Recorder) -> bool {
        let mut depth = 0i32;
        for call in &rec.calls {
            match call {
                Call::Save => depth += 1,
                Call::Restore => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    #[test]
    fn test_idle_overlay_shows_title_card() {
        let session = Session::with_seed(GameConfig::default(), 1);
        let mut rec = Recorder::default();
        paint_overlay(&mut rec, &session, 0.0);

        assert_eq!(rec.calls[0], Call::Clear);
        assert_eq!(
            rec.texts(),
            vec![
                "Score: 0",
                "WASD or Arrow Keys",
                "Neon Dodge",
                "Click to start \u{2014} collect orbs and dodge hazards",
            ]
        );
        assert_eq!(rec.count(|c| *c == Call::RoundRect), 1);
        // 22 rows plus 15 converging columns.
        assert_eq!(rec.count(|c| *c == Call::Line), 37);
        assert!(balanced(&rec));
    }

    #[test]
    fn test_running_frame_layers() {
        let mut session = Session::with_seed(GameConfig::default(), 5);
        session.start(0.0);
        session.tick(0.0, Controls::default());
        session.world.orbs.clear();
        session.world.hazards.clear();

        let far = Vec2::new(40.0, 40.0);
        let id = session.world.next_id();
        session.world.add_orb(Orb::new(id, far, 9.0, Vec2::ZERO));
        let id = session.world.next_id();
        session.world.add_hazard(Hazard::new(id, Vec2::new(500.0, 60.0), Vec2::new(30.0, 12.0), Vec2::ZERO, 0.7, 0.0));

        let mut rec = Recorder::default();
        paint(&mut rec, &session, 0.0);

        assert_eq!(rec.texts(), vec!["Score: 0", "WASD or Arrow Keys"]);
        assert!(rec.calls.contains(&Call::Circle(far, 9.0)));
        assert!(rec.calls.contains(&Call::Rotate(0.7)));
        assert!(rec.calls.contains(&Call::Translate(500.0, 60.0)));
        assert_eq!(rec.count(|c| *c == Call::Polygon(4)), 1);

        // Pulsing ring at t = 0 is exactly r + 6.
        let p = session.player.position;
        assert!(rec.calls.contains(&Call::Ring(p, 18.0)));
        assert!(balanced(&rec));
    }

    #[test]
    fn test_game_over_card_reports_score() {
        let mut config = GameConfig::default();
        config.orb.spawn_interval_ms = 1e12;
        config.hazard.base_interval_ms = 1e12;
        config.hazard.min_interval_ms = 1e12;
        let mut session = Session::with_seed(config, 2);
        session.start(0.0);
        session.tick(0.0, Controls::default());
        session.world.orbs.clear();
        session.world.hazards.clear();

        let at = session.player.position;
        for _ in 0..3 {
            let id = session.world.next_id();
            session.world.add_orb(Orb::new(id, at, 8.0, Vec2::ZERO));
        }
        let id = session.world.next_id();
        session.world.add_hazard(Hazard::new(id, at, Vec2::new(30.0, 12.0), Vec2::ZERO, 0.0, 0.0));
        assert!(session.tick(16.0, Controls::default()).game_over.is_some());

        let mut rec = Recorder::default();
        paint(&mut rec, &session, 16.0);
        let texts = rec.texts();
        assert!(texts.contains(&"Game Over"));
        assert!(texts.contains(&"Score: 3 \u{2014} click to play again"));
        // Sparks from the three pickups are drawn additively.
        assert!(rec.calls.contains(&Call::Composite(Composite::Lighter)));
        assert!(rec.count(|c| matches!(c, Call::Fill(Paint::Solid(Color::Hsla(..))))) >= 42);
        assert!(balanced(&rec));
    }

    #[test]
    fn test_wave_stroke_fades() {
        use rand::SeedableRng;

        let mut session = Session::with_seed(GameConfig::default(), 3);
        let effects = session.config().effects.clone();
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        session.effects.pickup(Vec2::new(100.0, 100.0), &effects, &mut rng);
        let mut rec = Recorder::default();
        paint(&mut rec, &session, 0.0);
        // Fresh wave: alpha 0.35, width 2.
        let fresh = Paint::Solid(Color::rgba(124, 58, 237, 0.35));
        assert!(rec.calls.contains(&Call::Stroke(fresh, 2.0)));
        assert!(rec.calls.contains(&Call::Ring(Vec2::new(100.0, 100.0), 10.0)));
    }
}
