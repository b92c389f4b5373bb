// Individual scene layers, bottom to top.

use super::style::{Color, Composite, Paint, TextAlign};
use super::Painter;
use crate::effects::{Particle, TrailPoint, Wave};
use crate::entity::{Hazard, Orb, Player};
use crate::session::Phase;
use glam::Vec2;

const HUD_FONT: &str = "800 18px ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial";
const TITLE_FONT: &str = "900 22px ui-sans-serif, system-ui";
const CAPTION_FONT: &str = "500 13px ui-sans-serif, system-ui";

const TEXT: Color = Color::rgb(229, 231, 235);
const MUTED: Color = Color::rgb(148, 163, 184);
const CAPTION: Color = Color::rgb(165, 180, 252);
const CYAN: Color = Color::rgb(34, 211, 238);
const VIOLET: Color = Color::rgb(139, 92, 246);
const INDIGO: Color = Color::rgb(124, 58, 237);

const FLOOR_ROWS: u32 = 22;
const FLOOR_COLS: u32 = 14;
const FLOOR_SPEED: f64 = 0.0018;
const HAZARD_DEPTH: f32 = 6.0;

pub(super) fn background(p: &mut impl Painter, w: f32, h: f32) {
    p.set_fill(&Paint::vertical(0.0, h, Color::rgb(5, 6, 12), Color::rgb(10, 15, 27)));
    p.fill_rect(0.0, 0.0, w, h);

    let center = Vec2::new(w * 0.5, h * 0.22);
    p.set_fill(&Paint::Radial {
        inner: center,
        inner_radius: 20.0,
        outer: center,
        outer_radius: 360.0,
        start: VIOLET.with_alpha(0.25),
        end: VIOLET.with_alpha(0.0),
    });
    p.fill_rect(0.0, 0.0, w, h);

    // Scanlines reuse the glow fill at low alpha.
    p.save();
    p.set_alpha(0.04);
    let mut y = 0.0;
    while y < h {
        p.fill_rect(0.0, y, w, 1.0);
        y += 3.0;
    }
    p.restore();
}

/// Perspective floor whose rows scroll toward the viewer over time.
pub(super) fn floor(p: &mut impl Painter, w: f32, h: f32, t: f64) {
    let vanish = Vec2::new(w * 0.5, h * 0.28);
    let phase = (t * FLOOR_SPEED).rem_euclid(1.0) as f32;

    p.save();
    p.set_stroke(&Color::rgba(148, 163, 184, 0.18).into(), 1.0);

    for i in 1..=FLOOR_ROWS {
        let z = (i as f32 + phase) / FLOOR_ROWS as f32;
        let y = vanish.y + (h - vanish.y) * z * z;
        p.stroke_line(Vec2::new(0.0, y), Vec2::new(w, y));
    }
    for c in 0..=FLOOR_COLS {
        let x = c as f32 / FLOOR_COLS as f32 * w;
        p.stroke_line(Vec2::new(x, h), vanish);
    }

    p.set_fill(&Paint::vertical(
        vanish.y - 6.0,
        vanish.y + 60.0,
        INDIGO.with_alpha(0.35),
        INDIGO.with_alpha(0.0),
    ));
    p.fill_rect(0.0, vanish.y - 6.0, w, 80.0);
    p.restore();
}

pub(super) fn particles(p: &mut impl Painter, particles: &[Particle]) {
    p.save();
    p.set_composite(Composite::Lighter);
    for particle in particles {
        let a = (particle.life / particle.max_life).clamp(0.0, 1.0);
        let radius = (1.2 - particle.depth * 0.6) * (3.0 + (1.0 - a) * 3.0);
        p.set_fill(&Color::Hsla(particle.hue, 90.0, 60.0, 0.55 * a).into());
        p.fill_circle(particle.position, radius);
    }
    p.restore();
}

pub(super) fn orbs(p: &mut impl Painter, orbs: &[Orb]) {
    p.save();
    p.set_composite(Composite::Lighter);
    for orb in orbs {
        p.set_fill(&Paint::Radial {
            inner: orb.position - Vec2::splat(2.0),
            inner_radius: 1.0,
            outer: orb.position,
            outer_radius: orb.radius + 6.0,
            start: Color::rgba(240, 171, 252, 0.95),
            end: INDIGO.with_alpha(0.3),
        });
        p.fill_circle(orb.position, orb.radius);
    }
    p.restore();
}

/// Hazard bars drawn rotated with a short extruded top face.
pub(super) fn hazards(p: &mut impl Painter, hazards: &[Hazard]) {
    for hazard in hazards {
        let half = hazard.size * 0.5;
        p.save();
        p.translate(hazard.position.x, hazard.position.y);
        p.rotate(hazard.rotation);

        p.set_fill(&Color::rgba(31, 41, 55, 0.8).into());
        p.fill_polygon(&[
            Vec2::new(-half.x, -half.y),
            Vec2::new(-half.x + HAZARD_DEPTH, -half.y - HAZARD_DEPTH),
            Vec2::new(half.x + HAZARD_DEPTH, -half.y - HAZARD_DEPTH),
            Vec2::new(half.x, -half.y),
        ]);

        p.set_fill(&Paint::Linear {
            from: Vec2::new(-half.x, 0.0),
            to: Vec2::new(half.x, 0.0),
            start: Color::rgb(239, 68, 68),
            end: Color::rgb(245, 158, 11),
        });
        p.set_shadow(Color::rgba(239, 68, 68, 0.6), 14.0);
        p.fill_rect(-half.x, -half.y, hazard.size.x, hazard.size.y);
        p.restore();
    }
}

pub(super) fn player(p: &mut impl Painter, player: &Player, trail: impl DoubleEndedIterator<Item = TrailPoint>, t: f64) {
    let r = player.radius();

    // Oldest trail point first so the newest glow lands on top.
    p.save();
    p.set_composite(Composite::Lighter);
    for point in trail.rev() {
        let a = point.alpha * 0.55;
        let radius = r * (1.0 + (1.0 - point.alpha) * 0.8) * 2.6;
        p.set_fill(&Paint::radial(point.position, 0.0, radius, CYAN.with_alpha(0.55 * a), CYAN.with_alpha(0.0)));
        p.fill_circle(point.position, radius);
    }
    p.restore();

    let at = player.position;
    p.save();
    p.set_fill(&Paint::radial(at, r * 0.3, r * 3.0, CYAN.with_alpha(0.85), CYAN.with_alpha(0.0)));
    p.fill_circle(at, r * 3.0);

    p.set_shadow(CYAN.with_alpha(0.9), 18.0);
    p.set_fill(&CYAN.into());
    p.fill_circle(at, r);

    let ring = r + 6.0 + (t * 0.01).sin() as f32 * 2.0;
    p.set_stroke(&VIOLET.with_alpha(0.9).into(), 2.0);
    p.stroke_circle(at, ring);
    p.restore();
}

pub(super) fn waves(p: &mut impl Painter, waves: &[Wave]) {
    p.save();
    for wave in waves {
        let a = (wave.life / wave.max_life).clamp(0.0, 1.0);
        p.set_stroke(&INDIGO.with_alpha(0.35 * a).into(), 2.0 + (1.0 - a) * 4.0);
        p.stroke_circle(wave.position, wave.radius);
    }
    p.restore();
}

/// Score, control hint and the phase card.
pub(super) fn hud(p: &mut impl Painter, w: f32, h: f32, score: u32, phase: Phase) {
    p.save();
    p.set_fill(&TEXT.into());
    p.fill_text(&format!("Score: {}", score), 14.0, 26.0, HUD_FONT, TextAlign::Left);
    p.set_fill(&MUTED.into());
    p.fill_text("WASD or Arrow Keys", w - 14.0, 26.0, HUD_FONT, TextAlign::Right);
    p.restore();

    let cx = w / 2.0;
    let cy = h / 2.0;
    match phase {
        Phase::Idle => {
            let (cw, ch) = (360.0, 120.0);
            let (x, y) = (cx - cw / 2.0, cy - ch / 2.0);
            p.save();
            p.set_fill(&Paint::vertical(
                y,
                y + ch,
                Color::rgba(17, 24, 39, 0.85),
                Color::rgba(31, 41, 55, 0.85),
            ));
            p.set_stroke(&INDIGO.with_alpha(0.5).into(), 1.2);
            p.round_rect(x, y, cw, ch, 16.0);
            card_text(p, cx, y, 44.0, "Neon Dodge", "Click to start \u{2014} collect orbs and dodge hazards");
            p.restore();
        }
        Phase::Over => {
            let (cw, ch) = (320.0, 150.0);
            let (x, y) = (cx - cw / 2.0, cy - ch / 2.0);
            p.save();
            p.set_fill(&Color::rgba(8, 10, 18, 0.68).into());
            p.fill_rect(0.0, 0.0, w, h);
            p.set_fill(&Color::rgba(15, 23, 42, 0.8).into());
            p.set_stroke(&Color::rgba(59, 130, 246, 0.4).into(), 1.2);
            p.round_rect(x, y, cw, ch, 16.0);
            let caption = format!("Score: {} \u{2014} click to play again", score);
            card_text(p, cx, y, 40.0, "Game Over", &caption);
            p.restore();
        }
        Phase::Running => {}
    }
}

fn card_text(p: &mut impl Painter, cx: f32, top: f32, title_offset: f32, title: &str, caption: &str) {
    p.set_fill(&TEXT.into());
    p.fill_text(title, cx, top + title_offset, TITLE_FONT, TextAlign::Center);
    p.set_fill(&CAPTION.into());
    p.fill_text(caption, cx, top + 70.0, CAPTION_FONT, TextAlign::Center);
}
