//! Render description
//!
//! Turns scene state into a [`Frame`]: sprites (position, rotation, size and
//! mask) plus centred text lines. Drawing them is left to the host.

pub mod frame;

pub use frame::{Color, Frame, SpriteDesc, SpriteKind, TextItem, colors};

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{Body, LevelPhase, Session};

/// Title screen
pub fn title_frame(field: Vec2) -> Frame<'static> {
    let mut frame = Frame::new(colors::TITLE_BACKGROUND, field);
    let center = field / 2.0;
    frame
        .texts
        .push(TextItem::new("butterfly pizza delivery!", center - Vec2::new(0.0, 30.0)));
    frame
        .texts
        .push(TextItem::new("press enter to start game!", center + Vec2::new(0.0, 30.0)));
    frame
}

/// Game screen: markers, walls, goal, ghosts, courier, then HUD text
pub fn game_frame<'a>(session: &'a Session, settings: &Settings) -> Frame<'a> {
    let field = session.field().size();
    let mut frame = Frame::new(colors::FIELD, field);

    if settings.show_dead_goals {
        for marker in &session.dead_goals {
            frame.sprites.push(SpriteDesc {
                kind: SpriteKind::DeadGoal,
                center: marker.pos,
                rotation: 0.0,
                size: marker.size,
                bounds: marker.size,
                mask: None,
                color: colors::DEAD_GOAL,
            });
        }
    }

    for wall in &session.walls {
        frame.sprites.push(static_sprite(SpriteKind::Wall, wall, colors::WALL));
    }

    if let Some(goal) = &session.goal {
        frame.sprites.push(static_sprite(SpriteKind::Goal, goal, colors::GOAL));
    }

    for ghost in &session.ghosts {
        frame.sprites.push(SpriteDesc {
            kind: SpriteKind::Ghost,
            center: ghost.center(),
            rotation: ghost.angle(),
            size: ghost.size(),
            bounds: ghost.mask().size(),
            mask: Some(ghost.mask()),
            color: colors::GHOST,
        });
    }

    if let Some(player) = &session.player {
        frame.sprites.push(SpriteDesc {
            kind: SpriteKind::Courier,
            center: player.center(),
            rotation: player.angle(),
            size: player.size(),
            bounds: player.mask().size(),
            mask: Some(player.mask()),
            color: colors::COURIER,
        });
    }

    push_hud(&mut frame, session, settings);
    frame
}

fn static_sprite<'a>(kind: SpriteKind, body: &'a impl Body, color: Color) -> SpriteDesc<'a> {
    let size = body.mask().size();
    SpriteDesc {
        kind,
        center: body.center(),
        rotation: 0.0,
        size,
        bounds: size,
        mask: Some(body.mask()),
        color,
    }
}

fn push_hud(frame: &mut Frame<'_>, session: &Session, settings: &Settings) {
    let field = frame.field;
    let top = 20.0;

    if settings.show_score {
        frame
            .texts
            .push(TextItem::new(format!("level {}", session.level), Vec2::new(60.0, top)).sized(24.0));
        frame.texts.push(
            TextItem::new(format!("score {}", session.score), Vec2::new(field.x - 60.0, top))
                .sized(24.0),
        );
    }
    if settings.show_timer {
        // The clock reads zero once the delivery is made
        let shown = match session.phase {
            LevelPhase::Outro { .. } => 0.0,
            _ => session.go_time,
        };
        frame.texts.push(
            TextItem::new(format!("{shown:.2}"), Vec2::new(field.x / 2.0, top))
                .sized(24.0),
        );
    }
    if settings.show_ghost_count && !session.ghosts.is_empty() {
        frame.texts.push(
            TextItem::new(
                format!("ghosts {}", session.ghosts.len()),
                Vec2::new(field.x / 2.0, field.y - top),
            )
            .sized(20.0),
        );
    }

    let center = field / 2.0;
    match session.phase {
        LevelPhase::Intro { remaining } => {
            frame.texts.push(
                TextItem::new(format!("level {} - get ready", session.level), center).banner(),
            );
            frame.texts.push(
                TextItem::new(format!("{}", remaining.ceil() as u32), center + Vec2::new(0.0, 40.0))
                    .banner(),
            );
        }
        LevelPhase::Playing if session.paused => {
            frame.texts.push(TextItem::new("paused", center).banner());
        }
        LevelPhase::Playing => {}
        LevelPhase::Outro { .. } => {
            frame.texts.push(TextItem::new("delivered!", center).banner());
        }
        LevelPhase::Lost => {
            let reason = if session.go_time <= 0.0 {
                "out of time!"
            } else {
                "crashed!"
            };
            frame.texts.push(TextItem::new(reason, center).banner());
            frame
                .texts
                .push(TextItem::new("press r to restart", center + Vec2::new(0.0, 40.0)).banner());
        }
    }
}
