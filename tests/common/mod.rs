#![allow(dead_code)]

use std::io;
use std::time::Duration;

use crossterm::style::Color;
use spacewars::config::GameConfig;
use spacewars::entities::{Bounds, Direction};
use spacewars::game::Game;
use spacewars::scene::{Align, Drawable, Scene, SceneContext};

/// What a frame contained, flattened so tests can compare it.
#[derive(Clone, Debug, PartialEq)]
pub enum Painted {
    Star,
    Hero { x: i32, y: i32, shots: usize },
    Enemy { x: i32, y: i32 },
    Score { value: u32, game_over: bool },
}

#[derive(Default)]
pub struct RecordingScene {
    pub frames: Vec<Vec<Painted>>,
}

impl RecordingScene {
    pub fn last(&self) -> &[Painted] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Scene for RecordingScene {
    fn update(&mut self, drawables: &[Drawable<'_>]) -> io::Result<()> {
        let frame = drawables
            .iter()
            .map(|d| match d {
                Drawable::Star(_) => Painted::Star,
                Drawable::Hero(h) => Painted::Hero {
                    x: h.ship.body.x,
                    y: h.ship.body.y,
                    shots: h.ship.shots().len(),
                },
                Drawable::Enemy(e) => Painted::Enemy {
                    x: e.ship.body.x,
                    y: e.ship.body.y,
                },
                Drawable::Score(s) => Painted::Score {
                    value: s.value(),
                    game_over: s.is_game_over(),
                },
            })
            .collect();
        self.frames.push(frame);
        Ok(())
    }
}

/// Primitive calls made by a drawable.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Dot { x: i32, y: i32, radius: i32 },
    Triangle { x: i32, y: i32, direction: Direction },
    Text { text: String, align: Align },
}

pub struct RecordingContext {
    pub bounds: Bounds,
    pub calls: Vec<Call>,
}

impl RecordingContext {
    pub fn new() -> Self {
        RecordingContext {
            bounds: Bounds {
                width: 800,
                height: 600,
            },
            calls: Vec::new(),
        }
    }
}

impl SceneContext for RecordingContext {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn dot(&mut self, x: i32, y: i32, radius: i32, _color: Color) -> io::Result<()> {
        self.calls.push(Call::Dot { x, y, radius });
        Ok(())
    }

    fn triangle(
        &mut self,
        x: i32,
        y: i32,
        _half_width: i32,
        _color: Color,
        direction: Direction,
    ) -> io::Result<()> {
        self.calls.push(Call::Triangle { x, y, direction });
        Ok(())
    }

    fn text(&mut self, _x: i32, _y: i32, text: &str, _color: Color, align: Align) -> io::Result<()> {
        self.calls.push(Call::Text {
            text: text.to_string(),
            align,
        });
        Ok(())
    }
}

pub fn bounds() -> Bounds {
    Bounds {
        width: 800,
        height: 600,
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Default tuning with a fixed seed.
pub fn seeded_config() -> GameConfig {
    GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    }
}

/// Advance the game clock from `from` to `to` (inclusive) in 10 ms steps.
pub fn run(game: &mut Game, scene: &mut RecordingScene, from: u64, to: u64) {
    let mut t = from;
    while t <= to {
        game.advance(ms(t), scene).unwrap();
        t += 10;
    }
}
