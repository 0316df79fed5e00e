//! Game entity types and the behaviour that belongs to them: falling stars,
//! moving shots, firing, and the bounding-box kill check.
//!
//! All coordinates are scene pixels; `(0, 0)` is the top-left corner.

use std::time::Duration;

use crossterm::style::Color;
use rand::Rng;

use crate::random::random_int;
use crate::timer::Ticker;

/// Half-extent of the square hit box, on each axis, for every object.
pub const HIT_EXTENT: i32 = 20;
/// How far outside the scene an object may drift and still count as visible.
pub const VISIBILITY_MARGIN: i32 = 40;
pub const SHIP_HALF_WIDTH: i32 = 20;
pub const SHOT_HALF_WIDTH: i32 = 2;
/// Enemies appear just above the top edge.
pub const ENEMY_SPAWN_Y: i32 = -30;
pub const STAR_MIN_SIZE: i32 = 1;
pub const STAR_MAX_SIZE: i32 = 3;

pub const HERO_COLOR: Color = Color::Red;
pub const HERO_SHOT_COLOR: Color = Color::Yellow;
pub const ENEMY_COLOR: Color = Color::Green;
pub const ENEMY_SHOT_COLOR: Color = Color::Magenta;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

// ── Stars ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    /// Radius in pixels; also the fall speed per step.
    pub size: i32,
}

impl Star {
    pub fn random(rng: &mut impl Rng, bounds: Bounds) -> Star {
        Star {
            x: random_int(rng, 0, bounds.width),
            y: random_int(rng, 0, bounds.height),
            size: random_int(rng, STAR_MIN_SIZE, STAR_MAX_SIZE),
        }
    }

    /// Move down by `size`, wrapping to the top once past the bottom edge.
    pub fn fall(&mut self, bounds: Bounds) {
        self.y += self.size;
        if self.y > bounds.height {
            self.y = 0;
        }
    }
}

// ── Space objects ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign of vertical velocity in screen coordinates.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// A triangular body.  Its facing is chosen at construction and never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceObject {
    pub x: i32,
    pub y: i32,
    pub half_width: i32,
    pub color: Color,
    direction: Direction,
}

impl SpaceObject {
    pub fn new(x: i32, y: i32, half_width: i32, color: Color, direction: Direction) -> Self {
        SpaceObject {
            x,
            y,
            half_width,
            color,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_visible(&self, bounds: Bounds) -> bool {
        self.x > -VISIBILITY_MARGIN
            && self.x < bounds.width + VISIBILITY_MARGIN
            && self.y > -VISIBILITY_MARGIN
            && self.y < bounds.height + VISIBILITY_MARGIN
    }

    /// Centres closer than [`HIT_EXTENT`] on both axes.  `half_width` is
    /// deliberately ignored.
    pub fn collides(&self, other: &SpaceObject) -> bool {
        (self.x - other.x).abs() < HIT_EXTENT && (self.y - other.y).abs() < HIT_EXTENT
    }
}

// ── Shots ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub body: SpaceObject,
    pub speed: i32,
}

impl Shot {
    pub fn new(x: i32, y: i32, direction: Direction, speed: i32, color: Color) -> Self {
        Shot {
            body: SpaceObject::new(x, y, SHOT_HALF_WIDTH, color, direction),
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.body.y += self.body.direction().sign() * self.speed;
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

/// A body that fires shots and can be killed exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceShip {
    pub body: SpaceObject,
    pub shot_color: Color,
    shots: Vec<Shot>,
    dead: bool,
}

impl SpaceShip {
    pub fn new(body: SpaceObject, shot_color: Color) -> Self {
        SpaceShip {
            body,
            shot_color,
            shots: Vec::new(),
            dead: false,
        }
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// One-way: there is no way back to alive.
    pub fn destroy(&mut self) {
        self.dead = true;
    }

    /// Launch a shot from the ship's centre (dead ships stay silent), then
    /// drop shots that have left the scene.
    pub fn fire(&mut self, speed: i32, bounds: Bounds) {
        if !self.dead {
            self.shots.push(Shot::new(
                self.body.x,
                self.body.y,
                self.body.direction(),
                speed,
                self.shot_color,
            ));
        }
        self.prune_shots(bounds);
    }

    /// Move every shot one step and drop those now out of bounds.
    pub fn advance_shots(&mut self, bounds: Bounds) {
        for shot in &mut self.shots {
            shot.advance();
        }
        self.prune_shots(bounds);
    }

    pub fn prune_shots(&mut self, bounds: Bounds) {
        self.shots.retain(|shot| shot.body.is_visible(bounds));
    }

    /// Kill `target` if one of our shots overlaps it.  Reports `false` for a
    /// target that was already dead, so a kill is only ever counted once.
    pub fn kill(&self, target: &mut SpaceShip) -> bool {
        if target.dead {
            return false;
        }
        let hit = self.shots.iter().any(|shot| shot.body.collides(&target.body));
        if hit {
            target.dead = true;
        }
        hit
    }
}

// ── Hero & enemies ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    pub ship: SpaceShip,
}

impl Hero {
    /// Centred horizontally, `bottom_offset` pixels above the bottom edge.
    pub fn new(bounds: Bounds, bottom_offset: i32) -> Self {
        Self::at(bounds.width / 2, bounds.height - bottom_offset)
    }

    pub fn at(x: i32, y: i32) -> Self {
        let body = SpaceObject::new(x, y, SHIP_HALF_WIDTH, HERO_COLOR, Direction::Up);
        Hero {
            ship: SpaceShip::new(body, HERO_SHOT_COLOR),
        }
    }

    /// Pointer-driven: the hero teleports, its row never changes.
    pub fn move_to(&mut self, x: i32) {
        self.ship.body.x = x;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub ship: SpaceShip,
    fire_timer: Ticker,
}

impl Enemy {
    /// A fresh enemy at a random column above the scene.  Its fire timer
    /// starts counting at `now`.
    pub fn spawn(rng: &mut impl Rng, bounds: Bounds, fire_period: Duration, now: Duration) -> Self {
        let x = random_int(rng, 0, bounds.width);
        Self::at(x, ENEMY_SPAWN_Y, fire_period, now)
    }

    pub fn at(x: i32, y: i32, fire_period: Duration, now: Duration) -> Self {
        let body = SpaceObject::new(x, y, SHIP_HALF_WIDTH, ENEMY_COLOR, Direction::Down);
        Enemy {
            ship: SpaceShip::new(body, ENEMY_SHOT_COLOR),
            fire_timer: Ticker::new(fire_period, now),
        }
    }

    /// Still on screen and alive.
    pub fn is_active(&self, bounds: Bounds) -> bool {
        !self.ship.is_dead() && self.ship.body.is_visible(bounds)
    }

    /// One step down plus a horizontal wobble in `-jitter..=jitter`.
    pub fn march(&mut self, rng: &mut impl Rng, step: i32, jitter: i32) {
        self.ship.body.y += step;
        self.ship.body.x += random_int(rng, -jitter, jitter);
    }

    pub fn fire_due(&mut self, now: Duration) -> bool {
        self.fire_timer.poll(now)
    }
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Score {
    value: u32,
    game_over: bool,
}

impl Score {
    pub fn new() -> Self {
        Score::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Latches; the flag is never cleared for the life of a session.
    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }
}
