//! Session lifecycle and the top-level game orchestrator.
//!
//! A [`Session`] is one Running → GameOver life: it owns every timer and
//! source, and dropping it stops all of them.  [`Game`] routes input to the
//! live session, drives it with the clock, and on a click after game over
//! throws the session away and starts a brand-new one.

use std::io;
use std::mem;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compositor::{FrameCompositor, Round, Source};
use crate::compute;
use crate::config::{ConfigError, GameConfig};
use crate::entities::{Bounds, Enemy, Hero, Score, Star};
use crate::scene::Scene;
use crate::sources::{EnemySquadron, HeroControl, StarField};

/// Pointer input, in scene coordinates.  `at` is measured on the same clock
/// that is passed to [`Game::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerMove { x: i32 },
    PointerDown { at: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
    Terminated,
}

/// Final numbers of a session that has been torn down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: u64,
    pub score: u32,
    pub frames: u64,
    pub enemies_spawned: u64,
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session {
    id: u64,
    phase: Phase,
    bounds: Bounds,
    score_increment: u32,
    rng: StdRng,
    stars: StarField,
    hero: HeroControl,
    squadron: EnemySquadron,
    score: Score,
    compositor: FrameCompositor,
}

impl Session {
    /// Start a session at `now`.  Every timer is anchored to `now`.
    pub fn start(id: u64, config: &GameConfig, seed: u64, now: Duration) -> Self {
        let bounds = Bounds {
            width: config.width,
            height: config.height,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = StarField::new(
            &mut rng,
            bounds,
            config.star_count,
            config.star_period(),
            now,
        );
        let mut compositor = FrameCompositor::new(config.frame_period(), now);
        // Initial emissions: the starting sky, the hero at mid-bottom, and
        // an empty squadron.
        compositor.notify(Source::Stars);
        compositor.notify(Source::Hero);
        compositor.notify(Source::Enemies);

        info!("session {} started (seed {:#018x})", id, seed);
        Session {
            id,
            phase: Phase::Running,
            bounds,
            score_increment: config.score_increment,
            rng,
            stars,
            hero: HeroControl::new(config, bounds, now),
            squadron: EnemySquadron::new(config, bounds, now),
            score: Score::new(),
            compositor,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn stars(&self) -> &[Star] {
        self.stars.stars()
    }

    pub fn hero(&self) -> &Hero {
        self.hero.hero()
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.squadron.enemies()
    }

    pub fn frames(&self) -> u64 {
        self.compositor.frames()
    }

    /// Put an enemy straight into the squadron.  It shows up in the next
    /// frame like any spawned enemy.
    pub fn enlist(&mut self, enemy: Enemy) {
        self.squadron.enlist(enemy);
        self.compositor.notify(Source::Enemies);
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x } => {
                self.hero.on_pointer_move(x);
                self.compositor.notify(Source::Hero);
            }
            InputEvent::PointerDown { at } => self.hero.on_pointer_down(at),
        }
    }

    /// Poll every source, and if a frame is due resolve it and hand the
    /// result to `scene`.  Returns whether a frame was rendered.
    pub fn step(&mut self, now: Duration, scene: &mut dyn Scene) -> io::Result<bool> {
        if self.stars.poll(now) {
            self.compositor.notify(Source::Stars);
        }
        if self.hero.poll(now) {
            self.compositor.notify(Source::Hero);
        }
        if self.squadron.poll(now, &mut self.rng) {
            self.compositor.notify(Source::Enemies);
        }
        if !self.compositor.sample(now) {
            return Ok(false);
        }

        self.squadron.prune();
        let mut round = Round {
            stars: self.stars.stars(),
            hero: self.hero.hero_mut(),
            enemies: self.squadron.enemies_mut(),
            score: &mut self.score,
        };
        if !round.score.is_game_over() {
            compute::advance_projectiles(&mut round, self.bounds);
        }
        compute::resolve(&mut round, self.score_increment);
        let over = round.score.is_game_over();

        scene.update(&compute::drawables(round))?;

        if over && self.phase == Phase::Running {
            info!("session {} over with score {}", self.id, self.score.value());
            self.phase = Phase::GameOver;
        }
        Ok(true)
    }

    /// Tear the session down.  Consuming `self` drops every timer and source
    /// it owns.
    pub fn terminate(mut self) -> SessionSummary {
        self.phase = Phase::Terminated;
        let summary = SessionSummary {
            id: self.id,
            score: self.score.value(),
            frames: self.compositor.frames(),
            enemies_spawned: self.squadron.spawned(),
        };
        info!(
            "session {} {:?} after {} frames",
            summary.id, self.phase, summary.frames
        );
        summary
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

pub struct Game {
    config: GameConfig,
    seeds: StdRng,
    session: Session,
    best_score: u32,
    completed: Vec<SessionSummary>,
}

impl Game {
    pub fn new(config: GameConfig, now: Duration) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = Session::start(1, &config, seeds.gen(), now);
        Ok(Game {
            config,
            seeds,
            session,
            best_score: 0,
            completed: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score().value()
    }

    /// Best score over every session played so far, the live one included.
    pub fn best_score(&self) -> u32 {
        self.best_score.max(self.score())
    }

    pub fn completed_sessions(&self) -> &[SessionSummary] {
        &self.completed
    }

    /// While running, input goes to the hero.  After game over the next
    /// click restarts.
    pub fn handle(&mut self, event: InputEvent, now: Duration) {
        match (self.session.phase(), event) {
            (Phase::GameOver, InputEvent::PointerDown { .. }) => self.restart(now),
            _ => self.session.handle(event),
        }
    }

    pub fn advance(&mut self, now: Duration, scene: &mut dyn Scene) -> io::Result<bool> {
        self.session.step(now, scene)
    }

    /// Cold restart: nothing from the old session survives but its summary.
    fn restart(&mut self, now: Duration) {
        let id = self.session.id() + 1;
        let fresh = Session::start(id, &self.config, self.seeds.gen(), now);
        let summary = mem::replace(&mut self.session, fresh).terminate();
        self.best_score = self.best_score.max(summary.score);
        self.completed.push(summary);
    }
}
