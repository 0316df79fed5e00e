//! Independently clocked producers.
//!
//! Each source owns the latest value of its slice of the world and advances
//! it on its own timer.  `poll` returns `true` whenever the source emitted,
//! i.e. its value changed and the next frame should pick it up.

use std::time::Duration;

use log::{debug, trace};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bounds, Enemy, Hero, Star};
use crate::timer::Ticker;

// ── Star field ────────────────────────────────────────────────────────────────

pub struct StarField {
    stars: Vec<Star>,
    ticker: Ticker,
    bounds: Bounds,
}

impl StarField {
    /// Scatter `count` stars over the scene.  The batch is final: stars wrap
    /// around, they are never added or removed.
    pub fn new(
        rng: &mut impl Rng,
        bounds: Bounds,
        count: usize,
        period: Duration,
        now: Duration,
    ) -> Self {
        let stars = (0..count).map(|_| Star::random(rng, bounds)).collect();
        StarField {
            stars,
            ticker: Ticker::new(period, now),
            bounds,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        for star in &mut self.stars {
            star.fall(self.bounds);
        }
        true
    }
}

// ── Hero input ────────────────────────────────────────────────────────────────

/// Turns pointer input into hero updates.
///
/// Movement is applied immediately.  Clicks are only remembered; the fire
/// sampler looks at the most recent one once per window and fires if that
/// click has not been fired before, so a burst of clicks inside one window
/// yields a single shot.
pub struct HeroControl {
    hero: Hero,
    sampler: Ticker,
    latest_click: Option<Duration>,
    last_fired: Option<Duration>,
    shooting_speed: i32,
    bounds: Bounds,
}

impl HeroControl {
    pub fn new(config: &GameConfig, bounds: Bounds, now: Duration) -> Self {
        HeroControl {
            hero: Hero::new(bounds, config.hero_bottom_offset),
            sampler: Ticker::new(config.fire_sample_period(), now),
            latest_click: None,
            last_fired: None,
            shooting_speed: config.shooting_speed,
            bounds,
        }
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut Hero {
        &mut self.hero
    }

    pub fn on_pointer_move(&mut self, x: i32) {
        self.hero.move_to(x);
    }

    pub fn on_pointer_down(&mut self, at: Duration) {
        self.latest_click = Some(at);
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if !self.sampler.poll(now) {
            return false;
        }
        match self.latest_click {
            Some(at) if self.last_fired != Some(at) => {
                self.last_fired = Some(at);
                self.hero.ship.fire(self.shooting_speed, self.bounds);
                trace!("hero fired (click at {:?})", at);
                true
            }
            _ => false,
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Spawns enemies on a fixed period, lets each one fire on its own timer,
/// and marches the whole squadron forward.
pub struct EnemySquadron {
    enemies: Vec<Enemy>,
    spawn: Ticker,
    march: Ticker,
    fire_period: Duration,
    fire_chance: f64,
    shooting_speed: i32,
    step: i32,
    jitter: i32,
    bounds: Bounds,
    spawned: u64,
}

impl EnemySquadron {
    pub fn new(config: &GameConfig, bounds: Bounds, now: Duration) -> Self {
        EnemySquadron {
            enemies: Vec::new(),
            spawn: Ticker::new(config.enemy_spawn_period(), now),
            march: Ticker::new(config.enemy_march_period(), now),
            fire_period: config.enemy_fire_period(),
            fire_chance: config.enemy_fire_chance,
            shooting_speed: config.shooting_speed,
            step: config.enemy_step,
            jitter: config.enemy_jitter,
            bounds,
            spawned: 0,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Total enemies spawned over the squadron's lifetime.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Append an enemy directly, bypassing the spawn timer.
    pub fn enlist(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    /// Drop enemies that are dead or have left the scene.  Their fire timers
    /// go with them.
    pub fn prune(&mut self) {
        let bounds = self.bounds;
        self.enemies.retain(|enemy| enemy.is_active(bounds));
    }

    pub fn poll(&mut self, now: Duration, rng: &mut impl Rng) -> bool {
        let mut changed = false;

        if self.spawn.poll(now) {
            let enemy = Enemy::spawn(rng, self.bounds, self.fire_period, now);
            debug!(
                "enemy #{} spawned at x={}",
                self.spawned + 1,
                enemy.ship.body.x
            );
            self.enemies.push(enemy);
            self.spawned += 1;
            changed = true;
        }

        for enemy in &mut self.enemies {
            if enemy.fire_due(now) && rng.gen_bool(self.fire_chance) {
                enemy.ship.fire(self.shooting_speed, self.bounds);
                changed = true;
            }
        }

        if self.march.poll(now) {
            self.prune();
            for enemy in &mut self.enemies {
                enemy.march(rng, self.step, self.jitter);
            }
            changed = true;
        }

        changed
    }
}
