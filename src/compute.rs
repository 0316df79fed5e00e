//! Pure turn logic.
//!
//! Given one frame's [`Round`], move projectiles, settle who shot whom, and
//! decide what gets drawn.  Nothing here touches a clock or an RNG.

use log::{debug, info};

use crate::compositor::Round;
use crate::entities::{Bounds, Enemy, Hero, Score, Star};
use crate::scene::Drawable;

/// What a single turn changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    pub kills: u32,
    pub hero_destroyed: bool,
}

/// Step every live shot of the hero and the enemies, dropping those that
/// left the scene.
pub fn advance_projectiles(round: &mut Round<'_>, bounds: Bounds) {
    round.hero.ship.advance_shots(bounds);
    for enemy in round.enemies.iter_mut() {
        enemy.ship.advance_shots(bounds);
    }
}

/// Apply the kill rules to `round`.
///
/// A finished game is frozen: nothing changes.  Otherwise every enemy gets
/// its shot at the hero first and the hero at the enemy second.  Both checks
/// always run, so hero and enemy can take each other out on the same turn.
pub fn resolve(round: &mut Round<'_>, score_increment: u32) -> TurnOutcome {
    let mut outcome = TurnOutcome::default();
    if round.score.is_game_over() {
        return outcome;
    }

    for enemy in round.enemies.iter_mut() {
        if enemy.ship.kill(&mut round.hero.ship) {
            round.score.set_game_over();
            outcome.hero_destroyed = true;
        }
        if round.hero.ship.kill(&mut enemy.ship) {
            round.score.add(score_increment);
            outcome.kills += 1;
            debug!(
                "enemy down at ({}, {}), score {}",
                enemy.ship.body.x,
                enemy.ship.body.y,
                round.score.value()
            );
        }
    }

    if outcome.hero_destroyed {
        info!("hero destroyed, final score {}", round.score.value());
    }
    outcome
}

/// Back-to-front draw order: stars, then (while playing) enemies and the
/// hero, and the score on top of everything.
pub fn drawables<'a>(round: Round<'a>) -> Vec<Drawable<'a>> {
    let stars: &'a [Star] = round.stars;
    let hero: &'a Hero = round.hero;
    let enemies: &'a [Enemy] = round.enemies;
    let score: &'a Score = round.score;

    let mut list = Vec::with_capacity(stars.len() + enemies.len() + 2);
    list.extend(stars.iter().map(Drawable::Star));
    if !score.is_game_over() {
        list.extend(enemies.iter().map(Drawable::Enemy));
        list.push(Drawable::Hero(hero));
    }
    list.push(Drawable::Score(score));
    list
}
