mod common;

use std::time::Duration;

use spacewars::config::{ConfigError, GameConfig};
use spacewars::entities::{Bounds, Enemy};
use spacewars::game::{Game, InputEvent, Phase};

use common::{ms, run, seeded_config, Painted, RecordingScene};

fn count(frame: &[Painted], pred: impl Fn(&Painted) -> bool) -> usize {
    frame.iter().filter(|p| pred(p)).count()
}

fn stars_in(frame: &[Painted]) -> usize {
    count(frame, |p| matches!(p, Painted::Star))
}

fn hero_in(frame: &[Painted]) -> Option<(i32, i32, usize)> {
    frame.iter().find_map(|p| match p {
        Painted::Hero { x, y, shots } => Some((*x, *y, *shots)),
        _ => None,
    })
}

fn score_in(frame: &[Painted]) -> (u32, bool) {
    match frame.last() {
        Some(Painted::Score { value, game_over }) => (*value, *game_over),
        other => panic!("score must be drawn last, got {other:?}"),
    }
}

/// No enemy spawns within the test horizon.
fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_spawn_ms: 60_000,
        enemy_jitter: 0,
        ..seeded_config()
    }
}

/// An enemy right above the hero whose shot reaches the hero on the next frame.
fn assassin(config: &GameConfig) -> Enemy {
    let bounds = Bounds {
        width: config.width,
        height: config.height,
    };
    let mut enemy = Enemy::at(400, 560, config.enemy_fire_period(), Duration::ZERO);
    enemy.ship.fire(config.shooting_speed, bounds);
    enemy
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn first_frame_arrives_on_the_first_boundary() {
    let mut game = Game::new(seeded_config(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    run(&mut game, &mut scene, 0, 30);
    assert!(scene.frames.is_empty());

    run(&mut game, &mut scene, 40, 40);
    assert_eq!(scene.frames.len(), 1);
    let frame = scene.last();
    assert_eq!(stars_in(frame), 100);
    assert_eq!(hero_in(frame), Some((400, 570, 0)));
    assert_eq!(score_in(frame), (0, false));
    // Stars come first, the hero after them
    assert!(frame[..100].iter().all(|p| *p == Painted::Star));
    assert!(matches!(frame[100], Painted::Hero { .. }));
}

#[test]
fn star_count_never_changes() {
    let mut game = Game::new(seeded_config(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    run(&mut game, &mut scene, 0, 5000);
    assert!(!scene.frames.is_empty());
    assert!(scene.frames.iter().all(|f| stars_in(f) == 100));
}

#[test]
fn frame_rate_is_bounded_by_the_frame_period() {
    let mut game = Game::new(seeded_config(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    for t in 0..=1000u64 {
        // Input far faster than the frame rate
        game.handle(InputEvent::PointerMove { x: t as i32 % 800 }, ms(t));
        game.advance(ms(t), &mut scene).unwrap();
    }
    assert_eq!(scene.frames.len(), 25);
    assert_eq!(game.session().frames(), 25);
}

#[test]
fn hero_follows_the_pointer() {
    let mut game = Game::new(seeded_config(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.handle(InputEvent::PointerMove { x: 123 }, ms(15));
    run(&mut game, &mut scene, 0, 40);
    assert_eq!(hero_in(scene.last()), Some((123, 570, 0)));

    // Off-canvas positions are passed through untouched
    game.handle(InputEvent::PointerMove { x: -60 }, ms(50));
    run(&mut game, &mut scene, 50, 80);
    assert_eq!(hero_in(scene.last()), Some((-60, 570, 0)));
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn firing_at_an_empty_sky_creates_a_shot_that_is_later_pruned() {
    let mut game = Game::new(quiet_config(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.handle(InputEvent::PointerDown { at: ms(5) }, ms(5));

    run(&mut game, &mut scene, 0, 190);
    assert!(scene.frames.iter().all(|f| hero_in(f).unwrap().2 == 0));

    run(&mut game, &mut scene, 200, 200);
    assert_eq!(hero_in(scene.last()), Some((400, 570, 1)));
    assert_eq!(game.session().hero().ship.shots()[0].body.y, 555);

    run(&mut game, &mut scene, 210, 2000);
    assert_eq!(hero_in(scene.last()), Some((400, 570, 0)));
    assert!(game.session().hero().ship.shots().is_empty());
    assert!(scene.frames.iter().all(|f| score_in(f) == (0, false)));
}

#[test]
fn click_while_running_fires_instead_of_restarting() {
    let mut game = Game::new(quiet_config(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.handle(InputEvent::PointerDown { at: ms(5) }, ms(5));
    run(&mut game, &mut scene, 0, 200);
    assert_eq!(game.session().id(), 1);
    assert_eq!(game.session().hero().ship.shots().len(), 1);
}

#[test]
fn shooting_an_enemy_scores_five() {
    let config = quiet_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.session_mut()
        .enlist(Enemy::at(400, 400, config.enemy_fire_period(), Duration::ZERO));
    game.handle(InputEvent::PointerDown { at: ms(5) }, ms(5));

    run(&mut game, &mut scene, 0, 430);
    assert_eq!(game.score(), 0);
    // Shot and enemy close in 20 px per frame; they meet at 440 ms
    run(&mut game, &mut scene, 440, 440);
    assert_eq!(game.score(), 5);
    assert_eq!(score_in(scene.last()), (5, false));

    // The dead enemy is gone from the next frame on
    run(&mut game, &mut scene, 450, 480);
    assert!(game.session().enemies().is_empty());
    assert_eq!(count(scene.last(), |p| matches!(p, Painted::Enemy { .. })), 0);
}

// ── Game over & restart ───────────────────────────────────────────────────────

#[test]
fn enemy_shot_reaching_the_hero_ends_the_game() {
    let config = seeded_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.session_mut().enlist(assassin(&config));

    run(&mut game, &mut scene, 0, 40);
    assert_eq!(scene.frames.len(), 1);
    assert!(game.session().hero().ship.is_dead());
    assert_eq!(game.phase(), Phase::GameOver);

    let frame = scene.last();
    assert_eq!(score_in(frame), (0, true));
    assert_eq!(stars_in(frame), 100);
    assert_eq!(hero_in(frame), None);
    assert_eq!(count(frame, |p| matches!(p, Painted::Enemy { .. })), 0);
}

#[test]
fn game_over_latches_and_stars_keep_falling() {
    let config = seeded_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.session_mut().enlist(assassin(&config));
    run(&mut game, &mut scene, 0, 40);

    let stars_before = game.session().stars().to_vec();
    game.handle(InputEvent::PointerMove { x: 10 }, ms(45));
    run(&mut game, &mut scene, 50, 4000);

    assert_eq!(game.phase(), Phase::GameOver);
    assert_ne!(game.session().stars(), &stars_before[..]);
    assert!(scene.frames.len() > 90);
    for frame in &scene.frames {
        assert_eq!(score_in(frame), (0, true));
        assert_eq!(stars_in(frame), 100);
        assert_eq!(frame.len(), 101);
    }
}

#[test]
fn click_after_game_over_starts_a_fresh_session() {
    let config = seeded_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.session_mut().enlist(assassin(&config));
    run(&mut game, &mut scene, 0, 40);
    assert_eq!(game.phase(), Phase::GameOver);

    game.handle(InputEvent::PointerDown { at: ms(50) }, ms(50));

    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.session().id(), 2);
    assert_eq!(game.score(), 0);
    assert!(!game.session().score().is_game_over());
    assert!(!game.session().hero().ship.is_dead());
    assert!(game.session().enemies().is_empty());
    assert_eq!(game.completed_sessions().len(), 1);
    assert_eq!(game.completed_sessions()[0].id, 1);
    assert_eq!(game.completed_sessions()[0].frames, 1);

    // The restarting click is not a shot in the new session
    run(&mut game, &mut scene, 60, 600);
    let frame = scene.last();
    assert_eq!(hero_in(frame), Some((400, 570, 0)));
    assert_eq!(score_in(frame), (0, false));
}

#[test]
fn restart_does_not_inherit_the_old_session_timers() {
    let config = seeded_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.session_mut().enlist(assassin(&config));
    run(&mut game, &mut scene, 0, 1000);
    assert_eq!(game.phase(), Phase::GameOver);

    game.handle(InputEvent::PointerDown { at: ms(1000) }, ms(1000));
    // The old session would have spawned at 1500 and 3000
    run(&mut game, &mut scene, 1010, 2490);
    assert!(game.session().enemies().is_empty());
    run(&mut game, &mut scene, 2500, 2500);
    assert_eq!(game.session().enemies().len(), 1);
}

#[test]
fn restarted_sessions_get_new_stars() {
    let config = seeded_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    let first_sky = game.session().stars().to_vec();
    game.session_mut().enlist(assassin(&config));
    run(&mut game, &mut scene, 0, 40);

    game.handle(InputEvent::PointerDown { at: ms(50) }, ms(50));
    assert_eq!(game.session().stars().len(), 100);
    assert_ne!(game.session().stars(), &first_sky[..]);
}

#[test]
fn best_score_survives_restarts() {
    let config = quiet_config();
    let mut game = Game::new(config.clone(), Duration::ZERO).unwrap();
    let mut scene = RecordingScene::default();
    game.session_mut()
        .enlist(Enemy::at(400, 400, config.enemy_fire_period(), Duration::ZERO));
    game.handle(InputEvent::PointerDown { at: ms(5) }, ms(5));
    run(&mut game, &mut scene, 0, 500);
    assert_eq!(game.score(), 5);

    game.session_mut().enlist(assassin(&config));
    run(&mut game, &mut scene, 510, 520);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(score_in(scene.last()), (5, true));

    game.handle(InputEvent::PointerDown { at: ms(600) }, ms(600));
    assert_eq!(game.score(), 0);
    assert_eq!(game.best_score(), 5);
    assert_eq!(game.completed_sessions()[0].score, 5);
}

#[test]
fn invalid_config_is_rejected() {
    let config = GameConfig {
        width: 0,
        ..GameConfig::default()
    };
    assert_eq!(
        Game::new(config, Duration::ZERO).err(),
        Some(ConfigError::InvalidDimensions {
            width: 0,
            height: 600
        })
    );
}
