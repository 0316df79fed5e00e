//! The rendering boundary.
//!
//! The simulation hands a [`Scene`] an ordered list of [`Drawable`]s each
//! frame.  Drawables know how to paint themselves with the primitives of a
//! [`SceneContext`]; how those primitives reach a screen is the context's
//! business.

use std::io;

use crossterm::style::Color;

use crate::entities::{Bounds, Direction, Enemy, Hero, Score, SpaceShip, Star};

pub const STAR_COLOR: Color = Color::White;
pub const SCORE_COLOR: Color = Color::Yellow;
pub const BANNER_COLOR: Color = Color::Red;
pub const HINT_COLOR: Color = Color::White;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Drawing primitives in scene pixel coordinates.
pub trait SceneContext {
    fn bounds(&self) -> Bounds;
    fn dot(&mut self, x: i32, y: i32, radius: i32, color: Color) -> io::Result<()>;
    /// Isosceles triangle centred on `(x, y)`, apex pointing `direction`.
    fn triangle(
        &mut self,
        x: i32,
        y: i32,
        half_width: i32,
        color: Color,
        direction: Direction,
    ) -> io::Result<()>;
    fn text(&mut self, x: i32, y: i32, text: &str, color: Color, align: Align) -> io::Result<()>;
}

/// A render sink.  `update` repaints the background, then draws the list in
/// order, so later entries land on top.
pub trait Scene {
    fn update(&mut self, drawables: &[Drawable<'_>]) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug)]
pub enum Drawable<'a> {
    Star(&'a Star),
    Hero(&'a Hero),
    Enemy(&'a Enemy),
    Score(&'a Score),
}

impl Drawable<'_> {
    pub fn draw_to(&self, ctx: &mut dyn SceneContext) -> io::Result<()> {
        match self {
            Drawable::Star(star) => ctx.dot(star.x, star.y, star.size, STAR_COLOR),
            Drawable::Hero(hero) => draw_ship(ctx, &hero.ship),
            Drawable::Enemy(enemy) => draw_ship(ctx, &enemy.ship),
            Drawable::Score(score) => draw_score(ctx, score),
        }
    }
}

fn draw_ship(ctx: &mut dyn SceneContext, ship: &SpaceShip) -> io::Result<()> {
    let body = &ship.body;
    ctx.triangle(body.x, body.y, body.half_width, body.color, body.direction())?;
    for shot in ship.shots() {
        let b = &shot.body;
        ctx.triangle(b.x, b.y, b.half_width, b.color, b.direction())?;
    }
    Ok(())
}

fn draw_score(ctx: &mut dyn SceneContext, score: &Score) -> io::Result<()> {
    ctx.text(
        40,
        43,
        &format!("Score: {}", score.value()),
        SCORE_COLOR,
        Align::Left,
    )?;
    if score.is_game_over() {
        let bounds = ctx.bounds();
        let cx = bounds.width / 2;
        let cy = bounds.height / 2;
        ctx.text(cx, cy - 20, "GAME OVER", BANNER_COLOR, Align::Center)?;
        ctx.text(cx, cy + 20, "Click to restart", HINT_COLOR, Align::Center)?;
    }
    Ok(())
}
