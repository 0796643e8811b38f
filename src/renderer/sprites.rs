//! Sprites drawn each frame: background, level, player and scoreboard

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::assets::*;
use super::pixels::{Bitmap, CollisionMask, PixelBuf, Rgb};
use super::{Sprite, Surface};
use crate::consts::{COLUMN_WIDTH, N_COLUMNS};
use crate::sim::{GameFacade, GamePhase, StateMachine, is_no_move};

/// Ground strip height as a share of the surface height
const GROUND_SHARE: f32 = 0.1;
/// Column opening height as a share of the surface height
const OPENING_SHARE: f32 = 0.3;
const NUMBER_OF_CLOUDS: usize = 6;

// ── Background ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Cloud {
    x: f32,
    y: i32,
    dx: f32,
}

/// Sky gradient with clouds drifting left at random speeds
#[derive(Debug, Clone)]
pub struct Background {
    surface: Surface,
    cloud: Bitmap,
    clouds: Vec<Cloud>,
    rng: Pcg32,
}

impl Background {
    pub fn new(surface: Surface, cloud: Bitmap, seed: u64) -> Self {
        let mut background = Self {
            surface,
            cloud,
            clouds: Vec::with_capacity(NUMBER_OF_CLOUDS),
            rng: Pcg32::seed_from_u64(seed),
        };
        for _ in 0..NUMBER_OF_CLOUDS {
            let mut cloud = background.spawn_cloud();
            // Stagger the first batch across the sky
            cloud.x = surface.width as f32 * background.rng.random_range(0.1..1.0);
            background.clouds.push(cloud);
        }
        background
    }

    fn spawn_cloud(&mut self) -> Cloud {
        let (w, h) = (self.surface.width as f32, self.surface.height as f32);
        Cloud {
            x: w,
            y: (h * self.rng.random_range(0.02..0.3)) as i32,
            dx: -w * self.rng.random_range(0.0002..0.002),
        }
    }
}

impl Sprite for Background {
    fn position(&self) -> (i32, i32) {
        (0, 0)
    }

    fn update(&mut self, machine: &StateMachine, _facade: &GameFacade, dt: f32) {
        if machine.state() == GamePhase::WaitReset {
            return;
        }
        let cloud_w = self.cloud.width() as f32;
        for i in 0..self.clouds.len() {
            if self.clouds[i].x + cloud_w <= 0.0 {
                self.clouds[i] = self.spawn_cloud();
            }
            self.clouds[i].x += dt * self.clouds[i].dx;
        }
    }

    fn draw(&self, buf: &mut PixelBuf) {
        let sky_h = buf.height().max(1);
        for y in 0..buf.height() {
            let t = ((y * 256) / sky_h) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            buf.fill_rect(0, y as i32, buf.width() as i32, 1, c);
        }
        for cloud in &self.clouds {
            buf.blit(&self.cloud, cloud.x as i32, cloud.y);
        }
    }
}

// ── Level ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ColumnSprite {
    /// Left edge in pixels
    x: i32,
    /// Top of the opening in pixels
    opening_top: i32,
    /// Logical x seen last frame, to notice recycling
    last_x: f32,
    visible: bool,
}

/// Columns and the scrolling ground. Also owns the collision mask of
/// everything solid.
#[derive(Debug, Clone)]
pub struct Level {
    surface: Surface,
    column_w: i32,
    opening_h: i32,
    ground_h: i32,
    ground_offset: f32,
    columns: Vec<ColumnSprite>,
    mask: CollisionMask,
    rng: Pcg32,
}

impl Level {
    pub fn new(surface: Surface, facade: &GameFacade, seed: u64) -> Self {
        let (w, h) = (surface.width as f32, surface.height as f32);
        let mut level = Self {
            surface,
            column_w: ((COLUMN_WIDTH * w).round() as i32).max(1),
            opening_h: (OPENING_SHARE * h).round() as i32,
            ground_h: ((GROUND_SHARE * h).round() as i32).max(2),
            ground_offset: 0.0,
            columns: Vec::with_capacity(N_COLUMNS),
            mask: CollisionMask::new(surface.width, surface.height),
            rng: Pcg32::seed_from_u64(seed),
        };
        for pos in facade.column_positions() {
            let opening_top = level.roll_opening();
            level.columns.push(ColumnSprite {
                x: (pos.x * w).round() as i32,
                opening_top,
                last_x: pos.x,
                visible: false,
            });
        }
        level.rebuild_mask();
        level
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    /// Height of the sky above the ground
    fn sky_h(&self) -> i32 {
        self.surface.height as i32 - self.ground_h
    }

    /// Random opening top in the middle band of the sky
    fn roll_opening(&mut self) -> i32 {
        let sky = self.sky_h();
        let low = (0.2 * sky as f32) as i32;
        let high = ((0.7 * sky as f32) as i32).min(sky - self.opening_h).max(low + 1);
        self.rng.random_range(low..high)
    }

    fn rebuild_mask(&mut self) {
        self.mask.clear();
        let sky = self.sky_h();
        for column in self.columns.iter().filter(|c| c.visible) {
            let bottom_top = column.opening_top + self.opening_h;
            self.mask.fill_rect(column.x, 0, self.column_w, column.opening_top);
            self.mask
                .fill_rect(column.x, bottom_top, self.column_w, sky - bottom_top);
        }
        self.mask.fill_rect(
            0,
            sky,
            self.surface.width as i32,
            self.ground_h,
        );
    }

    fn draw_column(&self, buf: &mut PixelBuf, column: &ColumnSprite) {
        let cap_extra = 1;
        let cap_h = 2;
        let w = self.column_w;
        let top_end = column.opening_top;
        let bottom_start = column.opening_top + self.opening_h;

        for dx in 0..w {
            let c = pipe_shade(dx, w);
            buf.fill_rect(column.x + dx, 0, 1, top_end, c);
            buf.fill_rect(column.x + dx, bottom_start, 1, self.sky_h() - bottom_start, c);
        }
        for dx in -cap_extra..(w + cap_extra) {
            let c = pipe_shade(dx + cap_extra, w + cap_extra * 2);
            buf.fill_rect(column.x + dx, top_end - cap_h, 1, cap_h, c);
            buf.fill_rect(column.x + dx, bottom_start, 1, cap_h, c);
            buf.set(column.x + dx, top_end - 1, CAP_DARK);
            buf.set(column.x + dx, bottom_start, CAP_DARK);
        }
    }

    fn draw_ground(&self, buf: &mut PixelBuf) {
        let gy = self.sky_h();
        let offset = self.ground_offset as i32;
        for x in 0..self.surface.width as i32 {
            let alt = ((x + offset) / 3) % 2 == 0;
            buf.set(x, gy, if alt { GRASS } else { GRASS_LIGHT });
            buf.set(x, gy + 1, GRASS);
        }
        for y in (gy + 2)..self.surface.height as i32 {
            for x in 0..self.surface.width as i32 {
                let stripe = ((x + offset) + (y - gy) * 2) % 12 < 6;
                buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }
}

impl Sprite for Level {
    fn position(&self) -> (i32, i32) {
        (0, 0)
    }

    fn update(&mut self, machine: &StateMachine, facade: &GameFacade, dt: f32) {
        let state = machine.state();
        // Nothing in the level changes while the player falls away
        if state == GamePhase::WaitReset {
            return;
        }

        let w = self.surface.width as f32;
        if !is_no_move(state) {
            let speed = facade.scroll_speed().abs() * w;
            self.ground_offset = (self.ground_offset + dt * speed) % 12.0;
        }

        for (i, pos) in facade.column_positions().enumerate() {
            // A column that jumped right was recycled: give it a new opening
            if state == GamePhase::Reset || pos.x > self.columns[i].last_x {
                self.columns[i].opening_top = self.roll_opening();
            }
            let column = &mut self.columns[i];
            column.last_x = pos.x;
            column.x = (pos.x * w).round() as i32;
            column.visible = pos.x < 1.0;
        }
        self.rebuild_mask();
    }

    fn draw(&self, buf: &mut PixelBuf) {
        for column in self.columns.iter().filter(|c| c.visible) {
            self.draw_column(buf, column);
        }
        self.draw_ground(buf);
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── Player ──────────────────────────────────────────────────────────────────

/// The player character. Switches to its hit image on collision until the
/// next reset.
#[derive(Debug, Clone)]
pub struct PlayerSprite {
    surface: Surface,
    normal: Bitmap,
    hit: Bitmap,
    is_hit: bool,
    pos: (i32, i32),
}

impl PlayerSprite {
    pub fn new(surface: Surface, normal: Bitmap, hit: Bitmap) -> Self {
        Self {
            surface,
            normal,
            hit,
            is_hit: false,
            pos: (0, 0),
        }
    }

    pub fn image(&self) -> &Bitmap {
        if self.is_hit { &self.hit } else { &self.normal }
    }

    pub fn is_hit(&self) -> bool {
        self.is_hit
    }
}

impl Sprite for PlayerSprite {
    fn position(&self) -> (i32, i32) {
        self.pos
    }

    fn update(&mut self, machine: &StateMachine, facade: &GameFacade, _dt: f32) {
        self.pos = self.surface.game_to_ui(facade.player_position());
        match machine.state() {
            GamePhase::Collision => self.is_hit = true,
            GamePhase::Reset => self.is_hit = false,
            _ => {}
        }
    }

    fn draw(&self, buf: &mut PixelBuf) {
        buf.blit(self.image(), self.pos.0, self.pos.1);
    }
}

// ── Scoreboard ──────────────────────────────────────────────────────────────

/// Current score top-right, high score top-left
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    surface: Surface,
    digits: Vec<Bitmap>,
    gold_digits: Vec<Bitmap>,
    score: u32,
    high_score: u32,
}

impl ScoreBoard {
    pub fn new(surface: Surface, digits: Vec<Bitmap>, gold_digits: Vec<Bitmap>) -> Self {
        Self {
            surface,
            digits,
            gold_digits,
            score: 0,
            high_score: 0,
        }
    }

    fn draw_number(buf: &mut PixelBuf, digits: &[Bitmap], right: i32, y: i32, n: u32) {
        let text = n.to_string();
        let mut x = right - text.len() as i32 * 4 + 1;
        for ch in text.bytes() {
            let digit = &digits[(ch - b'0') as usize];
            // Drop shadow first
            for (dx, dy, _) in digit.opaque() {
                buf.set(x + dx + 1, y + dy + 1, SHADOW);
            }
            buf.blit(digit, x, y);
            x += 4;
        }
    }
}

impl Sprite for ScoreBoard {
    fn position(&self) -> (i32, i32) {
        (self.surface.width as i32 - 2, 1)
    }

    fn update(&mut self, machine: &StateMachine, facade: &GameFacade, _dt: f32) {
        if matches!(machine.state(), GamePhase::Score | GamePhase::Reset) {
            self.score = facade.score();
        }
        self.high_score = facade.high_score();
    }

    fn draw(&self, buf: &mut PixelBuf) {
        let (right, y) = self.position();
        Self::draw_number(buf, &self.digits, right, y, self.score);
        let high_w = self.high_score.to_string().len() as i32 * 4;
        Self::draw_number(buf, &self.gold_digits, 1 + high_w, y, self.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::assets::Assets;

    fn surface() -> Surface {
        Surface {
            width: 80,
            height: 48,
        }
    }

    fn machine_in(state: GamePhase) -> StateMachine {
        let mut machine = StateMachine::new();
        machine.set(state);
        machine
    }

    #[test]
    fn test_level_mask_has_ground() {
        let facade = GameFacade::new(0);
        let level = Level::new(surface(), &facade, 1);
        assert!(level.mask().is_solid(10, 47));
        assert!(!level.mask().is_solid(10, 10));
    }

    #[test]
    fn test_level_tracks_columns_and_rerolls_on_recycle() {
        let mut facade = GameFacade::new(0);
        let mut level = Level::new(surface(), &facade, 7);
        let mut machine = machine_in(GamePhase::Default);

        // Bring the first column on screen
        for _ in 0..40 {
            facade.update(&mut machine, 1.0);
            level.update(&machine, &facade, 1.0);
            machine.transition_on_tick();
        }
        let first = facade.column_positions().next().unwrap();
        assert!(first.x < 1.0);
        assert!(level.columns[0].visible);
        assert_eq!(level.columns[0].x, (first.x * 80.0).round() as i32);

        // Solid above the opening, open inside it
        let column = level.columns[0].clone();
        assert!(level.mask().is_solid(column.x, column.opening_top - 1));
        assert!(!level.mask().is_solid(column.x, column.opening_top + 1));

        // Run until the first column is recycled
        let mut recycled = false;
        for _ in 0..400 {
            let before = facade.column_positions().next().unwrap().x;
            facade.update(&mut machine, 1.0);
            level.update(&machine, &facade, 1.0);
            machine.transition_on_tick();
            if facade.column_positions().next().unwrap().x > before {
                recycled = true;
                break;
            }
        }
        assert!(recycled);
        assert!(!level.columns[0].visible);
    }

    #[test]
    fn test_level_frozen_while_waiting_for_reset() {
        let facade = GameFacade::new(0);
        let mut level = Level::new(surface(), &facade, 3);
        level.ground_offset = 5.0;
        level.update(&machine_in(GamePhase::WaitReset), &facade, 1.0);
        assert_eq!(level.ground_offset, 5.0);
        level.update(&machine_in(GamePhase::Default), &facade, 1.0);
        assert!(level.ground_offset > 5.0);
    }

    #[test]
    fn test_player_image_follows_phase() {
        let assets = Assets::load().unwrap();
        let facade = GameFacade::new(0);
        let mut player = PlayerSprite::new(surface(), assets.player, assets.player_hit);

        player.update(&machine_in(GamePhase::Default), &facade, 1.0);
        assert!(!player.is_hit());
        assert_eq!(player.position(), (12, 24));

        player.update(&machine_in(GamePhase::Collision), &facade, 1.0);
        assert!(player.is_hit());
        player.update(&machine_in(GamePhase::WaitReset), &facade, 1.0);
        assert!(player.is_hit());
        player.update(&machine_in(GamePhase::Reset), &facade, 1.0);
        assert!(!player.is_hit());
    }

    #[test]
    fn test_scoreboard_draws_digits() {
        let assets = Assets::load().unwrap();
        let mut board = ScoreBoard::new(surface(), assets.digits, assets.gold_digits);
        let facade = GameFacade::new(42);
        board.update(&machine_in(GamePhase::Default), &facade, 1.0);
        assert_eq!(board.high_score, 42);

        let mut buf = PixelBuf::new(80, 48, SKY_TOP);
        board.draw(&mut buf);
        assert!((0..80).any(|x| buf.get(x, 1) == GOLD));
    }

    #[test]
    fn test_background_fills_sky() {
        let assets = Assets::load().unwrap();
        let background = Background::new(surface(), assets.cloud, 5);
        let mut buf = PixelBuf::new(80, 48, Rgb(0, 0, 0));
        background.draw(&mut buf);
        assert!((0..48).all(|y| buf.get(0, y) != Rgb(0, 0, 0)));
    }
}
