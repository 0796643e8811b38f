//! Pixel surface rendered to the terminal with half blocks
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use std::io::{self, Write};

use crossterm::style::{self, Color};
use crossterm::{cursor, queue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend `a` toward `b` by `t_256 / 256`
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    fn color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// An opaque-or-transparent sprite image
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Option<Rgb>>,
}

impl Bitmap {
    /// Build a bitmap from ASCII art. `.` is transparent; every other
    /// character must appear in `palette`.
    pub fn parse(name: &str, art: &str, palette: &[(char, Rgb)]) -> crate::Result<Self> {
        let rows: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(crate::Error::resource(name, "empty image"));
        }

        let mut pixels = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(crate::Error::resource(
                    name,
                    format!("row {} is not {} pixels wide", y, width),
                ));
            }
            for ch in row.chars() {
                if ch == '.' {
                    pixels.push(None);
                    continue;
                }
                let color = palette
                    .iter()
                    .find(|(key, _)| *key == ch)
                    .map(|(_, c)| *c)
                    .ok_or_else(|| {
                        crate::Error::resource(name, format!("unknown palette key '{}'", ch))
                    })?;
                pixels.push(Some(color));
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Opaque pixels as `(x, y, color)`
    pub fn opaque(&self) -> impl Iterator<Item = (i32, i32, Rgb)> + '_ {
        self.pixels.iter().enumerate().filter_map(|(i, px)| {
            px.map(|c| ((i % self.width) as i32, (i / self.width) as i32, c))
        })
    }
}

/// Solid pixels a sprite can collide with
#[derive(Debug, Clone)]
pub struct CollisionMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl CollisionMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        if x0 >= x1 {
            return;
        }
        for py in y0..y1 {
            self.bits[py * self.width + x0..py * self.width + x1].fill(true);
        }
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && self.bits[y as usize * self.width + x as usize]
    }

    /// Whether any opaque pixel of `bitmap` drawn at `(x, y)` lands on a
    /// solid pixel
    pub fn overlaps(&self, bitmap: &Bitmap, (x, y): (i32, i32)) -> bool {
        bitmap
            .opaque()
            .any(|(bx, by, _)| self.is_solid(x + bx, y + by))
    }
}

/// Pixel buffer with half-block rendering
#[derive(Debug, Clone)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize, fill: Rgb) -> Self {
        Self {
            w,
            h,
            px: vec![fill; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    pub fn blit(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for (bx, by, c) in bitmap.opaque() {
            self.set(x + bx, y + by, c);
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = None;
        let mut prev_bg = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if prev_bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.color()))?;
                    prev_bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(top.color()))?;
                        prev_fg = Some(top);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, cursor::MoveTo(0, (row + 1) as u16))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}
