//! Embedded sprite images
//!
//! Images are ASCII art parsed once at startup. A malformed image is a fatal
//! resource error: the game does not start with missing art.

use super::pixels::{Bitmap, Rgb};
use crate::error::Result;

pub const SKY_TOP: Rgb = Rgb(70, 180, 200);
pub const SKY_BOT: Rgb = Rgb(190, 232, 245);
pub const GRASS: Rgb = Rgb(84, 168, 55);
pub const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
pub const DIRT: Rgb = Rgb(210, 185, 110);
pub const DIRT_DARK: Rgb = Rgb(185, 160, 90);
pub const PIPE_L: Rgb = Rgb(74, 122, 26);
pub const PIPE_M: Rgb = Rgb(100, 170, 40);
pub const PIPE_R: Rgb = Rgb(115, 191, 46);
pub const PIPE_HI: Rgb = Rgb(145, 215, 62);
pub const CAP_DARK: Rgb = Rgb(60, 100, 20);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GOLD: Rgb = Rgb(245, 200, 66);
pub const SHADOW: Rgb = Rgb(30, 30, 30);

const PLAYER_PALETTE: &[(char, Rgb)] = &[
    ('y', Rgb(245, 200, 66)),
    ('h', Rgb(255, 225, 100)),
    ('g', Rgb(215, 165, 35)),
    ('w', WHITE),
    ('k', Rgb(20, 20, 20)),
    ('o', Rgb(225, 75, 35)),
];

const PLAYER: &str = "
    ..hhh..
    .yyywk.
    ggyyyoo
    .yyyyy.
    ..yyy..
";

const PLAYER_HIT: &str = "
    ..hhh..
    .ykykk.
    ggyyyy.
    .yyooy.
    ..yyy..
";

const CLOUD: &str = "
    ..www...
    .wwwwww.
    wwwwwwww
";

#[rustfmt::skip]
const DIGITS: [&str; 10] = [
    "###\n#.#\n#.#\n#.#\n###",
    ".#.\n##.\n.#.\n.#.\n###",
    "###\n..#\n###\n#..\n###",
    "###\n..#\n.##\n..#\n###",
    "#.#\n#.#\n###\n..#\n..#",
    "###\n#..\n###\n..#\n###",
    "###\n#..\n###\n#.#\n###",
    "###\n..#\n.#.\n.#.\n.#.",
    "###\n#.#\n###\n#.#\n###",
    "###\n#.#\n###\n..#\n###",
];

/// Every image the presentation draws
#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Bitmap,
    pub player_hit: Bitmap,
    pub cloud: Bitmap,
    /// Score digits in white
    pub digits: Vec<Bitmap>,
    /// High-score digits in gold
    pub gold_digits: Vec<Bitmap>,
}

impl Assets {
    pub fn load() -> Result<Self> {
        let digits = |color: Rgb| -> Result<Vec<Bitmap>> {
            DIGITS
                .iter()
                .enumerate()
                .map(|(i, art)| Bitmap::parse(&format!("digit {}", i), art, &[('#', color)]))
                .collect()
        };

        let assets = Self {
            player: Bitmap::parse("player", PLAYER, PLAYER_PALETTE)?,
            player_hit: Bitmap::parse("player_hit", PLAYER_HIT, PLAYER_PALETTE)?,
            cloud: Bitmap::parse("cloud", CLOUD, &[('w', WHITE)])?,
            digits: digits(WHITE)?,
            gold_digits: digits(GOLD)?,
        };
        log::debug!("Loaded {} digit images", assets.digits.len());
        Ok(assets)
    }
}
