//! Heart Field
//! Owns every heart and its home coordinate

use crate::config::FieldConfig;
use egui::{Color32, Pos2, Vec2};
use rand::Rng;
use std::f32::consts::TAU;

/// Heart palette: various pinks and reds
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeartColor {
    PinkMain,
    PinkDark,
    SoftPink,
    DeepRose,
    HotPink,
    Crimson,
    Blush,
    CoralPink,
    DarkRed,
    LightRose,
}

impl HeartColor {
    pub const ALL: [HeartColor; 10] = [
        HeartColor::PinkMain,
        HeartColor::PinkDark,
        HeartColor::SoftPink,
        HeartColor::DeepRose,
        HeartColor::HotPink,
        HeartColor::Crimson,
        HeartColor::Blush,
        HeartColor::CoralPink,
        HeartColor::DarkRed,
        HeartColor::LightRose,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            HeartColor::PinkMain => [0xFF, 0x6B, 0x8A],
            HeartColor::PinkDark => [0xE8, 0x45, 0x75],
            HeartColor::SoftPink => [0xFF, 0x9B, 0xB5],
            HeartColor::DeepRose => [0xD6, 0x38, 0x64],
            HeartColor::HotPink => [0xFF, 0x4D, 0x6D],
            HeartColor::Crimson => [0xC9, 0x18, 0x4A],
            HeartColor::Blush => [0xFF, 0xB3, 0xC6],
            HeartColor::CoralPink => [0xFF, 0x75, 0x8F],
            HeartColor::DarkRed => [0xA4, 0x13, 0x3C],
            HeartColor::LightRose => [0xFF, 0x85, 0xA1],
        }
    }

    pub fn color32(self) -> Color32 {
        let [r, g, b] = self.rgb();
        Color32::from_rgb(r, g, b)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeartGlyph {
    Suit,
    OutlineSuit,
    Heavy,
    TwoHearts,
    Growing,
    Sparkling,
    Exclamation,
}

impl HeartGlyph {
    pub const ALL: [HeartGlyph; 7] = [
        HeartGlyph::Suit,
        HeartGlyph::OutlineSuit,
        HeartGlyph::Heavy,
        HeartGlyph::TwoHearts,
        HeartGlyph::Growing,
        HeartGlyph::Sparkling,
        HeartGlyph::Exclamation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeartGlyph::Suit => "\u{2665}",
            HeartGlyph::OutlineSuit => "\u{2661}",
            HeartGlyph::Heavy => "\u{2764}",
            HeartGlyph::TwoHearts => "\u{1F495}",
            HeartGlyph::Growing => "\u{1F497}",
            HeartGlyph::Sparkling => "\u{1F496}",
            HeartGlyph::Exclamation => "\u{2763}",
        }
    }
}

/// Individual heart data
#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub home: Pos2,
    pub position: Pos2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: HeartColor,
    pub glyph: HeartGlyph,
    // Fixed at 1.0 for now; kept for fade effects
    pub opacity: f32,
    pub rotation: f32,
}

/// Uniform point inside `[0, width) x [0, height)`.
///
/// Scales a unit sample instead of using `gen_range` so a zero-sized
/// surface yields the origin rather than panicking on an empty range.
fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2) -> Pos2 {
    Pos2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y)
}

/// All hearts, in paint order (later entries draw on top)
#[derive(Clone, Debug, Default)]
pub struct HeartField {
    hearts: Vec<Heart>,
}

impl HeartField {
    /// Scatter `count` hearts at rest over a surface of `bounds`
    pub fn initialize<R: Rng + ?Sized>(
        count: usize,
        bounds: Vec2,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Self {
        let size_span = config.size_max - config.size_min;
        let hearts = (0..count)
            .map(|_| {
                let home = random_point(rng, bounds);
                Heart {
                    home,
                    position: home,
                    velocity: Vec2::ZERO,
                    size: config.size_min + rng.gen::<f32>() * size_span,
                    color: HeartColor::ALL[rng.gen_range(0..HeartColor::ALL.len())],
                    glyph: HeartGlyph::ALL[rng.gen_range(0..HeartGlyph::ALL.len())],
                    opacity: 1.0,
                    rotation: rng.gen::<f32>() * TAU,
                }
            })
            .collect();

        Self { hearts }
    }

    /// Pick fresh homes inside the new bounds; motion state is left alone
    pub fn redistribute_homes<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        for heart in &mut self.hearts {
            heart.home = random_point(rng, bounds);
        }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn hearts_mut(&mut self) -> &mut [Heart] {
        &mut self.hearts
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }
}
