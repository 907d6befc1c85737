//! Colour palettes for the emitters and overlays.
//!
//! Colours are stored as packed `0xRRGGBB` values and expanded to
//! `Vec3` RGB components in `0.0..=1.0` when a particle is spawned.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

/// Warm ambient sparkles.
pub const SPARKLE: &[u32] = &[0xFF4500, 0xFFD700, 0xF0E68C];

/// Gold, orange and red tree lights.
pub const TREE: &[u32] = &[0xFFD700, 0xFFA500, 0xFF6347, 0xFF0000, 0xF0E68C];

/// Pink and magenta heart particles.
pub const HEART: &[u32] = &[0xFF69B4, 0xFF1493, 0xFF00FF, 0xFF0000];

pub const STAR: u32 = 0xFFFF00;
pub const GOLD: u32 = 0xFFD700;
pub const PINK: u32 = 0xFF69B4;

/// Expand a packed `0xRRGGBB` colour.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

/// Unpack a `0xRRGGBB` colour into bytes.
pub fn rgb8(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// Pick a random colour from `palette`.
///
/// An empty palette yields white.
pub fn pick<R: Rng + ?Sized>(palette: &[u32], rng: &mut R) -> Vec3 {
    palette.choose(rng).map(|&hex| rgb(hex)).unwrap_or(Vec3::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rgb_expands_channels() {
        let c = rgb(0xFF8000);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
        assert_eq!(rgb8(0xFF69B4), [0xFF, 0x69, 0xB4]);
    }

    #[test]
    fn test_pick_stays_in_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        let allowed: Vec<Vec3> = HEART.iter().map(|&h| rgb(h)).collect();
        for _ in 0..100 {
            assert!(allowed.contains(&pick(HEART, &mut rng)));
        }
        assert_eq!(pick(&[], &mut rng), Vec3::ONE);
    }
}
