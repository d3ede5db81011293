//! Game logic: turn cards, rounds, scoring

pub mod round;

use rand::prelude::*;

/// Categories a turn card can ask for.
pub const CATEGORIES: [&str; 10] = [
    "Hayvanlar",
    "Şehirler",
    "Meyveler",
    "Meslekler",
    "Eşyalar",
    "Ünlüler",
    "Filmler",
    "Müzik Enstrümanları",
    "Teknoloji",
    "Spor Dalları",
];

/// The Turkish alphabet, used to draw the required starting letter.
pub const LETTERS: [char; 29] = [
    'A', 'B', 'C', 'Ç', 'D', 'E', 'F', 'G', 'Ğ', 'H', 'I', 'İ', 'J', 'K', 'L', 'M', 'N', 'O',
    'Ö', 'P', 'R', 'S', 'Ş', 'T', 'U', 'Ü', 'V', 'Y', 'Z',
];

/// Names the bot opponent can play under.
pub const BOT_NAMES: [&str; 8] = [
    "KelimeCan",
    "HızlıYazan",
    "SözlükCanavarı",
    "GamerTürk",
    "AlfabeKralı",
    "ZekaKüpü",
    "HarfAvcısı",
    "Deyimci",
];

/// Duration of one round in seconds.
pub const ROUND_SECONDS: u32 = 15;

/// Minimum character count for a submission.
pub const MIN_WORD_CHARS: usize = 2;

/// Points per character for an accepted human word.
pub const HUMAN_POINTS_PER_CHAR: u32 = 15;

/// Points per remaining second for an accepted human word.
pub const HUMAN_POINTS_PER_SECOND: u32 = 10;

/// Points per character for an accepted bot word.
pub const BOT_POINTS_PER_CHAR: u32 = 10;

/// A category/letter pair drawn for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCard {
    pub category: &'static str,
    pub letter: char,
}

impl TurnCard {
    /// Draw a random card from the fixed category list and alphabet.
    pub fn draw() -> Self {
        Self::draw_with_rng(&mut rand::rng())
    }

    /// Draw a card using a specific RNG (for testing/seeding).
    pub fn draw_with_rng<R: Rng>(rng: &mut R) -> Self {
        let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
        let letter = LETTERS[rng.random_range(0..LETTERS.len())];
        TurnCard { category, letter }
    }
}

/// Score for an accepted human submission. Longer words and faster
/// answers pay more.
pub fn human_points(word: &str, seconds_remaining: u32) -> u32 {
    word.chars().count() as u32 * HUMAN_POINTS_PER_CHAR
        + seconds_remaining * HUMAN_POINTS_PER_SECOND
}

/// Score for an accepted bot word. Flat per-character rate, no time bonus.
pub fn bot_points(word: &str) -> u32 {
    word.chars().count() as u32 * BOT_POINTS_PER_CHAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_drawn_card_is_from_fixed_lists() {
        for _ in 0..100 {
            let card = TurnCard::draw();
            assert!(CATEGORIES.contains(&card.category));
            assert!(LETTERS.contains(&card.letter));
        }
    }

    #[test]
    fn test_seeded_draw_is_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(
            TurnCard::draw_with_rng(&mut rng1),
            TurnCard::draw_with_rng(&mut rng2)
        );
    }

    #[test]
    fn test_human_points_formula() {
        // 5 chars at 10 seconds remaining: 5*15 + 10*10
        assert_eq!(human_points("kitap", 10), 175);
        // 4 chars at the full 15 seconds: 4*15 + 15*10
        assert_eq!(human_points("kedi", 15), 210);
    }

    #[test]
    fn test_human_points_counts_chars_not_bytes() {
        // "şişe" is 4 chars but 6 bytes
        assert_eq!(human_points("şişe", 0), 60);
    }

    #[test]
    fn test_bot_points_formula() {
        assert_eq!(bot_points("masa"), 40);
        assert_eq!(bot_points("ördek"), 50);
    }
}
