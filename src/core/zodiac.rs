const ANIMALS: [&str; 12] = [
    "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster",
    "Dog", "Pig",
];

/// Zodiac animal for a calendar year; 4 AD was a Rat year.
pub fn zodiac_for_year(year: i32) -> &'static str {
    ANIMALS[(i64::from(year) - 4).rem_euclid(12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_years() {
        assert_eq!(zodiac_for_year(2020), "Rat");
        assert_eq!(zodiac_for_year(2024), "Dragon");
        assert_eq!(zodiac_for_year(1984), "Rat");
        assert_eq!(zodiac_for_year(2031), "Pig");
    }

    #[test]
    fn test_years_before_reference() {
        assert_eq!(zodiac_for_year(4), "Rat");
        assert_eq!(zodiac_for_year(3), "Pig");
        assert_eq!(zodiac_for_year(-8), "Rat");
    }

    #[test]
    fn test_extreme_years() {
        assert_eq!(zodiac_for_year(i32::MIN), "Rat");
        assert_eq!(zodiac_for_year(i32::MAX), "Rabbit");
    }
}
