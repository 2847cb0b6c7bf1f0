use crate::models::Level;

pub const LEVEL_COUNT: Level = 10;

// One fixed secret per level, index 0 = level 1. Handed to teams at the
// event; knowing the secret is the proof of completion.
static LEVEL_PASSWORDS: [&str; LEVEL_COUNT as usize] = [
    "ZjLjTmM6FvvyRnrb2rfNWOZOTa6ip5If",
    "263JGJPfgU6LtdEvgfWU1XP5yac29mFx",
    "MNk8KNH3Usiio41PRUEoDFPqfxLPlSmx",
    "2WmrDFRmJIq3IPxneAaMGhap0pFhF3NJ",
    "4oQYVPkxZOOEOO5pTW81FB8j8lxXGUQw",
    "HWasnPhtq9AVKe0dmk45nxy20cvUa6EG",
    "morbNTDkSW6jIlUc0ymOdMaLnOlFVAaj",
    "dfwvzFQi4mU0wfNbFOe9RoWskMLg7eEc",
    "4CKMh1JI91bUIZZPXDqGanal4xvAg0JM",
    "FGUW5ilLVJrxX9kMYMmlN4MgbpfMiqey",
];

/// Resolves a submitted secret to its level. Exact match only: case-sensitive,
/// no trimming. Scans from the highest level down so that the highest level
/// wins if two levels ever shared a secret.
pub fn resolve_password(candidate: &str) -> Option<Level> {
    (1..=LEVEL_COUNT)
        .rev()
        .find(|&level| LEVEL_PASSWORDS[(level - 1) as usize] == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_secret_resolves_to_its_level() {
        for (index, secret) in LEVEL_PASSWORDS.iter().enumerate() {
            assert_eq!(resolve_password(secret), Some(index as Level + 1));
        }
    }

    #[test]
    fn unknown_strings_do_not_resolve() {
        assert_eq!(resolve_password(""), None);
        assert_eq!(resolve_password("bandit0"), None);
        assert_eq!(resolve_password("hunter2"), None);
    }

    #[test]
    fn one_corrupted_character_is_invalid() {
        let mut corrupted = LEVEL_PASSWORDS[4].to_string();
        corrupted.replace_range(0..1, "x");
        assert_eq!(resolve_password(&corrupted), None);
    }

    #[test]
    fn matching_is_case_sensitive_and_untrimmed() {
        assert_eq!(resolve_password(&LEVEL_PASSWORDS[0].to_lowercase()), None);
        assert_eq!(
            resolve_password(&format!(" {} ", LEVEL_PASSWORDS[0])),
            None
        );
    }
}
