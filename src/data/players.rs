//! First-team squad roster
//!
//! Upstream player ids are needed to request player stats; the roster maps
//! shirt numbers and names to those ids.

use thiserror::Error;

/// A squad member as known to the stats upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Upstream player id
    pub id: &'static str,
    pub full_name: &'static str,
    /// Shirt number, if assigned
    pub number: Option<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerLookupError {
    #[error("No player matches '{0}'")]
    NotFound(String),

    #[error("'{query}' matches several players: {}", .matches.join(", "))]
    Ambiguous {
        query: String,
        matches: Vec<&'static str>,
    },
}

const fn player(id: &'static str, full_name: &'static str, number: Option<u8>) -> Player {
    Player {
        id,
        full_name,
        number,
    }
}

/// Static roster of the first-team squad
pub static SQUAD: [Player; 29] = [
    player("7AJQtOXBgmRphJJCp2NvNR", "Robert Sanchez", Some(1)),
    player("3os8PwL1mJ2TJmGkhBDeDv", "Filip Jorgensen", Some(12)),
    player("4H1GhgvG1ldTNe8pgOUpol", "Gaga Slonina", Some(44)),
    player("78u6wchuqyJTlk2E0N4Skf", "Marc Cucurella", Some(3)),
    player("5nsrSil1MgDMLJn7APQgbD", "Tosin Adarabioyo", Some(4)),
    player("2JKytx9yLSwjXyOuW1jtQe", "Benoit Badiashile", Some(5)),
    player("5LOgdi9SSvd8dwRDyazmoZ", "Levi Colwill", Some(6)),
    player("2Be2AsOE5UnUayhdzMlVnF", "Jorrel Hato", Some(21)),
    player("jiKIenze7hskkncPNrA6B", "Trevoh Chalobah", Some(23)),
    player("4pu8Vnba43JYreI7ytlXGR", "Reece James", Some(24)),
    player("4AJxNxFWWKTy1xzuPeHMUL", "Malo Gusto", Some(27)),
    player("4CJuicRu1cGbhb22n7MNJh", "Wesley Fofana", Some(29)),
    player("5rRjJlyKtF87uvdKfy48F", "Aaron Anselmino", Some(30)),
    player("5QYkzwOGVPMISpU1HFtLUZ", "Josh Acheampong", Some(34)),
    player("6pEHcNajH2J2pTPneUXmXV", "Enzo Fernandez", Some(8)),
    player("3IjuqjelbhncAlTPIGE35R", "Dario Essugo", Some(14)),
    player("7qeAlzwWGlEyXKh6eHXcJY", "Andrey Santos", Some(17)),
    player("43oUZ5vRX4B6m61Pue0jWB", "Moises Caicedo", Some(25)),
    player("2fd36y1tclXGYu6pIMjOIL", "Romeo Lavia", Some(45)),
    player("2OCQIwCKdHMJNhImUsBRzw", "Pedro Neto", Some(7)),
    player("591Ncctlm9o6wWCTFrxfo0", "Liam Delap", Some(9)),
    player("2srYA1QS1OhCE45rzou1ZR", "Cole Palmer", Some(10)),
    player("5IobErY2OMIyoMUYzkJwmB", "Jamie Gittens", Some(11)),
    player("5UBDLH28hHkBfZ4sCiAFnA", "Nicolas Jackson", Some(15)),
    player("qbrH5sUyPH8swXEC2twTp", "Christopher Nkunku", Some(18)),
    player("2FwzGE2WMOHAnR0puVMisc", "Joao Pedro", Some(20)),
    player("5Y1CrHFGRhBLOjHMUNmkk5", "Tyrique George", Some(32)),
    player("7pQf4EbJjYGXqcniuC0I0t", "Estevao", Some(41)),
    player("3Fu6jUWvWDGabzNapGjtlz", "Mykhailo Mudryk", None),
];

/// Returns the full squad
pub fn squad() -> &'static [Player] {
    &SQUAD
}

/// Finds a player by shirt number, upstream id, or a unique name fragment
///
/// Name matching is case-insensitive. A fragment matching several players is
/// an error rather than a guess.
pub fn find_player(query: &str) -> Result<&'static Player, PlayerLookupError> {
    let query = query.trim();

    if let Ok(number) = query.parse::<u8>() {
        return SQUAD
            .iter()
            .find(|p| p.number == Some(number))
            .ok_or_else(|| PlayerLookupError::NotFound(query.to_string()));
    }

    if let Some(player) = SQUAD.iter().find(|p| p.id == query) {
        return Ok(player);
    }

    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Err(PlayerLookupError::NotFound(query.to_string()));
    }

    let matches: Vec<&'static Player> = SQUAD
        .iter()
        .filter(|p| p.full_name.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(PlayerLookupError::NotFound(query.to_string())),
        [player] => Ok(*player),
        several => {
            // An exact full name wins over longer names that contain it
            if let Some(exact) = several.iter().find(|p| p.full_name.to_lowercase() == needle) {
                return Ok(*exact);
            }
            Err(PlayerLookupError::Ambiguous {
                query: query.to_string(),
                matches: several.iter().map(|p| p.full_name).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squad_ids_are_unique() {
        let mut ids: Vec<&str> = squad().iter().map(|p| p.id).collect();
        ids.sort();
        let original_len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), original_len, "Player IDs are not unique");
    }

    #[test]
    fn test_shirt_numbers_are_unique() {
        let mut numbers: Vec<u8> = squad().iter().filter_map(|p| p.number).collect();
        numbers.sort();
        let original_len = numbers.len();
        numbers.dedup();
        assert_eq!(numbers.len(), original_len, "Shirt numbers are not unique");
    }

    #[test]
    fn test_find_by_number() {
        assert_eq!(find_player("10").unwrap().full_name, "Cole Palmer");
        assert_eq!(find_player(" 1 ").unwrap().full_name, "Robert Sanchez");
        assert_eq!(
            find_player("99").unwrap_err(),
            PlayerLookupError::NotFound("99".to_string())
        );
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find_player("43oUZ5vRX4B6m61Pue0jWB").unwrap().full_name, "Moises Caicedo");
    }

    #[test]
    fn test_find_by_name_fragment() {
        assert_eq!(find_player("palmer").unwrap().number, Some(10));
        assert_eq!(find_player("ESTEVAO").unwrap().number, Some(41));
        assert_eq!(find_player("mudryk").unwrap().number, None);
    }

    #[test]
    fn test_ambiguous_fragment_is_an_error() {
        // Reece James, Josh Acheampong, Jamie Gittens, ...
        let err = find_player("j").unwrap_err();
        assert!(matches!(err, PlayerLookupError::Ambiguous { .. }));
        assert!(err.to_string().contains("Reece James"));
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            find_player("zola"),
            Err(PlayerLookupError::NotFound(_))
        ));
        assert!(find_player("").is_err());
    }
}
