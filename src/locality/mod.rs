//! Resolution of the free-text "UF" field scraped from quote tables into a
//! (city, state acronym) pair.

pub mod states;

use once_cell::sync::Lazy;
use regex::Regex;

pub use states::State;

/// "Two-letter token followed by a free-text remainder", e.g. `SP Araçatuba`.
static TWO_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w{2})\s(.+)$").expect("two-group expression is valid"));

/// Resolved locality. `city` is never empty; `state` is empty only when no
/// state matched at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub city: String,
    pub state: String,
}

/// Immutable lookup service over the state table. Injected rather than read
/// from a global so tests can substitute a smaller table.
#[derive(Debug, Clone)]
pub struct StateTable {
    states: Vec<State>,
}

impl StateTable {
    pub fn new(states: Vec<State>) -> Self {
        StateTable { states }
    }

    /// The 27 Brazilian states, in declaration order.
    pub fn brazil() -> Self {
        StateTable::new(states::brazil_states())
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Splits a raw locality string into (city, state acronym), both
    /// upper-cased.
    ///
    /// The candidate key is matched as a case-sensitive substring of each
    /// state's acronym or full name, first match in table order winning.
    /// Substring containment can mis-resolve lookalike inputs; that matching
    /// rule is the provider's and is kept as-is.
    pub fn resolve(&self, raw: &str) -> Locality {
        let key = candidate_key(raw);

        let matched = self
            .states
            .iter()
            .find(|s| s.acronym.contains(&key) || s.name.contains(&key));

        match matched {
            Some(state) => {
                // Strip whichever field the key matched on; an acronym hit
                // leaves the city text, a full-name hit usually leaves nothing
                // and falls back to the capital.
                let stripped = if state.acronym.contains(&key) {
                    raw.replace(&state.acronym, "")
                } else {
                    raw.replace(&state.name, "")
                };
                let city = match stripped.trim() {
                    "" => state.capital.as_str(),
                    rest => rest,
                };
                Locality {
                    city: city.to_uppercase(),
                    state: state.acronym.to_uppercase(),
                }
            }
            None => Locality {
                city: raw.to_uppercase(),
                state: String::new(),
            },
        }
    }
}

/// Derives the lookup key from the raw locality text.
///
/// Parenthetical suffixes are noise and dropped; `" - "` separators are
/// collapsed before tokenizing. Token-count handling mirrors the provider's
/// formats: a two-token split always keys on the first token, a longer split
/// keys on the text before the first literal hyphen when one is present.
fn candidate_key(raw: &str) -> String {
    let text = raw.split('(').next().unwrap_or("").replace(" - ", " ");

    let parts: Vec<String> = match TWO_GROUPS.captures(&text) {
        Some(caps) => vec![caps[1].to_string(), caps[2].to_string()],
        None => text.split_whitespace().map(str::to_string).collect(),
    };

    match parts.len() {
        2 => parts[0].clone(),
        n if n > 2 => {
            if raw.contains('-') {
                raw.split('-').next().unwrap_or("").trim().to_string()
            } else {
                parts.join(" ")
            }
        }
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_acronym_resolves_to_capital() {
        let table = StateTable::brazil();
        for state in table.states() {
            let loc = table.resolve(&state.acronym);
            assert_eq!(loc.city, state.capital.to_uppercase(), "{}", state.acronym);
            assert_eq!(loc.state, state.acronym);
        }
    }

    #[test]
    fn acronym_plus_city_keeps_city_text() {
        let loc = StateTable::brazil().resolve("SP Ribeirão Preto");
        assert_eq!(loc.city, "RIBEIRÃO PRETO");
        assert_eq!(loc.state, "SP");
    }

    #[test]
    fn full_state_name_falls_back_to_capital() {
        let loc = StateTable::brazil().resolve("Rondônia");
        assert_eq!(loc.city, "PORTO VELHO");
        assert_eq!(loc.state, "RO");
    }

    #[test]
    fn multiword_state_name_falls_back_to_capital() {
        let loc = StateTable::brazil().resolve("Rio Grande do Sul");
        assert_eq!(loc.city, "PORTO ALEGRE");
        assert_eq!(loc.state, "RS");
    }

    #[test]
    fn parenthetical_suffix_is_ignored_for_matching_only() {
        // The suffix is dropped from the key but kept in the city text.
        let loc = StateTable::brazil().resolve("SP Araçatuba (a prazo)");
        assert_eq!(loc.city, "ARAÇATUBA (A PRAZO)");
        assert_eq!(loc.state, "SP");
    }

    #[test]
    fn hyphenated_multiword_input_keys_on_text_before_hyphen() {
        let loc = StateTable::brazil().resolve("Mato Grosso - Norte");
        assert_eq!(loc.state, "MT");
    }

    #[test]
    fn unknown_locality_keeps_raw_text_and_empty_state() {
        let loc = StateTable::brazil().resolve("Xyz Town");
        assert_eq!(loc.city, "XYZ TOWN");
        assert_eq!(loc.state, "");
    }

    #[test]
    fn substring_containment_can_misresolve() {
        // "Par" is a substring of "Pará"; the provider's rule accepts it.
        let loc = StateTable::brazil().resolve("Par Tal");
        assert_eq!(loc.state, "PA");
        assert_eq!(loc.city, "PAR TAL");
    }

    #[test]
    fn table_is_injectable() {
        let table = StateTable::new(vec![State::new("ZZ", "Zetaland", "Zeta City")]);
        let loc = table.resolve("ZZ");
        assert_eq!(loc.city, "ZETA CITY");
        assert_eq!(loc.state, "ZZ");
        assert_eq!(table.resolve("SP").state, "");
    }
}
