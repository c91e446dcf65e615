/// One Brazilian federative unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub acronym: String,
    pub name: String,
    pub capital: String,
}

impl State {
    pub fn new(acronym: &str, name: &str, capital: &str) -> Self {
        State {
            acronym: acronym.to_string(),
            name: name.to_string(),
            capital: capital.to_string(),
        }
    }
}

// Declaration order is load-bearing: resolution takes the first match.
const BRAZIL: &[(&str, &str, &str)] = &[
    ("AC", "Acre", "Rio Branco"),
    ("AL", "Alagoas", "Maceió"),
    ("AP", "Amapá", "Macapá"),
    ("AM", "Amazonas", "Manaus"),
    ("BA", "Bahia", "Salvador"),
    ("CE", "Ceará", "Fortaleza"),
    ("DF", "Distrito Federal", "Brasília"),
    ("ES", "Espírito Santo", "Vitória"),
    ("GO", "Goiás", "Goiânia"),
    ("MA", "Maranhão", "São Luís"),
    ("MT", "Mato Grosso", "Cuiabá"),
    ("MS", "Mato Grosso do Sul", "Campo Grande"),
    ("MG", "Minas Gerais", "Belo Horizonte"),
    ("PA", "Pará", "Belém"),
    ("PB", "Paraíba", "João Pessoa"),
    // Londrina rather than Curitiba, per the quote provider's convention.
    ("PR", "Paraná", "Londrina"),
    ("PE", "Pernambuco", "Recife"),
    ("PI", "Piauí", "Teresina"),
    ("RJ", "Rio de Janeiro", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte", "Natal"),
    ("RS", "Rio Grande do Sul", "Porto Alegre"),
    ("RO", "Rondônia", "Porto Velho"),
    ("RR", "Roraima", "Boa Vista"),
    ("SC", "Santa Catarina", "Florianópolis"),
    ("SP", "São Paulo", "São Paulo"),
    ("SE", "Sergipe", "Aracaju"),
    ("TO", "Tocantins", "Palmas"),
];

pub(super) fn brazil_states() -> Vec<State> {
    BRAZIL
        .iter()
        .map(|&(acronym, name, capital)| State::new(acronym, name, capital))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_27_states_present() {
        let states = brazil_states();
        assert_eq!(states.len(), 27);
        assert!(states.iter().all(|s| s.acronym.len() == 2));
    }

    #[test]
    fn parana_capital_is_londrina() {
        let states = brazil_states();
        let pr = states.iter().find(|s| s.acronym == "PR").unwrap();
        assert_eq!(pr.capital, "Londrina");
    }
}
