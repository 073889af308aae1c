use serde::Serialize;
use utoipa::ToSchema;

/// The 27 federative units (26 states plus the Federal District), by code
pub const BRAZILIAN_STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BrazilianState {
    pub code: String,
    pub name: String,
}

pub fn brazilian_states() -> Vec<BrazilianState> {
    BRAZILIAN_STATES
        .iter()
        .map(|(code, name)| BrazilianState {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn state_name(code: &str) -> Option<&'static str> {
    BRAZILIAN_STATES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}
