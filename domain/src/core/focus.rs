//! Focus value object
//!
//! A focus is the conversational mode picked in the setup selector. It is
//! stored on the session and shown to the user, nothing else reads it.

use super::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Focus {
    #[default]
    DebateLivre,
    PenseComigo,
    CombateAoMedo,
    CombateADependenciaEmocional,
    CombateACulpa,
    ProtecaoEmocional,
    ConversaDificil,
}

impl Focus {
    /// All focus modes in selector order
    pub fn all() -> [Focus; 7] {
        [
            Focus::DebateLivre,
            Focus::PenseComigo,
            Focus::CombateAoMedo,
            Focus::CombateADependenciaEmocional,
            Focus::CombateACulpa,
            Focus::ProtecaoEmocional,
            Focus::ConversaDificil,
        ]
    }

    /// Label shown in the selector
    pub fn label(&self) -> &'static str {
        match self {
            Focus::DebateLivre => "Debate Livre",
            Focus::PenseComigo => "Pense Comigo",
            Focus::CombateAoMedo => "Prot. de Combate ao Medo",
            Focus::CombateADependenciaEmocional => "Prot. de Combate à Dependência Emocional",
            Focus::CombateACulpa => "Prot. de Combate à Culpa",
            Focus::ProtecaoEmocional => "Prot. de Proteção Emocional",
            Focus::ConversaDificil => "Conversa Difícil",
        }
    }

    /// Short ASCII key accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Focus::DebateLivre => "debate-livre",
            Focus::PenseComigo => "pense-comigo",
            Focus::CombateAoMedo => "combate-ao-medo",
            Focus::CombateADependenciaEmocional => "combate-a-dependencia-emocional",
            Focus::CombateACulpa => "combate-a-culpa",
            Focus::ProtecaoEmocional => "protecao-emocional",
            Focus::ConversaDificil => "conversa-dificil",
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Focus {
    type Err = DomainError;

    /// Accepts either the ASCII key or the label (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Focus::all()
            .into_iter()
            .find(|f| f.key() == wanted || f.label().to_lowercase() == wanted)
            .ok_or_else(|| DomainError::InvalidFocus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_focus() {
        assert_eq!(Focus::default(), Focus::DebateLivre);
    }

    #[test]
    fn test_parse_by_key_and_label() {
        assert_eq!("pense-comigo".parse::<Focus>().unwrap(), Focus::PenseComigo);
        assert_eq!(
            "conversa difícil".parse::<Focus>().unwrap(),
            Focus::ConversaDificil
        );
        assert_eq!(
            "Prot. de Combate à Culpa".parse::<Focus>().unwrap(),
            Focus::CombateACulpa
        );
    }

    #[test]
    fn test_parse_unknown_focus() {
        let err = "meditation".parse::<Focus>().unwrap_err();
        assert_eq!(err, DomainError::InvalidFocus("meditation".to_string()));
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = Focus::all().iter().map(|f| f.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 7);
    }
}
