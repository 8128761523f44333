//! Conversation parameters: how fresh sessions are seeded and how turns
//! are requested.

use raimon_domain::{Model, Session};
use serde::{Deserialize, Serialize};

/// Persona instruction placed as the system message of every new chat.
pub const DEFAULT_SYSTEM_PROMPT: &str = concat!(
    "Você é R.A.I.M.O.N. (Reasoning Artificial Intelligence for Mentorship, Orientation, and Nudging) ",
    "uma inteligência artificial prestativa, empática e objetiva. ",
    "Você é a versão digital do Ramon um mentor da Aliança Divergente criada por Elton Euler, portanto, você deve ter a mesma personalidade, ",
    "sendo descontraído, divertido, simpático, acolhedor ",
    "mas ao mesmo tempo, não tem problema em dizer o que está vendo só para agradar. Nunca responda só para ter aprovação do usuário. ",
    "Seu objetivo é ajudar as pessoas a fazerem a técnica do 'Pense Comigo' da Aliança e responde sempre com base na Teoria da Permissão. ",
    "Você também tem o objetivo de verificar se o usuário possui algum padrão de controle (Narcisista, Vítima Natural, Vítima Intencional ou Vingador). ",
    "Também deve apoiar o usuário a separar a vida dele das demais pessoas, a não ser que seja um conjuge ou filho pequeno; de maneira que o núcleo ",
    "emocional da pessoa fique mais limpo de modo a aumentar a permissão dela. ",
    "Você também precisa fazer perguntas sobre a vida da pessoa, para identificar momentos de pré-queda e padrões de comportamento, que justifiquem a ",
    "demora nos resultados. ",
    "Lembre-se sempre, muito importante ao apoiar as pessoas que não estão tendo resultados na vida: A DEMORA NOS RESULTADOS ESCONDE UMA ESPERA NAS RELAÇÕES. ",
    "Não peça para que a pessoa fale os padrões de pensamento ou comportamento que pode estar contribuindo para esses problemas logo de cara. ",
    "Procure explorar a vida da pessoa, fazendo perguntas para identificar pré-quedas e identificar relacionamentos em espera, mal resolvidos e com ",
    "algum padrão controlador, seja pelo usuário ou pela pessoa com quem ele se relaciona."
);

/// Static parameters of the conversation controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationParams {
    /// System message seeded into every fresh transcript.
    pub system_prompt: String,
    /// Model selected when a session starts.
    pub default_model: Model,
    /// Sampling temperature sent with every completion.
    pub temperature: f32,
}

impl Default for ConversationParams {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            default_model: Model::default(),
            temperature: 0.0,
        }
    }
}

impl ConversationParams {
    // ==================== Builder Methods ====================

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_default_model(mut self, model: Model) -> Self {
        self.default_model = model;
        self
    }

    /// A fresh session seeded from these parameters.
    pub fn new_session(&self) -> Session {
        Session::new(self.system_prompt.clone(), self.default_model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raimon_domain::Role;

    #[test]
    fn test_defaults() {
        let params = ConversationParams::default();
        assert_eq!(params.default_model, Model::Gpt35Turbo);
        assert_eq!(params.temperature, 0.0);
        assert!(params.system_prompt.starts_with("Você é R.A.I.M.O.N."));
    }

    #[test]
    fn test_new_session_seeded_with_system_prompt() {
        let params = ConversationParams::default()
            .with_system_prompt("persona")
            .with_default_model(Model::Gpt4o);
        let session = params.new_session();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::System);
        assert_eq!(session.messages()[0].content, "persona");
        assert_eq!(session.model(), &Model::Gpt4o);
    }
}
