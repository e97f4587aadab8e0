use crate::{
    core::persona::AgentPersona,
    error::Result,
    logging::{Interaction, InteractionLog},
    types::Domain,
};
use async_trait::async_trait;
use chrono::Local;
use std::{fmt::Debug, sync::Arc, time::Instant};
use tracing::{debug, error};

/// Hosted text-completion service
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Submit one prompt under the given persona and return the completion text
    async fn complete(&self, persona: &AgentPersona, prompt: &str) -> Result<String>;
}

/// Invokes a domain agent: one completion call, timed and logged.
#[derive(Debug, Clone)]
pub struct Agent {
    completion: Arc<dyn CompletionProvider>,
    log: InteractionLog,
}

impl Agent {
    pub fn new(completion: Arc<dyn CompletionProvider>, log: InteractionLog) -> Self {
        Self { completion, log }
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    pub fn completion(&self) -> Arc<dyn CompletionProvider> {
        Arc::clone(&self.completion)
    }

    /// Run `prompt` through the completion service as `domain`'s agent.
    ///
    /// Failures are returned untouched and nothing is logged for them as an
    /// interaction; the completion text is passed through as-is.
    pub async fn invoke(
        &self,
        domain: Domain,
        persona: &AgentPersona,
        prompt: &str,
    ) -> Result<String> {
        debug!(
            agent = domain.agent_name(),
            prompt_chars = prompt.chars().count(),
            "invoking agent"
        );

        let started = Instant::now();
        let response = match self.completion.complete(persona, prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!(
                    agent = domain.agent_name(),
                    task = domain.key(),
                    elapsed_secs = started.elapsed().as_secs_f64(),
                    "completion failed: {}",
                    err
                );
                return Err(err);
            }
        };

        self.log.record(&Interaction {
            agent_name: domain.agent_name().to_string(),
            task_name: domain.key().to_string(),
            prompt: prompt.to_string(),
            response: response.clone(),
            elapsed: started.elapsed(),
            timestamp: Local::now(),
        });

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persona::{persona_for, PersonaVariant};
    use crate::error::PlannerError;
    use crate::logging::MemorySink;

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl CompletionProvider for Echo {
        async fn complete(&self, persona: &AgentPersona, prompt: &str) -> Result<String> {
            Ok(format!("{} answered: {}", persona.role, prompt))
        }
    }

    #[derive(Debug)]
    struct Unauthorized;

    #[async_trait]
    impl CompletionProvider for Unauthorized {
        async fn complete(&self, _persona: &AgentPersona, _prompt: &str) -> Result<String> {
            Err(PlannerError::Api {
                status: 401,
                message: "invalid key".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_invoke_logs_and_passes_text_through() {
        let sink = Arc::new(MemorySink::new());
        let agent = Agent::new(Arc::new(Echo), InteractionLog::new().with_sink(sink.clone()));
        let persona = persona_for(Domain::Food, PersonaVariant::Brief);

        let text = agent.invoke(Domain::Food, persona, "Busan").await.unwrap();
        assert_eq!(text, "travel restaurant advisor answered: Busan");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].agent_name, "FoodAgent");
        assert_eq!(records[0].task_name, "food");
        assert_eq!(records[0].prompt, "Busan");
        assert_eq!(records[0].response, text);
    }

    #[tokio::test]
    async fn test_invoke_failure_is_propagated() {
        let sink = Arc::new(MemorySink::new());
        let agent = Agent::new(
            Arc::new(Unauthorized),
            InteractionLog::new().with_sink(sink.clone()),
        );
        let persona = persona_for(Domain::Weather, PersonaVariant::Brief);

        let result = agent.invoke(Domain::Weather, persona, "prompt").await;
        tokio_test::assert_err!(result);
        assert!(sink.records().is_empty());
    }
}
