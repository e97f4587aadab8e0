use crate::{
    config::PlannerConfig,
    core::{
        agent::{Agent, CompletionProvider},
        persona::{persona_for, PersonaVariant},
    },
    error::{PlannerError, Result},
    logging::InteractionLog,
    prompts::build_prompt,
    services::{openai_client::OpenAIClient, openweather::OpenWeatherClient, serper::SerperClient},
    tools::{DataFetchers, SearchProvider, WeatherProvider},
    types::{Domain, PlanBuilder, PlanResult, TripRequest, WeatherReport},
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info};

/// Where a run currently stands. Only moves forward; any failure ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    Init,
    WeatherDone,
    TransportDone,
    HotelDone,
    PlanDone,
    FoodDone,
    Aggregated,
    Failed,
}

impl PlanStage {
    fn after(domain: Domain) -> Self {
        match domain {
            Domain::Weather => PlanStage::WeatherDone,
            Domain::Transport => PlanStage::TransportDone,
            Domain::Hotel => PlanStage::HotelDone,
            Domain::Itinerary => PlanStage::PlanDone,
            Domain::Food => PlanStage::FoodDone,
        }
    }
}

/// Runs the five domain agents in order and aggregates their answers.
#[derive(Debug, Clone)]
pub struct TravelPlanner {
    agent: Agent,
    fetchers: DataFetchers,
    personas: PersonaVariant,
}

impl TravelPlanner {
    /// A planner with no data sources and no interaction sinks
    pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            agent: Agent::new(completion, InteractionLog::new()),
            fetchers: DataFetchers::new(),
            personas: PersonaVariant::default(),
        }
    }

    /// Wire up the OpenAI, Serper and OpenWeather clients from configuration.
    ///
    /// Search and weather are optional; without a key the matching fetchers
    /// fall back to their sentinel digests.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let completion = completion_client(config)?;

        let mut fetchers = DataFetchers::new();
        if let Some(key) = &config.serper_api_key {
            let serper = SerperClient::new(key, config.request_timeout)?
                .with_base_url(&config.serper_base_url);
            fetchers = fetchers.with_search(Arc::new(serper));
        }
        if let Some(key) = &config.openweather_api_key {
            let weather = OpenWeatherClient::new(key, config.request_timeout)?
                .with_base_url(&config.openweather_base_url)
                .with_lang(&config.openweather_lang);
            fetchers = fetchers.with_weather(Arc::new(weather));
        }

        info!(
            model = completion.model(),
            max_tokens = ?completion.max_tokens(),
            timeout = ?completion.timeout(),
            search = config.serper_api_key.is_some(),
            weather = config.openweather_api_key.is_some(),
            "travel planner configured"
        );

        Ok(Self {
            agent: Agent::new(Arc::new(completion), InteractionLog::from_config(config)?),
            fetchers,
            personas: config.persona_variant,
        })
    }

    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.fetchers = self.fetchers.with_search(search);
        self
    }

    pub fn with_weather(mut self, weather: Arc<dyn WeatherProvider>) -> Self {
        self.fetchers = self.fetchers.with_weather(weather);
        self
    }

    pub fn with_interaction_log(mut self, log: InteractionLog) -> Self {
        self.agent = Agent::new(self.agent.completion(), log);
        self
    }

    pub fn with_persona_variant(mut self, personas: PersonaVariant) -> Self {
        self.personas = personas;
        self
    }

    /// Run every domain in order and return the aggregated plan.
    ///
    /// Steps are awaited one at a time. The first completion failure aborts
    /// the run and is returned as [`PlannerError::StepFailed`]; answers from
    /// earlier steps are dropped.
    pub async fn generate_plan(&self, trip: &TripRequest) -> Result<PlanResult> {
        let started = Instant::now();
        info!(
            destination = %trip.destination,
            period = %trip.period(),
            "starting travel plan"
        );

        let mut stage = PlanStage::Init;
        let mut plan = PlanBuilder::new();
        for domain in Domain::ALL {
            let text = match self.run_step(domain, trip).await {
                Ok(text) => text,
                Err(err) => {
                    error!(?stage, step = %domain, "travel plan aborted: {}", err);
                    debug!(stage = ?PlanStage::Failed, "stage changed");
                    return Err(err);
                }
            };
            plan.set(domain, text);
            stage = PlanStage::after(domain);
            debug!(?stage, "stage changed");
        }

        let result = plan.finish()?;
        debug!(stage = ?PlanStage::Aggregated, "stage changed");
        info!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            "travel plan completed"
        );
        Ok(result)
    }

    /// Only the weather step
    pub async fn generate_weather_only(&self, trip: &TripRequest) -> Result<WeatherReport> {
        let weather = self.run_step(Domain::Weather, trip).await?;
        Ok(WeatherReport { weather })
    }

    /// fetch -> prompt -> completion for one domain
    async fn run_step(&self, domain: Domain, trip: &TripRequest) -> Result<String> {
        let digest = self.fetchers.fetch(domain, trip).await;
        let prompt = build_prompt(domain, trip, digest.as_deref());
        let persona = persona_for(domain, self.personas);

        self.agent
            .invoke(domain, persona, &prompt)
            .await
            .map_err(|err| PlannerError::step_failed(domain, err))
    }
}

/// The completion client has no request timeout unless one is configured.
fn completion_client(config: &PlannerConfig) -> Result<OpenAIClient> {
    Ok(OpenAIClient::new(&config.openai_api_key, &config.model)?
        .with_base_url(&config.openai_base_url)
        .with_max_tokens(config.max_tokens)
        .with_timeout(config.request_timeout)?)
}
