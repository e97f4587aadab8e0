pub mod agent;
pub mod persona;
pub mod planner;

pub use agent::{Agent, CompletionProvider};
pub use persona::{persona_for, AgentPersona, PersonaVariant};
pub use planner::{PlanStage, TravelPlanner};
