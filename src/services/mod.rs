pub mod openai_client;
pub mod openweather;
pub mod serper;

pub use openai_client::OpenAIClient;
pub use openweather::OpenWeatherClient;
pub use serper::SerperClient;
