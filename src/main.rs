#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trip_agent_rs::cli::run().await
}
