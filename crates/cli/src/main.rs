#[tokio::main]
async fn main() -> anyhow::Result<()> {
    peerctl::run().await
}
