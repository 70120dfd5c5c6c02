#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ugcpak_lib::main().await
}
