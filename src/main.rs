#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = quizboard::run().await {
        eprintln!("quizboard fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
