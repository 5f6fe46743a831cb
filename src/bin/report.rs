fn main() -> anyhow::Result<()> {
    if let Err(e) = quizboard::run_report() {
        eprintln!("quizboard-report fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
