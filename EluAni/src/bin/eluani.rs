fn main() -> anyhow::Result<()> {
    eluani::cli::run_cli()
}
