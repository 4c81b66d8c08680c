fn main() {
    #[cfg(feature = "cli")]
    gwcat::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("gwcat: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
