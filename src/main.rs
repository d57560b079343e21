fn main() {
    #[cfg(feature = "cli")]
    bgsplice::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("bgsplice: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
