fn main() {
    std::process::exit(launchpad_cli::run());
}
