fn main() {
    std::process::exit(ltd_cli::run_cli());
}
