fn main() {
    if let Err(e) = plugscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
