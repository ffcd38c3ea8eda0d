fn main() {
    if let Err(e) = weerun::cli_main(std::env::args().collect()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
