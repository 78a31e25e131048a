fn main() {
    if let Err(err) = svguri::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
