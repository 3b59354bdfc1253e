fn main() {
    if let Err(err) = station_traffic::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
