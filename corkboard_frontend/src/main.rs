fn main() -> Result<(), eframe::Error> {
    corkboard_frontend::run_frontend()
}
