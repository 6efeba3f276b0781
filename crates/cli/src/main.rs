fn main() -> Result<(), Box<dyn std::error::Error>> {
    kinemeter_cli::run()
}
