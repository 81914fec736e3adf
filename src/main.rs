fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    adagio::runtime::run()
}
