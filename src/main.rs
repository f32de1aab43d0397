fn main() -> Result<(), Box<dyn std::error::Error>> {
    verdict::cli::main()
}
