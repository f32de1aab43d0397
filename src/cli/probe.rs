use std::error::Error;

use crate::core::backend::Backend;
use crate::core::greeting::load_greeting;

pub async fn run_hello(backend: &dyn Backend) -> Result<(), Box<dyn Error>> {
    let greeting = load_greeting(backend).await;
    println!("{}", greeting.text());
    Ok(())
}

pub async fn run_health(backend: &dyn Backend, base_url: &str) -> Result<(), Box<dyn Error>> {
    match backend.health().await {
        Ok(status) => {
            println!("✅ {base_url}: {status}");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {base_url}: {err}");
            std::process::exit(1);
        }
    }
}
