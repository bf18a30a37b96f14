//! Kodegen Bundler MSI - Windows Installer bundler driving the WiX toolset.
//!
//! This binary builds .msi installers from an application output directory
//! with proper error handling and artifact verification.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match kodegen_bundler_msi::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
