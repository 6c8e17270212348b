//! Version command for the reploit CLI.

/// The current version of reploit, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("reploit {}", VERSION);
    std::process::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }
}
