// Version information for the reporting crate

/// Version string for the reporting crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_identity() {
        assert_eq!(PKG_NAME, "reporting");
        assert!(!VERSION.is_empty());
    }
}
