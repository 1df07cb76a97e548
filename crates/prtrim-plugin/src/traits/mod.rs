//! Plugin traits.

pub mod analyzer;
pub mod notes;

/// Base trait for all plugins.
pub trait Plugin: Send + Sync {
    /// Returns the plugin name.
    fn name(&self) -> &'static str;

    /// Returns the plugin version.
    fn version(&self) -> &'static str;

    /// Returns a short description of the plugin.
    fn description(&self) -> &'static str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareAnalyzer;

    impl Plugin for BareAnalyzer {
        fn name(&self) -> &'static str {
            "bare"
        }
        fn version(&self) -> &'static str {
            "0.0.1"
        }
    }

    #[test]
    fn test_description_defaults_to_empty() {
        assert_eq!(BareAnalyzer.description(), "");
    }

    #[test]
    fn test_plugin_is_object_safe() {
        let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(BareAnalyzer)];
        assert_eq!(plugins[0].name(), "bare");
        assert_eq!(plugins[0].version(), "0.0.1");
    }
}
