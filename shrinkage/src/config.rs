//! Configuration types for controlling shrink termination and trace output.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Termination policy for a shrink search
///
/// The policy is consulted with the cumulative number of candidates attempted
/// so far (the sum of every batch size evaluated, not the number of rounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum ShrinkingMode {
    /// Never shrink
    Off,
    /// Keep shrinking while fewer than `n` candidates have been attempted
    Bounded(usize),
    /// Keep shrinking as long as a round finds a regression
    Unbounded,
}

impl ShrinkingMode {
    /// Whether the search may run another round after `attempted` candidates
    pub fn permits(&self, attempted: usize) -> bool {
        match self {
            ShrinkingMode::Off => false,
            ShrinkingMode::Bounded(bound) => attempted < *bound,
            ShrinkingMode::Unbounded => true,
        }
    }
}

impl Default for ShrinkingMode {
    fn default() -> Self {
        ShrinkingMode::Bounded(1000)
    }
}

impl fmt::Display for ShrinkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShrinkingMode::Off => write!(f, "off"),
            ShrinkingMode::Bounded(bound) => write!(f, "bounded:{}", bound),
            ShrinkingMode::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl FromStr for ShrinkingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        match lower.as_str() {
            "off" => return Ok(ShrinkingMode::Off),
            "unbounded" => return Ok(ShrinkingMode::Unbounded),
            _ => {}
        }

        let bound = match lower.strip_prefix("bounded:") {
            Some(bound) => bound,
            None if lower.chars().all(|c| c.is_ascii_digit() || c == '-') => lower.as_str(),
            None => return Err(ConfigError::InvalidMode(trimmed.to_string())),
        };

        bound
            .trim()
            .parse::<usize>()
            .map(ShrinkingMode::Bounded)
            .map_err(|_| ConfigError::InvalidBound(bound.trim().to_string()))
    }
}

/// Configuration for a single shrink search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkConfig {
    /// Termination policy
    pub mode: ShrinkingMode,
    /// Whether to flush the trace to the sink once the search completes
    pub print_steps: bool,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            mode: ShrinkingMode::default(),
            print_steps: true,
        }
    }
}

impl ShrinkConfig {
    /// Create a new shrink configuration
    pub fn new(mode: ShrinkingMode, print_steps: bool) -> Self {
        Self { mode, print_steps }
    }

    /// Create a shrink configuration with a custom mode
    pub fn with_mode(mode: ShrinkingMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Suppress trace output
    pub fn quiet(mut self) -> Self {
        self.print_steps = false;
        self
    }

    /// Enable trace output
    pub fn verbose(mut self) -> Self {
        self.print_steps = true;
        self
    }

    /// Snapshot the current global settings into a per-search configuration
    pub fn from_global(global: &GlobalConfig) -> Self {
        Self {
            mode: global.default_mode,
            print_steps: global.print_shrink_steps,
        }
    }
}

/// Global defaults for shrink searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Whether completed searches print their trace
    pub print_shrink_steps: bool,
    /// Mode used when a caller does not pick one
    pub default_mode: ShrinkingMode,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            print_shrink_steps: true,
            default_mode: ShrinkingMode::default(),
        }
    }
}

impl GlobalConfig {
    /// Create a new global configuration
    pub fn new(print_shrink_steps: bool, default_mode: ShrinkingMode) -> Self {
        Self {
            print_shrink_steps,
            default_mode,
        }
    }
}

/// Holder for the global shrink configuration
pub struct ConfigManager {
    global_config: GlobalConfig,
}

impl ConfigManager {
    /// Create a new configuration manager with default global configuration
    pub fn new() -> Self {
        Self {
            global_config: GlobalConfig::default(),
        }
    }

    /// Create a new configuration manager with custom global configuration
    pub fn with_global_config(global_config: GlobalConfig) -> Self {
        Self { global_config }
    }

    /// Get the current global configuration
    pub fn global_config(&self) -> &GlobalConfig {
        &self.global_config
    }

    /// Update the global configuration
    pub fn set_global_config(&mut self, global_config: GlobalConfig) {
        self.global_config = global_config;
    }

    /// Create a shrink configuration that inherits from global defaults
    pub fn create_shrink_config(&self) -> ShrinkConfig {
        ShrinkConfig::from_global(&self.global_config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

// One manager per thread; the free functions below read and write it
thread_local! {
    static CONFIG_MANAGER: std::cell::RefCell<ConfigManager> = std::cell::RefCell::new(ConfigManager::new());
}

/// Get the current global configuration
pub fn get_global_config() -> GlobalConfig {
    CONFIG_MANAGER.with(|manager| manager.borrow().global_config().clone())
}

/// Set the global configuration
pub fn set_global_config(config: GlobalConfig) {
    CONFIG_MANAGER.with(|manager| manager.borrow_mut().set_global_config(config))
}

/// Toggle trace printing for searches started on this thread
pub fn set_print_shrink_steps(enabled: bool) {
    CONFIG_MANAGER.with(|manager| {
        let mut manager = manager.borrow_mut();
        let mut config = manager.global_config().clone();
        config.print_shrink_steps = enabled;
        manager.set_global_config(config);
    })
}

/// Create a shrink configuration that inherits from global defaults
pub fn create_shrink_config() -> ShrinkConfig {
    CONFIG_MANAGER.with(|manager| manager.borrow().create_shrink_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_permits() {
        assert!(!ShrinkingMode::Off.permits(0));
        assert!(!ShrinkingMode::Off.permits(10));

        assert!(!ShrinkingMode::Bounded(0).permits(0));
        assert!(ShrinkingMode::Bounded(5).permits(4));
        assert!(!ShrinkingMode::Bounded(5).permits(5));
        assert!(!ShrinkingMode::Bounded(5).permits(6));

        assert!(ShrinkingMode::Unbounded.permits(0));
        assert!(ShrinkingMode::Unbounded.permits(usize::MAX));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("off".parse::<ShrinkingMode>(), Ok(ShrinkingMode::Off));
        assert_eq!(" Unbounded ".parse::<ShrinkingMode>(), Ok(ShrinkingMode::Unbounded));
        assert_eq!("bounded:250".parse::<ShrinkingMode>(), Ok(ShrinkingMode::Bounded(250)));
        assert_eq!("40".parse::<ShrinkingMode>(), Ok(ShrinkingMode::Bounded(40)));

        assert!(matches!(
            "sometimes".parse::<ShrinkingMode>(),
            Err(ConfigError::InvalidMode(_))
        ));
        assert_eq!(
            "bounded:-1".parse::<ShrinkingMode>(),
            Err(ConfigError::InvalidBound("-1".to_string()))
        );
        assert_eq!(
            "-7".parse::<ShrinkingMode>(),
            Err(ConfigError::InvalidBound("-7".to_string()))
        );
    }

    #[test]
    fn test_mode_display_parses_back() {
        for mode in [
            ShrinkingMode::Off,
            ShrinkingMode::Bounded(17),
            ShrinkingMode::Unbounded,
        ] {
            assert_eq!(mode.to_string().parse::<ShrinkingMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_shrink_config_defaults() {
        let config = ShrinkConfig::default();
        assert_eq!(config.mode, ShrinkingMode::Bounded(1000));
        assert!(config.print_steps);
    }

    #[test]
    fn test_shrink_config_builders() {
        let config = ShrinkConfig::with_mode(ShrinkingMode::Unbounded).quiet();
        assert_eq!(config.mode, ShrinkingMode::Unbounded);
        assert!(!config.print_steps);

        let config = config.verbose();
        assert!(config.print_steps);
    }

    #[test]
    fn test_config_manager() {
        let mut manager = ConfigManager::new();
        assert_eq!(manager.global_config(), &GlobalConfig::default());

        manager.set_global_config(GlobalConfig::new(false, ShrinkingMode::Off));
        let config = manager.create_shrink_config();
        assert_eq!(config, ShrinkConfig::new(ShrinkingMode::Off, false));
    }

    #[test]
    fn test_thread_local_config_functions() {
        let original = get_global_config();

        set_global_config(GlobalConfig::new(true, ShrinkingMode::Unbounded));
        assert_eq!(create_shrink_config().mode, ShrinkingMode::Unbounded);

        set_print_shrink_steps(false);
        let config = create_shrink_config();
        assert!(!config.print_steps);
        assert_eq!(config.mode, ShrinkingMode::Unbounded);

        set_global_config(original);
    }

    #[test]
    fn test_thread_local_config_is_per_thread() {
        set_print_shrink_steps(false);
        let other = std::thread::spawn(|| get_global_config().print_shrink_steps)
            .join()
            .unwrap();
        assert!(other);
        set_print_shrink_steps(true);
    }
}
