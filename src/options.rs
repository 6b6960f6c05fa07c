//! Configuration options for txkv.

/// Default capacity hint for the base snapshot.
pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

/// Store configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Number of keys the base snapshot reserves room for up front.
    pub initial_capacity: usize,

    /// Record operation counters and latencies in `Database::metrics`.
    pub enable_metrics: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            enable_metrics: true,
        }
    }
}

impl Options {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for Options.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial_capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.options.initial_capacity = capacity;
        self
    }

    /// Set enable_metrics.
    pub fn enable_metrics(mut self, value: bool) -> Self {
        self.options.enable_metrics = value;
        self
    }

    /// Build the options.
    pub fn build(self) -> Options {
        self.options
    }
}
