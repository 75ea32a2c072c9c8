/// Default size threshold. Components with fewer nodes are accepted.
pub const DEFAULT_MAX_SIZE: usize = 20;
/// Default hard cap on the number of Kernighan–Lin passes per bisection.
pub const DEFAULT_MAX_BISECTION_PASSES: usize = 10;

/// Options of a decomposition run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecompositionConfig {
    /// Graphs with fewer nodes than this are not bisected.
    pub max_size: usize,
    /// Sum edge weights instead of counting edges when evaluating cuts.
    pub weighted: bool,
    /// Maximum number of improvement passes of a single bisection.
    pub max_bisection_passes: usize,
    /// Seed for the initial balanced split of each bisection.
    pub seed: u64,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self { max_size: DEFAULT_MAX_SIZE, weighted: false, max_bisection_passes: DEFAULT_MAX_BISECTION_PASSES, seed: 0 }
    }
}

impl DecompositionConfig {
    /// Set the size threshold.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set whether edge weights are used.
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Set the pass limit of the bisection heuristic.
    pub fn with_max_bisection_passes(mut self, passes: usize) -> Self {
        self.max_bisection_passes = passes;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
