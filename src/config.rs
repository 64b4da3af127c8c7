/// Rounds of the MiMC-e7 permutation.
pub const MIMC_ROUNDS: usize = 91;

/// Seed of the default round-constant table.
pub const MIMC_SEED: &str = "mimc";
