pub mod monte_carlo;

pub use monte_carlo::{
    binomial_95_ci, estimate_win_rate, estimate_win_rate_parallel, RaidEstimate,
};
