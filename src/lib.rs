pub mod binomial;
pub mod config;
pub mod dist;
pub mod error;
pub mod mwu;
pub mod quantile;
pub mod rank;
pub mod sample;
pub mod udist;

pub use binomial::BinomialDist;
pub use config::Config;
pub use dist::{Dist, DiscreteDist, NormalDist};
pub use error::StatError;
pub use mwu::{mann_whitney_u_test, mann_whitney_u_test_with_config, Alternative, MannWhitneyUTestResult};
pub use quantile::{quantile_ci, quantile_ci_with_config, QuantileCiResult};
pub use rank::RankMerge;
pub use sample::Sample;
pub use udist::UDist;
