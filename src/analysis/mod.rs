pub mod git;
pub mod runner;

#[cfg(test)]
mod tests;

pub use git::{GitRepository, PrimaryBranchGuard};
pub use runner::Runner;
