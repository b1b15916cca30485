use std::sync::LazyLock;

/// Crate version as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git SHA embedded at build time, or `unknown` outside a checkout.
pub const GIT_SHA: &str = env!("PEERCTL_GIT_SHA");

/// Long version string shown by `--version`.
pub static FULL_VERSION: LazyLock<String> =
    LazyLock::new(|| format!("{VERSION} (git {GIT_SHA})"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_version_embeds_semver_and_git_label() {
        assert!(FULL_VERSION.starts_with(VERSION));
        assert!(FULL_VERSION.contains("(git "));
    }
}
