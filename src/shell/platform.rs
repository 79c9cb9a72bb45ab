//! Platform detection.

/// Environment variables that CI providers export.
pub const CI_ENV_VARS: [&str; 6] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()` and to run commands
/// through a non-interactive login shell.
pub fn is_ci() -> bool {
    is_ci_with(|key: &str| std::env::var(key))
}

/// [`is_ci`] with a custom env var lookup function.
pub fn is_ci_with<F>(env_fn: F) -> bool
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    CI_ENV_VARS.iter().any(|key| env_fn(key).is_ok())
}
