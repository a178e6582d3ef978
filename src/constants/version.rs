use semver::Version;

/// Set by the release pipeline; absent for local builds.
const GIT_SHA: Option<&str> = option_env!("GIT_SHA");

pub fn get_version() -> String {
    let semver = env!("CARGO_PKG_VERSION").parse::<Version>();

    match (semver, GIT_SHA) {
        (Ok(semver), Some(sha)) if !sha.is_empty() => format!("{semver} ({sha})"),
        (Ok(semver), _) => semver.to_string(),
        (Err(_), _) => {
            tracing::warn!("couldn't parse a semver out of Cargo.toml? defaulting to 0.0.0-unknown.");
            String::from("0.0.0-unknown")
        }
    }
}
