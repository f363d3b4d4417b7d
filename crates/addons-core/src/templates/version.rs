//! Version comparison for CLI and setup compatibility

use semver::Version;

/// Compare the CLI version against the minimum a setup declares.
/// Returns a warning message if the CLI is older than the setup expects.
pub fn check_compatibility(
    cli_version: &str,
    min_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = Version::parse(cli_version).ok()?;
    // Tolerate a leading 'v' in hand-written template.yaml files
    let min_ver = Version::parse(min_version.strip_prefix('v').unwrap_or(min_version)).ok()?;

    if cli_ver < min_ver {
        Some(format!(
            "This setup was written for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            min_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}
