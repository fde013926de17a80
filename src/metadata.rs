//! Crate's build info metadata, courtesy of the `built` crate.
//! See more: [https://docs.rs/built/0.4.4/built/](https://docs.rs/built/0.4.4/built/)

#[allow(dead_code)]
pub mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Returns the crate's main package name.
pub fn package_name() -> &'static str {
    built_info::PKG_NAME
}

/// Returns the crate's full version.
pub fn full_version() -> &'static str {
    built_info::PKG_VERSION
}

/// Returns the `User-Agent` sent by clients that don't override it; ie: `stashcrab/0.1.0`.
pub fn default_user_agent() -> String {
    format!("{}/{}", package_name(), full_version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_carries_package_name_and_version() {
        assert_eq!(default_user_agent(), format!("stashcrab/{}", env!("CARGO_PKG_VERSION")));
    }
}
