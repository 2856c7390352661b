//! Property tests for remote path joining, `~` expansion and quoting.

use std::process::Command;

use proptest::prelude::*;

use django_deployer::domain::value_objects::{
    expand_user, home_directory, join, shell_quote, DeploymentLayout, RemotePath,
};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,16}").unwrap()
}

fn relative_suffix() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 0..=4).prop_map(|segments| segments.join("/"))
}

fn user_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_][a-z0-9_-]{0,15}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: joining is plain concatenation with `/`, no normalisation.
    #[test]
    fn property_join_is_textual(
        segments in proptest::collection::vec("[A-Za-z0-9./_~-]{0,12}", 1..6)
    ) {
        let joined = join(&segments);
        prop_assert_eq!(joined, segments.join("/"));
    }

    /// PROPERTY: `RemotePath::join` agrees with the free function.
    #[test]
    fn property_path_join_matches_join(base in "/[a-z/]{0,20}", child in segment()) {
        let path = RemotePath::new(base.clone()).join(&child);
        prop_assert_eq!(path.as_str(), join(&[base.as_str(), child.as_str()]));
    }

    /// PROPERTY: `~/x` expands to `<home>/x`; `~` to the home itself.
    #[test]
    fn property_tilde_expands_to_home(user in user_name(), suffix in relative_suffix()) {
        let home = home_directory(&user);
        let tilde = if suffix.is_empty() { "~".to_string() } else { format!("~/{}", suffix) };

        let expanded = expand_user(&tilde, &home);

        let expected = if suffix.is_empty() {
            home.to_string()
        } else {
            format!("{}/{}", home, suffix)
        };
        prop_assert_eq!(expanded.as_str(), expected.as_str());
        prop_assert!(expanded.is_absolute());
    }

    /// PROPERTY: paths not starting with `~` pass through unchanged.
    #[test]
    fn property_non_tilde_unchanged(
        path in proptest::string::string_regex("[A-Za-z0-9./_~-]{0,64}")
            .unwrap()
            .prop_filter("must not start with ~", |s| !s.starts_with('~'))
    ) {
        let home = home_directory("deploy");
        let expanded = expand_user(&path, &home);
        prop_assert_eq!(expanded.as_str(), path.as_str());
    }

    /// PROPERTY: every layout directory sits under the project directory.
    #[test]
    fn property_layout_directories_under_project(
        user in user_name(),
        site in "[a-z0-9.-]{1,24}",
        project in "[a-z_]{1,12}",
    ) {
        let layout = DeploymentLayout::new("~/sites", home_directory(&user), &site, &project);
        let directories = layout.directories();

        prop_assert_eq!(directories.len(), 4);
        prop_assert_eq!(&directories[0], layout.project());
        for dir in &directories[1..] {
            let prefix = format!("{}/", layout.project());
            prop_assert!(dir.as_str().starts_with(&prefix));
        }
        let package_prefix = format!("{}/", layout.source());
        prop_assert!(layout.project_package().as_str().starts_with(&package_prefix));
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a quoted value reaches `sh` as exactly one unchanged word.
    #[cfg(unix)]
    #[test]
    fn property_shell_quote_round_trips_through_sh(value in "[ -~]{0,40}") {
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("printf '%s' {}", shell_quote(&value)))
            .output()
            .unwrap();
        prop_assert!(output.status.success());
        prop_assert_eq!(String::from_utf8_lossy(&output.stdout).into_owned(), value);
    }
}
