#![no_main]

use libfuzzer_sys::fuzz_target;

use django_deployer::domain::value_objects::{expand_user, home_directory};

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let home = home_directory("deploy");
        let expanded = expand_user(path, &home);
        if !path.starts_with('~') {
            assert_eq!(expanded.as_str(), path);
        }
    }
});
