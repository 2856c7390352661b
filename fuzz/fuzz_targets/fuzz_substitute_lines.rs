#![no_main]

use libfuzzer_sys::fuzz_target;
use regex::Regex;

use django_deployer::domain::entities::substitute_lines;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let regex = Regex::new("ALLOWED_HOSTS =.+$").unwrap();
        let out = substitute_lines(content, &regex, r#"ALLOWED_HOSTS = ["example.com"]"#);
        assert_eq!(out.matches('\n').count(), content.matches('\n').count());
    }
});
