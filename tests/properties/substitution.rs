//! Property tests for line-wise regex substitution.

use proptest::prelude::*;
use regex::Regex;

use django_deployer::domain::entities::substitute_lines;

fn line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9 =_\\[\\]\"'.,]{0,40}").unwrap()
}

fn content() -> impl Strategy<Value = (Vec<String>, bool)> {
    (proptest::collection::vec(line(), 0..12), any::<bool>())
}

fn render(lines: &[String], crlf: bool) -> String {
    let ending = if crlf { "\r\n" } else { "\n" };
    lines.iter().map(|l| format!("{}{}", l, ending)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a pattern that cannot match leaves the content byte-identical.
    #[test]
    fn property_no_match_is_identity((lines, crlf) in content()) {
        let text = render(&lines, crlf);
        let regex = Regex::new("#never#").unwrap();
        prop_assert_eq!(substitute_lines(&text, &regex, "x"), text);
    }

    /// PROPERTY: substitution keeps the line count and line endings.
    #[test]
    fn property_line_structure_preserved((lines, crlf) in content()) {
        let text = render(&lines, crlf);
        let regex = Regex::new("DEBUG = True").unwrap();
        let out = substitute_lines(&text, &regex, "DEBUG = False");

        prop_assert_eq!(out.matches('\n').count(), text.matches('\n').count());
        prop_assert_eq!(out.matches("\r\n").count(), text.matches("\r\n").count());
    }

    /// PROPERTY: an end-anchored pattern rewrites only the matching lines.
    #[test]
    fn property_anchor_is_per_line(
        (lines, crlf) in content(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut lines = lines;
        let at = position.index(lines.len() + 1);
        lines.insert(at, "ALLOWED_HOSTS = []".to_string());
        let text = render(&lines, crlf);

        let regex = Regex::new("ALLOWED_HOSTS =.+$").unwrap();
        let out = substitute_lines(&text, &regex, r#"ALLOWED_HOSTS = ["example.com"]"#);

        let out_lines: Vec<&str> = out.lines().collect();
        prop_assert_eq!(out_lines.len(), lines.len());
        for (before, after) in lines.iter().zip(out_lines) {
            if before == "ALLOWED_HOSTS = []" {
                prop_assert_eq!(after, r#"ALLOWED_HOSTS = ["example.com"]"#);
            } else {
                prop_assert_eq!(after, before.as_str());
            }
        }
    }
}
