//! Free-form text lexer tests

use pathex::{scan, ErrorKind, TextTokenKind};

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(TextTokenKind, String)> {
        scan(text)
            .expect("text must scan")
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    #[test]
    fn splits_identifiers_literals_and_punctuators() {
        assert_eq!(
            kinds("foo = bar_2 + 10"),
            vec![
                (TextTokenKind::Identifier, "foo".to_string()),
                (TextTokenKind::Punctuator, "=".to_string()),
                (TextTokenKind::Identifier, "bar_2".to_string()),
                (TextTokenKind::Punctuator, "+".to_string()),
                (TextTokenKind::Literal, "10".to_string()),
            ]
        );
    }

    #[test]
    fn numerics_are_maximal_runs() {
        assert_eq!(
            kinds("3.14x"),
            vec![
                (TextTokenKind::Literal, "3.14".to_string()),
                (TextTokenKind::Identifier, "x".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_strings_retain_their_quotes() {
        assert_eq!(
            kinds("say 'a b' \"c\""),
            vec![
                (TextTokenKind::Identifier, "say".to_string()),
                (TextTokenKind::Literal, "'a b'".to_string()),
                (TextTokenKind::Literal, "\"c\"".to_string()),
            ]
        );
    }

    #[test]
    fn escaped_quotes_stay_inside_the_literal() {
        assert_eq!(
            kinds(r#""a\"b""#),
            vec![(TextTokenKind::Literal, r#""a\"b""#.to_string())]
        );
    }

    #[test]
    fn unknown_characters_are_lexical_errors() {
        let err = scan("a § b").expect_err("section sign must be rejected");
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    #[test]
    fn unterminated_strings_are_rejected() {
        assert!(scan("'open").is_err());
    }
}
