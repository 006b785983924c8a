use proptest::prelude::*;
use xolir_txt::{LexError, TokenKind, parse, tokenize};

// Mostly characters the lexer accepts. A slash or backslash only lexes inside a comment or string.
const ALPHABET: &str = "[{}\\[\\](),=#%\" \t\n\\\\/a-zA-Z0-9_é]{0,64}";

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn ends_in_exactly_one_empty_eof(s in ALPHABET) {
        if let Ok(tokens) = tokenize(&s) {
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1);
            let last = tokens.last().unwrap();
            prop_assert_eq!(last.kind, TokenKind::Eof);
            prop_assert_eq!(last.pos.length, 0);
            prop_assert_eq!(last.pos.start, s.len());
        }
    }

    #[test]
    fn spans_match_text_and_are_contiguous(s in ALPHABET) {
        match tokenize(&s) {
            Ok(tokens) => {
                let mut expected_start = 0;
                for token in &tokens {
                    prop_assert_eq!(token.pos.start, expected_start, "gap before {:?} in {:?}", token, s);
                    prop_assert_eq!(token.pos.slice(&s), Some(token.text));
                    expected_start = token.pos.end();
                }
                prop_assert_eq!(expected_start, s.len());
            }
            Err(LexError::UnexpectedChar { ch, pos, .. }) => {
                prop_assert!(ch == '/' || ch == '\\', "unexpected {:?} in {:?}", ch, s);
                let expected = ch.to_string();
                prop_assert_eq!(pos.slice(&s), Some(expected.as_str()));
            }
        }
    }

    #[test]
    fn arbitrary_input_never_panics(s in ".*") {
        let _ = tokenize(&s);
        let _ = parse(&s);
    }

    #[test]
    fn whitespace_never_changes_the_tree(pad in "[ \t\n]{1,8}") {
        let tight = r#"{Program program_name="p",types=[],funcs=[]}"#;
        let loose = format!("{pad}{{{pad}Program{pad}program_name{pad}={pad}\"p\"{pad},types=[{pad}]{pad},funcs=[]{pad}}}{pad}");
        let a = parse(tight).unwrap();
        let b = parse(&loose).unwrap();
        prop_assert_eq!(a.name, b.name);
        prop_assert_eq!(a.types, b.types);
        prop_assert_eq!(a.funcs, b.funcs);
    }
}
