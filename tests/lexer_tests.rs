use typed_sexp::lexer::{LexError, Lexer, Span, Token, tokenize};

#[test]
fn lex_application() {
    let tokens = tokenize("(+ 1 2)").unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(matches!(tokens[0], Token::LParen(_)));
    assert!(matches!(&tokens[1], Token::Ident(i) if i.value == "+"));
    assert!(matches!(&tokens[2], Token::Number(n) if n.value == 1.0));
    assert!(matches!(&tokens[3], Token::Number(n) if n.value == 2.0));
    assert!(matches!(tokens[4], Token::RParen(_)));
}

#[test]
fn lex_brackets() {
    let tokens = tokenize("[a]").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(tokens[0], Token::LBracket(_)));
    assert!(matches!(&tokens[1], Token::Ident(i) if i.value == "a"));
    assert!(matches!(tokens[2], Token::RBracket(_)));
}

#[test]
fn lex_identifiers() {
    let tokens = tokenize("foo .log console.log a-b */ x2").unwrap();
    let names: Vec<_> = tokens
        .iter()
        .map(|t| match t {
            Token::Ident(i) => i.value.as_str(),
            other => panic!("expected identifier, got {}", other.describe()),
        })
        .collect();
    assert_eq!(names, ["foo", ".log", "console.log", "a-b", "*/", "x2"]);
}

#[test]
fn lex_numbers() {
    let tokens = tokenize("0 42 3.25").unwrap();
    assert!(matches!(&tokens[0], Token::Number(n) if n.value == 0.0));
    assert!(matches!(&tokens[1], Token::Number(n) if n.value == 42.0));
    assert!(matches!(&tokens[2], Token::Number(n) if n.value == 3.25));
}

#[test]
fn lex_string_payload_excludes_quotes() {
    let tokens = tokenize(r#""hello world" "a\n""#).unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::StringLiteral(s) if s.value == "hello world"));
    // no escape processing
    assert!(matches!(&tokens[1], Token::StringLiteral(s) if s.value == r"a\n"));
}

#[test]
fn lex_string_keeps_comment_marker() {
    let tokens = tokenize(r#"("a ; b")"#).unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[1], Token::StringLiteral(s) if s.value == "a ; b"));
}

#[test]
fn lex_spans_are_byte_offsets() {
    let tokens = tokenize(r#"(foo "bar" 12)"#).unwrap();
    assert_eq!(tokens[0].pos(), Span::new(0, 1));
    assert_eq!(tokens[1].pos(), Span::new(1, 4));
    assert_eq!(tokens[2].pos(), Span::new(5, 10));
    assert_eq!(tokens[3].pos(), Span::new(11, 13));
    assert_eq!(tokens[4].pos(), Span::new(13, 14));
}

#[test]
fn lex_empty_input() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   \n\t ").unwrap().is_empty());
}

#[test]
fn lex_unexpected_character() {
    let result = tokenize("(a # b)");
    assert_eq!(
        result,
        Err(LexError::UnexpectedCharacter {
            found: '#',
            span: Span::new(3, 4)
        })
    );
}

#[test]
fn lex_unterminated_string() {
    let result = tokenize(r#"(str "abc)"#);
    assert!(matches!(result, Err(LexError::UnterminatedString { .. })));
}

#[test]
fn lex_invalid_number() {
    let result = tokenize("(+ 12ab 1)");
    assert!(matches!(
        result,
        Err(LexError::InvalidNumber { text, .. }) if text == "12ab"
    ));
}

#[test]
fn lexer_is_lazy() {
    let mut lexer = Lexer::new("(a) #");
    assert!(matches!(lexer.next(), Some(Ok(Token::LParen(_)))));
    assert!(matches!(lexer.next(), Some(Ok(Token::Ident(_)))));
    assert!(matches!(lexer.next(), Some(Ok(Token::RParen(_)))));
    assert!(matches!(lexer.next(), Some(Err(_))));
    assert!(lexer.next().is_none());
}

#[test]
fn lexer_restarts_from_scratch() {
    let source = "(+ 1 2)";
    let first: Vec<_> = Lexer::new(source).collect();
    let second: Vec<_> = Lexer::new(source).collect();
    assert_eq!(first, second);
}
