use exprule::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        evaluator::core::Context,
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            grammar::{ADD, ASSIGN, EXPONENT, Grammar, MULTIPLY, NUMBER, OPERAND},
            rule::{Rule, RuleOptions},
        },
    },
};

fn parse_word_mod(input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    let left = parser.parse(&input[..token.index])?;
    let right = parser.parse(&input[token.end()..])?;
    Ok(Expr::binary(left, BinaryOperator::Mod, right))
}

#[test]
fn default_grammar_order() {
    let grammar = Grammar::default();
    let names: Vec<&str> = grammar.rules().iter().map(|rule| rule.name.as_str()).collect();

    assert_eq!(names.len(), 21);
    assert_eq!(names[0], OPERAND);
    assert_eq!(names[20], NUMBER);
    assert!(grammar.position(ASSIGN) < grammar.position(ADD));
    assert!(grammar.position(ADD) < grammar.position(MULTIPLY));
    assert!(grammar.position(MULTIPLY) < grammar.position(EXPONENT));
    assert!(grammar.get(OPERAND).is_some_and(Rule::is_reference));
}

#[test]
fn removing_a_rule_disables_its_syntax() {
    let mut parser = Parser::new();
    assert_eq!(parser.parse("2^3").unwrap().to_string(), "2 ^ 3");

    assert!(parser.remove_grammar_rule(EXPONENT));
    assert!(!parser.grammar_contains(EXPONENT));
    assert!(!parser.remove_grammar_rule(EXPONENT));

    assert!(matches!(parser.parse("2^3"), Err(ParseError::SyntaxError { .. })));
}

#[test]
fn removing_by_index() {
    let mut parser = Parser::new();
    let last = parser.grammar().len() - 1;

    assert!(parser.remove_grammar_rule_at(last));
    assert!(!parser.grammar_contains(NUMBER));
    assert!(!parser.remove_grammar_rule_at(last));
    assert!(parser.parse("1").is_err());
}

#[test]
fn adding_an_operator_rule() {
    let mut parser = Parser::new();
    let index = parser.grammar().position(MULTIPLY).unwrap();
    let rule = Rule::operator("ModWord",
                              "mod",
                              RuleOptions::new().right_to_left().pad_references(),
                              parse_word_mod);

    assert!(parser.add_grammar_rule(rule.clone(), isize::try_from(index).unwrap()));
    assert!(!parser.add_grammar_rule(rule, -1));
    assert_eq!(parser.grammar().position("ModWord"), Some(index));

    let tree = parser.parse("7 mod 3").unwrap();
    assert_eq!(tree.to_string(), "7 %% 3");
    assert_eq!(tree.evaluate(&mut Context::new()).unwrap(), Expr::number(1.0));

    // Identifiers that merely contain the word are left alone.
    assert_eq!(parser.parse("modulus").unwrap(), Expr::variable("modulus"));
}

#[test]
fn negative_indices_count_from_the_end() {
    let mut parser = Parser::new();
    let len = parser.grammar().len();

    assert!(parser.add_grammar_rule(Rule::reference("Last", "x"), -1));
    assert_eq!(parser.grammar().position("Last"), Some(len));

    assert!(parser.add_grammar_rule(Rule::reference("BeforeLast", "y"), -2));
    assert_eq!(parser.grammar().position("BeforeLast"), Some(len));
    assert_eq!(parser.grammar().position("Last"), Some(len + 1));

    assert!(parser.add_grammar_rule(Rule::reference("First", "z"), -100));
    assert_eq!(parser.grammar().position("First"), Some(0));
}

#[test]
fn references_expand_recursively() {
    let grammar = Grammar::default();

    let operand = grammar.expand("{Operand}").unwrap();
    assert!(!operand.contains("{Prefix}"));
    assert!(grammar.regex(&format!("^(?:{operand})$"))
                   .is_some_and(|regex| regex.is_match("-x!") && regex.is_match("[3]")));
    assert!(grammar.regex("(unclosed").is_none());
}

#[test]
fn cache_normalizes_whitespace() {
    let mut parser = Parser::new();
    parser.parse("1 + 2").unwrap();

    assert!(parser.contains_cache("1+2"));
    assert!(parser.contains_cache("  1 +   2 "));
    assert!(parser.cache_keys().contains(&"1+2"));
    assert!(!parser.contains_cache("1+3"));
}

#[test]
fn cache_hands_out_copies() {
    let mut parser = Parser::new();
    let original = parser.parse("1+2").unwrap();

    let mut tree = parser.parse("1 + 2").unwrap();
    if let Expr::BinaryOp { left, .. } = &mut tree {
        **left = Expr::number(9.0);
    }

    assert_ne!(tree, original);
    assert_eq!(parser.parse("1+2").unwrap(), original);
}

#[test]
fn cache_can_be_edited() {
    let mut parser = Parser::new();

    assert!(parser.add_cache("answer", Expr::number(42.0)));
    assert!(!parser.add_cache("answer", Expr::number(41.0)));
    assert_eq!(parser.parse(" answer ").unwrap(), Expr::number(41.0));

    assert!(parser.remove_cache("answer"));
    assert!(!parser.remove_cache("answer"));
    assert_eq!(parser.parse("answer").unwrap(), Expr::variable("answer"));

    parser.clear_cache();
    assert!(parser.cache_keys().is_empty());
}

#[test]
fn grammar_changes_clear_the_cache() {
    let mut parser = Parser::new();
    parser.parse("1 + 2").unwrap();
    assert!(!parser.cache_keys().is_empty());

    assert!(parser.add_grammar_rule(Rule::reference("Digit", r"\d"), -1));
    assert!(parser.cache_keys().is_empty());

    parser.parse("1 + 2").unwrap();
    assert!(parser.remove_grammar_rule("Digit"));
    assert!(parser.cache_keys().is_empty());
}

#[test]
fn significant_whitespace_keeps_entries_apart() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("- -3").unwrap().to_string(), "-(-3)");
    assert!(parser.contains_cache("- -3"));
    assert!(!parser.contains_cache("--3"));
}

#[test]
fn nesting_is_bounded() {
    let mut parser = Parser::new().with_max_depth(3);

    assert_eq!(parser.max_depth(), 3);
    assert!(matches!(parser.parse("1+2+3+4"),
                     Err(ParseError::RecursionLimit { depth: 3, .. })));
    assert!(parser.parse("1+2").is_ok());

    let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    assert!(matches!(Parser::new().parse(&deep), Err(ParseError::RecursionLimit { .. })));
}

#[test]
fn operator_chains_spend_one_level_per_term() {
    let chain = |terms: usize| vec!["1"; terms].join("+");

    let tree = Parser::new().parse(&chain(200)).unwrap();
    assert_eq!(tree.evaluate(&mut Context::new()).unwrap(), Expr::number(200.0));

    assert!(matches!(Parser::new().parse(&chain(300)),
                     Err(ParseError::RecursionLimit { depth: 256, .. })));
}
