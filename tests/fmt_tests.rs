use typed_sexp::fmt::format_program;
use typed_sexp::{check_source, parse_source};

fn round_trip(input: &str) {
    let forms = parse_source(input).expect("parsing failed");
    let printed = format_program(&forms);
    let reparsed = parse_source(&printed).expect("reparsing failed");

    assert_eq!(forms.len(), reparsed.len());
    for (original, again) in forms.iter().zip(&reparsed) {
        assert!(
            original.same_structure(again),
            "round trip changed {original} into {again}"
        );
    }
}

#[test]
fn print_surface_syntax() {
    let forms = parse_source(r#"(f   "x"  [1 2.5]   ( g ))"#).unwrap();
    assert_eq!(forms[0].to_string(), r#"(f "x" [1 2.5] (g))"#);
}

#[test]
fn print_multiple_forms() {
    let forms = parse_source("(a)\n\n[b] c").unwrap();
    assert_eq!(format_program(&forms), "(a)\n[b]\nc");
}

#[test]
fn round_trip_simple() {
    round_trip("(+ 1 2)");
}

#[test]
fn round_trip_nested() {
    round_trip(r#"(map (fn [x] (str (+ x 1))) [1 2 3]) (.log console "hi") []"#);
}

#[test]
fn round_trip_drops_comments_and_spacing() {
    round_trip("( a ; note\n [ b\tc ] 0.5 )");
}

#[test]
fn print_typed_tree() {
    let forms = check_source("(+ 1 2)").unwrap();
    assert_eq!(
        forms[0].typed().to_string(),
        "(+:(Number, Number) -> Number 1:Number 2:Number):Number"
    );
}

#[test]
fn print_typed_function_skips_untyped_nodes() {
    let forms = check_source("(fn [x] x)").unwrap();
    assert_eq!(forms[0].typed().to_string(), "(fn [x] x:'t2):('t2) -> 't2");
}

#[test]
fn untyped_display_ignores_types() {
    let forms = check_source("[1 2]").unwrap();
    assert_eq!(forms[0].to_string(), "[1 2]");
}
