use rstest::rstest;
use xolir_txt::ast::{BuiltinType, TypeDefTarget, TypeTarget};
use xolir_txt::report::Summary;
use xolir_txt::{Error, ParseError, parse};

const EULER2: &str = include_str!("fixtures/euler2.xotxt");

#[test]
fn euler2_fixture_parses() {
    let program = parse(EULER2).expect("fixture parses");

    assert_eq!(program.name, "euler2");
    assert_eq!(program.ir_version, 1);
    assert_eq!(program.telc_version, 1);

    let type_names: Vec<_> = program.types.iter().map(|t| t.name()).collect();
    assert_eq!(type_names, ["Point", ""]);

    let TypeDefTarget::Struct(anon) = &program.types[1].target;
    assert!(anon.is_anonymous);
    assert_eq!(anon.fields[0].typ.target, TypeTarget::ById(0));

    let func_names: Vec<_> = program.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(func_names, ["main", "even_fib_sub"]);

    let fib = &program.funcs[1];
    let locals: Vec<_> = fib.locals.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(locals, ["sum", "first", "second", "new"]);
    assert_eq!(fib.locals[3].typ.target, TypeTarget::Builtin(BuiltinType::Bool));
    assert_eq!(
        fib.signature.results[0].target,
        TypeTarget::Builtin(BuiltinType::SInt64)
    );
}

#[test]
fn euler2_spans_point_back_into_the_text() {
    let program = parse(EULER2).unwrap();

    let root = program.pos.slice(EULER2).unwrap();
    assert!(root.starts_with("{ Program"));
    assert!(root.ends_with('}'));
    assert_eq!(program.pos.end(), EULER2.trim_end().len());

    for def in &program.types {
        assert!(def.pos.slice(EULER2).unwrap().starts_with("{ TypeDef"));
    }
    for func in &program.funcs {
        let text = func.pos.slice(EULER2).unwrap();
        assert!(text.starts_with("{ Function"));
        assert!(text.contains(&format!("\"{}\"", func.name)));
        for arg in &func.signature.args {
            assert!(arg.pos.slice(EULER2).unwrap().starts_with("{ TypedName"));
        }
    }
}

#[test]
fn euler2_is_deterministic() {
    assert_eq!(parse(EULER2).unwrap(), parse(EULER2).unwrap());
}

#[test]
fn euler2_summary() {
    let program = parse(EULER2).unwrap();
    let summary = Summary(&program).to_string();
    assert!(summary.starts_with("Successfully parsed program: euler2\n"));
    assert!(summary.ends_with("Types: 2\nFunctions: 2\n"));
}

#[rstest]
#[case::missing_value("{ Program program_name = }")]
#[case::unclosed_program("{ Program program_name = \"p\"")]
#[case::unknown_program_field("{ Program bogus_field = 1 }")]
#[case::unknown_struct_field(r#"{ Program types = [{ TypeDef target = #struct ({ StructType bogus_field = 1 }) }] }"#)]
#[case::unknown_builtin(r#"{ Program funcs = [{ Function typ = { FunctionType results = [{ TypeRef target = #builtin ({ BuiltinType %FLOAT }) }] } }] }"#)]
#[case::unknown_type_ref_target(r#"{ Program funcs = [{ Function typ = { FunctionType results = [{ TypeRef target = #ptr (1) }] } }] }"#)]
#[case::non_empty_code(r#"{ Program funcs = [{ Function typ = { FunctionType }, code = [ 1 ] }] }"#)]
#[case::missing_type_id(r#"{ Program funcs = [{ Function typ = { FunctionType args = [{ TypedName name = "a" }] } }] }"#)]
#[case::unclosed_list("{ Program types = [ }")]
#[case::second_program("{ Program } { Program }")]
fn malformed_input_is_a_parse_error(#[case] source: &str) {
    match parse(source) {
        Err(Error::Parse(err)) => {
            let pos = err.pos();
            assert!(pos.end() <= source.len(), "{err} out of bounds");
        }
        other => panic!("expected a parse error for {source:?}, got {other:?}"),
    }
}

#[rstest]
#[case("{ Program bogus_field = 1 }", "Program")]
#[case(r#"{ Program funcs = [{ Function bogus_field = 1 }] }"#, "Function")]
#[case(r#"{ Program funcs = [{ Function typ = { FunctionType bogus_field = [] } }] }"#, "FunctionType")]
#[case(r#"{ Program types = [{ TypeDef bogus_field = 1 }] }"#, "TypeDef")]
fn unknown_field_names_record_and_field(#[case] source: &str, #[case] record: &str) {
    let Err(Error::Parse(err)) = parse(source) else {
        panic!("expected a parse error for {source:?}");
    };
    assert!(matches!(&err, ParseError::UnknownField { field, .. } if field == "bogus_field"));
    let message = err.to_string();
    assert!(message.contains("\"bogus_field\""), "{message}");
    assert!(message.contains(record), "{message}");
}

#[rstest]
#[case("{ Program ; }", ';', 1, 11)]
#[case("{ Program\n  program_name = 'x' }", '\'', 2, 18)]
#[case("{\r\n  Program @ }", '@', 2, 11)]
fn lex_errors_carry_line_and_column(
    #[case] source: &str,
    #[case] ch: char,
    #[case] line: usize,
    #[case] column: usize,
) {
    let Err(Error::Lex(err)) = parse(source) else {
        panic!("expected a lex error for {source:?}");
    };
    let xolir_txt::LexError::UnexpectedChar {
        ch: found,
        line: found_line,
        column: found_column,
        ..
    } = err;
    assert_eq!((found, found_line, found_column), (ch, line, column));
}
