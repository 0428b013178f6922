//! Command behaviour over JSON files on disk

use predix_cli::commands::compose::compose_files;
use predix_cli::commands::eval::evaluate_file;
use predix_cli::commands::member::member_name_of_file;
use predix_cli::commands::read_lambda;
use predix_cli::CliError;
use predix_compose::{ComposeError, Connective};
use predix_eval::{EvalConfig, EvalError};
use predix_expr::{
    parameter_references, Expr, Lambda, MemberDescriptor, Parameter, Value, ValueType,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn age_of(p: &Parameter) -> Expr {
    let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
    Expr::member(Expr::parameter(p), age).unwrap()
}

fn person_lambda(name: &str, body: impl FnOnce(&Parameter) -> Expr) -> Lambda {
    let p = Parameter::new(name, ValueType::record("Person"));
    let body = body(&p);
    Lambda::new(vec![p], body).unwrap()
}

fn write(dir: &Path, file: &str, contents: &str) -> String {
    let path = dir.join(file);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn write_lambda(dir: &Path, file: &str, lambda: &Lambda) -> String {
    write(dir, file, &serde_json::to_string_pretty(lambda).unwrap())
}

#[test]
fn test_compose_three_files_left_to_right() {
    let dir = TempDir::new().unwrap();
    let a = person_lambda("p", |p| Expr::gt(age_of(p), Expr::int(18)).unwrap());
    let b = person_lambda("q", |q| Expr::lt(age_of(q), Expr::int(65)).unwrap());
    let c = person_lambda("r", |r| Expr::ge(age_of(r), Expr::int(21)).unwrap());
    let paths = vec![
        write_lambda(dir.path(), "a.json", &a),
        write_lambda(dir.path(), "b.json", &b),
        write_lambda(dir.path(), "c.json", &c),
    ];

    let composed = compose_files(&paths, Connective::AndAlso).unwrap();
    assert_eq!(
        composed.to_string(),
        "|p: Person| (((p.age > 18) && (p.age < 65)) && (p.age >= 21))"
    );
    assert!(parameter_references(composed.body())
        .iter()
        .all(|r| r.id == a.params()[0].id));
}

#[test]
fn test_compose_null_document() {
    let dir = TempDir::new().unwrap();
    let a = person_lambda("p", |p| Expr::gt(age_of(p), Expr::int(18)).unwrap());
    let paths = vec![
        write_lambda(dir.path(), "a.json", &a),
        write(dir.path(), "null.json", "null"),
    ];

    let err = compose_files(&paths, Connective::And).unwrap_err();
    assert!(matches!(
        err,
        CliError::Compose(ComposeError::NullExpression(ref path)) if path.ends_with("null.json")
    ));
}

#[test]
fn test_compose_arity_mismatch() {
    let dir = TempDir::new().unwrap();
    let a = person_lambda("p", |p| Expr::gt(age_of(p), Expr::int(18)).unwrap());
    let zero = Lambda::new(Vec::new(), Expr::bool(true)).unwrap();
    let paths = vec![
        write_lambda(dir.path(), "a.json", &a),
        write_lambda(dir.path(), "zero.json", &zero),
    ];

    assert!(matches!(
        compose_files(&paths, Connective::Or),
        Err(CliError::Compose(ComposeError::ArityMismatch { first: 1, second: 0 }))
    ));
}

#[test]
fn test_read_lambda_rejects_tampered_tree() {
    let dir = TempDir::new().unwrap();
    let a = person_lambda("p", |p| Expr::gt(age_of(p), Expr::int(18)).unwrap());
    let json = serde_json::to_string(&a).unwrap();
    let old_id = a.params()[0].id.to_string();
    let tampered = json.replacen(&old_id, &predix_expr::ParameterId::new().to_string(), 1);
    let path = write(dir.path(), "bad.json", &tampered);

    assert!(matches!(read_lambda(&path), Err(CliError::Expr(_))));
}

#[test]
fn test_read_lambda_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "bad.json", "{ not json");
    assert!(matches!(read_lambda(&path), Err(CliError::Serialization(_))));
}

#[test]
fn test_member_of_selector_file() {
    let dir = TempDir::new().unwrap();
    let selector = person_lambda("p", age_of);
    let path = write_lambda(dir.path(), "sel.json", &selector);
    assert_eq!(member_name_of_file(&path).unwrap(), "age");

    let null = write(dir.path(), "null.json", "null");
    assert!(matches!(
        member_name_of_file(&null),
        Err(CliError::Compose(ComposeError::NullExpression(_)))
    ));

    let comparison = person_lambda("p", |p| Expr::gt(age_of(p), Expr::int(5)).unwrap());
    let path = write_lambda(dir.path(), "cmp.json", &comparison);
    assert!(matches!(
        member_name_of_file(&path),
        Err(CliError::Compose(ComposeError::NotAMemberAccess(_)))
    ));
}

#[test]
fn test_evaluate_file_with_plain_json_arguments() {
    let dir = TempDir::new().unwrap();
    let adult = person_lambda("p", |p| Expr::ge(age_of(p), Expr::int(18)).unwrap());
    let path = write_lambda(dir.path(), "adult.json", &adult);
    let config = EvalConfig::default();

    assert_eq!(
        evaluate_file(&path, r#"[{"age": 30, "name": "Ann"}]"#, &config).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_file(&path, r#"[{"age": 3}]"#, &config).unwrap(),
        Value::Bool(false)
    );
    assert!(matches!(
        evaluate_file(&path, r#"[{"name": "Ann"}]"#, &config),
        Err(CliError::Eval(EvalError::UnknownMember(_)))
    ));
    assert!(matches!(
        evaluate_file(&path, r#"{"age": 3}"#, &config),
        Err(CliError::InvalidInput(_))
    ));
    assert!(matches!(
        evaluate_file(&path, "[]", &config),
        Err(CliError::InvalidInput(_))
    ));
}

#[test]
fn test_evaluate_respects_depth_limit() {
    let dir = TempDir::new().unwrap();
    let x = Parameter::new("x", ValueType::Int);
    let mut body = Expr::parameter(&x);
    for _ in 0..8 {
        body = Expr::binary(predix_expr::BinaryOp::Add, body, Expr::int(1)).unwrap();
    }
    let lambda = Lambda::new(vec![x], Expr::gt(body, Expr::int(0)).unwrap()).unwrap();
    let path = write_lambda(dir.path(), "deep.json", &lambda);

    let shallow = EvalConfig {
        max_depth: 4,
        trace_calls: false,
    };
    assert!(matches!(
        evaluate_file(&path, "[1]", &shallow),
        Err(CliError::Eval(EvalError::DepthExceeded(4)))
    ));
    assert_eq!(
        evaluate_file(&path, "[1]", &EvalConfig::default()).unwrap(),
        Value::Bool(true)
    );
}

fn demo(file: &str) -> String {
    format!("{}/../../demos/{}", env!("CARGO_MANIFEST_DIR"), file)
}

#[test]
fn test_demo_files() {
    let composed = compose_files(&[demo("adult.json"), demo("under_65.json")], Connective::AndAlso).unwrap();
    assert_eq!(composed.to_string(), "|p: Person| ((p.age >= 18) && (p.age < 65))");

    assert_eq!(member_name_of_file(&demo("age_selector.json")).unwrap(), "age");
    assert!(read_lambda(&demo("absent.json")).unwrap().is_none());
    assert_eq!(
        evaluate_file(&demo("adult.json"), r#"[{"age": 30}]"#, &EvalConfig::default()).unwrap(),
        Value::Bool(true)
    );
}
