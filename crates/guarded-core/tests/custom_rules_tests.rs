use guarded_core::prelude::*;
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
struct Person {
    first_name: String,
    last_name: String,
    nickname: String,
}

impl Validate for Person {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .field("first_name", |p| &p.first_name, |r| {
                r.rule("isLongerThan", |args: &RuleArgs<'_, Person>| {
                    let related = args.related_property().unwrap_or_default();
                    let other = match related {
                        "last_name" => &args.object.last_name,
                        _ => return false,
                    };
                    args.value.as_str().is_some_and(|v| v.len() > other.len())
                })
                .args(["last_name"])
                .message("$property must be longer then $constraint1. Given value: $value")
            })
            .field("nickname", |p| &p.nickname, |r| {
                r.rule("differsFrom", |args: &RuleArgs<'_, Person>| {
                    args.value.as_str() != Some(args.object.first_name.as_str())
                })
                .context(json!({ "severity": "warning" }))
                .message_with(|args: &RuleArgs<'_, Person>| {
                    format!("{} repeats {}", args.property, args.object.first_name)
                })
            })
    }
}

impl Construct for Person {
    type Args = (String, String, String);

    fn construct((first_name, last_name, nickname): Self::Args) -> Self {
        Self {
            first_name,
            last_name,
            nickname,
        }
    }
}

#[test]
fn test_cross_field_rule_passes() {
    assert!(Guard::create_sync::<Person>(("Augusta".into(), "King".into(), "Ada".into())).is_ok());
}

#[test]
fn test_cross_field_rule_message_interpolates_arguments() {
    let error = Guard::create_sync::<Person>(("Li".into(), "Lovelace".into(), "Ada".into())).unwrap_err();

    assert_eq!(
        error.errors()[0].constraints.as_ref().unwrap()["isLongerThan"],
        "first_name must be longer then last_name. Given value: Li"
    );
}

#[test]
fn test_dynamic_message_and_context() {
    let error = Guard::create_sync::<Person>(("Augusta".into(), "King".into(), "Augusta".into())).unwrap_err();
    let node = error.field("nickname").unwrap();

    assert_eq!(node.constraints.as_ref().unwrap()["differsFrom"], "nickname repeats Augusta");
    assert_eq!(node.contexts.as_ref().unwrap()["differsFrom"], json!({ "severity": "warning" }));
}

#[test]
fn test_custom_rule_default_message_names_the_rule() {
    #[derive(Serialize)]
    struct Even {
        n: u32,
    }

    impl Validate for Even {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().field("n", |e| &e.n, |r| {
                r.rule("isEven", |args: &RuleArgs<'_, Even>| args.object.n % 2 == 0)
            })
        }
    }

    let errors = guarded_rules::validate_sync(&Even { n: 3 });
    assert_eq!(errors[0].constraints.as_ref().unwrap()["isEven"], "n failed the isEven rule");
    assert!(guarded_rules::validate_sync(&Even { n: 4 }).is_empty());
}

#[test]
fn test_equals_and_target_token() {
    #[derive(Serialize)]
    struct Consent {
        accepted: bool,
    }

    impl Validate for Consent {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().field("accepted", |c| &c.accepted, |r| {
                r.equals(true).message("$target.$property must be $constraint1")
            })
        }
    }

    let errors = guarded_rules::validate_sync(&Consent { accepted: false });
    assert_eq!(errors[0].constraints.as_ref().unwrap()["equals"], "Consent.accepted must be true");
}
