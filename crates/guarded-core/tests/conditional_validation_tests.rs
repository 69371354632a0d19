use guarded_core::prelude::*;
use guarded_core::GuardFactory;
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Shipment {
    express: bool,
    courier: Option<String>,
    note: Option<String>,
    weight: Option<f64>,
}

impl Validate for Shipment {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .field("courier", |s| &s.courier, |r| {
                r.validate_if(|s: &Shipment| s.express)
                    .is_defined()
                    .min_length(3)
            })
            .field("note", |s| &s.note, |r| r.optional().max_length(10))
            .field("weight", |s| &s.weight, |r| r.min(0.1).max(30.0))
    }
}

impl Construct for Shipment {
    type Args = (bool, Option<String>, Option<String>, Option<f64>);

    fn construct((express, courier, note, weight): Self::Args) -> Self {
        Self {
            express,
            courier,
            note,
            weight,
        }
    }
}

fn fields(error: &GuardedConstructionError) -> Vec<&str> {
    error.errors().iter().map(|n| n.property.as_str()).collect()
}

#[test]
fn test_condition_false_skips_the_field() {
    assert!(Guard::create_sync::<Shipment>((false, None, None, Some(2.0))).is_ok());
}

#[test]
fn test_condition_true_applies_every_rule() {
    let error = Guard::create_sync::<Shipment>((true, None, None, Some(2.0))).unwrap_err();
    assert_eq!(fields(&error), vec!["courier"]);
    assert_eq!(error.errors()[0].constraint_names(), vec!["isDefined", "minLength"]);
}

#[test]
fn test_optional_field_only_checked_when_present() {
    assert!(Guard::create_sync::<Shipment>((false, None, None, Some(1.0))).is_ok());

    let error = Guard::create_sync::<Shipment>((false, None, Some("a very long note".into()), Some(1.0))).unwrap_err();
    assert_eq!(fields(&error), vec!["note"]);
}

#[test]
fn test_missing_value_fails_non_optional_rules() {
    let error = Guard::create_sync::<Shipment>((false, None, None, None)).unwrap_err();
    assert_eq!(error.errors()[0].constraint_names(), vec!["min", "max"]);
}

#[test]
fn test_skip_missing_properties_option() {
    let factory: GuardFactory = Guard::with_options(ValidatorOptions::new().with_skip_missing_properties(true));

    assert!(factory.create_sync::<Shipment>((false, None, None, None)).is_ok());

    let error = factory.create_sync::<Shipment>((true, None, None, None)).unwrap_err();
    assert_eq!(error.errors()[0].constraint_names(), vec!["isDefined"]);
}

#[test]
fn test_stop_at_first_error_option() {
    let options = ValidatorOptions::new().with_stop_at_first_error(true);
    let error = Guard::with_options(options)
        .create_sync::<Shipment>((true, None, None, None))
        .unwrap_err();

    assert_eq!(fields(&error), vec!["courier", "weight"]);
    for node in error.errors() {
        assert_eq!(node.constraint_names().len(), 1);
    }
}

#[test]
fn test_options_loaded_from_json_config() {
    let options: ValidatorOptions = serde_json::from_str(
        r#"{ "dismiss_default_messages": true, "validation_error": { "target": false } }"#,
    )
    .unwrap();
    let error = Guard::with_options(options)
        .create_sync::<Shipment>((false, None, None, Some(99.0)))
        .unwrap_err();

    let node = &error.errors()[0];
    assert!(node.target.is_none());
    assert!(node.value.is_some());
    assert_eq!(node.constraints.as_ref().unwrap()["max"], "");
}

#[test]
fn test_custom_messages_survive_dismissed_defaults() {
    #[derive(Serialize)]
    struct Pin {
        code: String,
    }

    impl Validate for Pin {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().field("code", |p| &p.code, |r| {
                r.min_length(4)
                    .message("$property needs $constraint1 digits, got '$value'")
                    .max_length(6)
            })
        }
    }

    let validator = Validator::new(ValidatorOptions::new().with_dismiss_default_messages(true));
    let errors = validator.validate_sync(&Pin { code: "12".into() });
    assert_eq!(
        errors[0].constraints.as_ref().unwrap()["minLength"],
        "code needs 4 digits, got '12'"
    );

    let errors = validator.validate_sync(&Pin { code: "1234567".into() });
    assert_eq!(errors[0].constraints.as_ref().unwrap()["maxLength"], "");
}

#[derive(Serialize)]
struct Referral {
    code: Option<String>,
}

impl Validate for Referral {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new().field("code", |r| &r.code, |r| r.optional().is_defined().min_length(6))
    }
}

#[test]
fn test_optional_missing_value_skips_is_defined_too() {
    assert!(guarded_rules::validate_sync(&Referral { code: None }).is_empty());

    let errors = guarded_rules::validate_sync(&Referral { code: Some("abc".into()) });
    assert_eq!(errors[0].constraints.as_ref().unwrap().keys().collect::<Vec<_>>(), vec!["minLength"]);
}

#[test]
fn test_skip_missing_properties_still_checks_is_defined() {
    #[derive(Serialize)]
    struct Invite {
        code: Option<String>,
    }

    impl Validate for Invite {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().field("code", |i| &i.code, |r| r.is_defined().min_length(6))
        }
    }

    let validator = Validator::new(ValidatorOptions::new().with_skip_missing_properties(true));
    let errors = validator.validate_sync(&Invite { code: None });
    assert_eq!(errors[0].constraints.as_ref().unwrap().keys().collect::<Vec<_>>(), vec!["isDefined"]);
}
