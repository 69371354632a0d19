use guarded_core::prelude::*;
use guarded_core::ViolationNode;
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct Named {
    name: String,
}

impl Validate for Named {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new().field("name", |n| &n.name, |r| r.min_length(5))
    }
}

#[derive(Debug, Clone, Serialize)]
struct Employee {
    #[serde(flatten)]
    base: Named,
    title: String,
    email: String,
}

impl Validate for Employee {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .inherit(|e| &e.base)
            .field("title", |e| &e.title, |r| r.min_length(2))
            .field("email", |e| &e.email, |r| r.is_email())
    }
}

impl Construct for Employee {
    type Args = (String, String, String);

    fn construct((name, title, email): Self::Args) -> Self {
        Self {
            base: Named { name },
            title,
            email,
        }
    }
}

fn properties(nodes: &[ViolationNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.property.as_str()).collect()
}

fn invalid_args() -> (String, String, String) {
    ("Ada".into(), "x".into(), "ada".into())
}

#[test]
fn test_base_fields_are_reported_at_the_inherit_position() {
    let error = Guard::create_sync::<Employee>(invalid_args()).unwrap_err();
    assert_eq!(properties(error.errors()), vec!["name", "title", "email"]);
}

#[test]
fn test_inherited_fields_target_the_composite_record() {
    let error = Guard::create_sync::<Employee>(invalid_args()).unwrap_err();
    let target = error.errors()[0].target.as_ref().unwrap();

    assert!(target.is::<Employee>());
    assert_eq!(target.type_name(), "Employee");
    assert_eq!(target.snapshot()["name"], "Ada");
}

#[tokio::test]
async fn test_order_is_the_same_on_every_entry_path() {
    let wrapped = Guarded::<Employee>::new(invalid_args()).unwrap_err();
    let factory_sync = Guard::create_sync::<Employee>(invalid_args()).unwrap_err();
    let factory_async = Guard::create::<Employee>(invalid_args()).await.unwrap_err();

    assert_eq!(properties(wrapped.errors()), properties(factory_sync.errors()));
    assert_eq!(properties(factory_async.errors()), properties(factory_sync.errors()));
}

#[test]
fn test_guarded_records_nest_like_plain_records() {
    #[derive(Serialize)]
    struct Team {
        lead: Guarded<Employee>,
    }

    impl Validate for Team {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().field("lead", |t| &t.lead, |r| r.nested())
        }
    }

    let lead = Guarded::<Employee>::new(("Grace Hopper".into(), "RADM".into(), "grace@navy.mil".into())).unwrap();
    let mut team = Team { lead };
    assert!(guarded_rules::validate_sync(&team).is_empty());

    let mut broken = team.lead.clone().into_inner();
    broken.email = "nope".into();
    team.lead = guarded::<Employee>()
        .engine(AlwaysPass)
        .construct((broken.base.name, broken.title, broken.email))
        .unwrap();

    let errors = guarded_rules::validate_sync(&team);
    assert_eq!(errors[0].property, "lead");
    assert_eq!(errors[0].children[0].property, "email");
    assert!(errors[0].children[0].target.as_ref().unwrap().is::<Employee>());
}

/// Rule engine that never reports anything
struct AlwaysPass;

#[async_trait::async_trait]
impl guarded_core::RuleEngine for AlwaysPass {
    fn evaluate_sync<T: Validate>(&self, _: &T) -> Vec<ValidationError> {
        Vec::new()
    }

    async fn evaluate_async<T: Validate>(&self, _: &T) -> Vec<ValidationError> {
        Vec::new()
    }
}
