use futures::FutureExt;
use guarded_core::prelude::*;
use guarded_rules::Pending;
use guarded_test_utils::{LateProfile, Tag};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct Upload {
    title: String,
    checksum: Pending<String>,
    preview: Option<Pending<Tag>>,
}

impl Validate for Upload {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .field("title", |u| &u.title, |r| r.is_not_empty())
            .awaited("checksum", |u| &u.checksum, |r| r.min_length(8).max_length(8))
            .awaited("preview", |u| &u.preview, |r| r.nested())
    }
}

impl Construct for Upload {
    type Args = (String, Pending<String>, Option<Pending<Tag>>);

    fn construct((title, checksum, preview): Self::Args) -> Self {
        Self {
            title,
            checksum,
            preview,
        }
    }
}

fn later<T>(value: T) -> Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    Pending::new(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        value
    })
}

#[test]
fn test_sync_path_defers_even_for_invalid_fields() {
    let upload = Guard::create_sync::<Upload>((String::new(), Pending::ready("short".into()), None)).unwrap();
    assert_eq!(upload.title, "");

    let wrapped = Guarded::<Upload>::new((String::new(), Pending::ready("short".into()), None)).unwrap();
    assert!(wrapped.is_deferred());
}

#[tokio::test]
async fn test_async_path_resolves_then_validates() {
    let args = (String::new(), later("short".to_string()), Some(later(Tag::new("x", "y"))));
    let error = Guard::create::<Upload>(args).await.unwrap_err();

    let fields: Vec<_> = error.errors().iter().map(|n| n.property.as_str()).collect();
    assert_eq!(fields, vec!["title", "checksum", "preview"]);

    let checksum = error.field("checksum").unwrap();
    assert_eq!(checksum.value, Some(json!("short")));
    assert_eq!(checksum.constraint_names(), vec!["minLength"]);

    let preview = error.field("preview").unwrap();
    assert_eq!(preview.value, Some(json!({ "name": "x", "url": "y" })));
    let nested: Vec<_> = preview.children.iter().map(|n| n.property.as_str()).collect();
    assert_eq!(nested, vec!["name", "url"]);
}

#[tokio::test]
async fn test_async_path_passes_resolved_valid_values() {
    let args = ("report".to_string(), later("abcd1234".to_string()), None);
    let upload = Guard::create::<Upload>(args).await.unwrap();

    assert_eq!(upload.checksum.peek(), Some(&"abcd1234".to_string()));
}

#[tokio::test]
async fn test_async_outcome_matches_sync_on_resolved_values() {
    #[derive(Debug, Serialize)]
    struct Resolved {
        title: String,
        checksum: String,
    }

    impl Validate for Resolved {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new()
                .field("title", |u| &u.title, |r| r.is_not_empty())
                .field("checksum", |u| &u.checksum, |r| r.min_length(8).max_length(8))
        }
    }

    for (title, checksum) in [("", "abcd1234"), ("a", "abc"), ("a", "abcd1234"), ("", "")] {
        let deferred = Guard::create::<Upload>((title.into(), later(checksum.to_string()), None)).await;
        let resolved = guarded_rules::validate_sync(&Resolved {
            title: title.into(),
            checksum: checksum.into(),
        });

        match deferred {
            Ok(_) => assert!(resolved.is_empty()),
            Err(error) => {
                let failed: Vec<_> = error.errors().iter().map(|n| n.property.clone()).collect();
                let expected: Vec<_> = resolved.iter().map(|e| e.property.clone()).collect();
                assert_eq!(failed, expected);
            }
        }
    }
}

#[tokio::test]
async fn test_resolved_pending_values_are_shared() {
    let name = later("Grace Hopper".to_string());
    let profile = Guard::create::<LateProfile>((name.clone(),)).await.unwrap();

    assert!(name.is_resolved());
    assert_eq!(profile.name.peek(), name.peek());
}

#[tokio::test]
async fn test_async_rules_are_awaited_only_on_the_async_path() {
    #[derive(Debug, Serialize)]
    struct Username {
        value: String,
    }

    impl Validate for Username {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().field("value", |u| &u.value, |r| {
                r.async_rule("isAvailable", |args| {
                    let taken = args.value == &json!("admin");
                    async move {
                        tokio::time::sleep(Duration::from_millis(1)).await;
                        !taken
                    }
                    .boxed()
                })
                .message("$value is taken")
            })
        }
    }

    impl Construct for Username {
        type Args = (String,);

        fn construct((value,): Self::Args) -> Self {
            Self { value }
        }
    }

    assert!(Guard::create_sync::<Username>(("admin".into(),)).is_ok());

    let error = Guard::create::<Username>(("admin".into(),)).await.unwrap_err();
    assert_eq!(error.errors()[0].constraints.as_ref().unwrap()["isAvailable"], "admin is taken");
    assert!(Guard::create::<Username>(("ada".into(),)).await.is_ok());
}

#[tokio::test]
async fn test_absent_optional_pending_is_validated_synchronously() {
    #[derive(Debug, Serialize)]
    struct Avatar {
        image: Option<Pending<String>>,
    }

    impl Validate for Avatar {
        fn schema() -> Schema<Self> {
            Schema::<Self>::new().awaited("image", |a| &a.image, |r| r.is_defined())
        }
    }

    let missing = Avatar { image: None };
    let errors = guarded_rules::validate_sync(&missing);
    assert_eq!(errors[0].constraints.as_ref().unwrap().keys().collect::<Vec<_>>(), vec!["isDefined"]);

    let present = Avatar {
        image: Some(later("me.png".to_string())),
    };
    assert!(guarded_rules::validate_sync(&present).is_empty());
    assert!(guarded_rules::validate(&present).await.is_empty());
}
