//! Integration tests for common fieldcheck workflows.
//!
//! A request body is validated field by field, the way a handler would.

use fieldcheck::prelude::*;

fn request() -> Value {
    json!({
        "num": 42,
        "text": "abc",
        "email": "nullcc@gmail.com",
        "mac": "80:80:fe:1a:08:13",
        "url": "http://www.google.com",
        "uuid": "550E8400-E29B-11D4-A716-446655440000",
        "name": "nullcc",
        "age": 28,
    })
}

// =============================================================================
// Well-typed input
// =============================================================================

#[test]
fn test_full_request_returns_values_unchanged() {
    let data = request();

    let num = RequestValidator::new(&data, "num")
        .presence(DataRequired::new())
        .coerce(to_integer)
        .rule(GreaterThan::new(10))
        .run()
        .unwrap();

    let text = RequestValidator::new(&data, "text")
        .presence(DataRequired::new().with_message("text is required"))
        .coerce(to_string)
        .rule(EqualTo::new("abc").with_message("text must be equal to abc"))
        .run()
        .unwrap();

    let email = RequestValidator::new(&data, "email")
        .presence(DataRequired::new().with_message("email is required"))
        .coerce(to_string)
        .rule(Regexp::email())
        .run()
        .unwrap();

    let mac = RequestValidator::new(&data, "mac")
        .presence(DataRequired::new().with_message("mac address is required"))
        .coerce(to_string)
        .rule(Regexp::mac_address())
        .run()
        .unwrap();

    let url = RequestValidator::new(&data, "url")
        .presence(DataRequired::new().with_message("url is required"))
        .coerce(to_string)
        .rule(Regexp::url())
        .run()
        .unwrap();

    let uuid = RequestValidator::new(&data, "uuid")
        .presence(DataRequired::new().with_message("uuid is required"))
        .coerce(to_string)
        .rule(Regexp::uuid())
        .run()
        .unwrap();

    let name = RequestValidator::new(&data, "name")
        .presence(DataRequired::new().with_message("name is required"))
        .coerce(to_string)
        .rule(Length::between(6, 10))
        .run()
        .unwrap();

    let age = RequestValidator::new(&data, "age")
        .presence(DataRequired::new().with_message("age is required"))
        .coerce(to_integer)
        .rule(NumberRange::between(1, 99))
        .run()
        .unwrap();

    assert_eq!(num, 42);
    assert_eq!(text, "abc");
    assert_eq!(email, "nullcc@gmail.com");
    assert_eq!(mac, "80:80:fe:1a:08:13");
    assert_eq!(url, "http://www.google.com");
    assert_eq!(uuid, "550E8400-E29B-11D4-A716-446655440000");
    assert_eq!(name, "nullcc");
    assert_eq!(age, 28);

    // The record is never modified.
    assert_eq!(data, request());
}

// =============================================================================
// Form-style string input
// =============================================================================

#[test]
fn test_string_fields_are_coerced_before_rules() {
    let form = json!({"qty": "3", "price": "9.50", "code": 1234});

    let qty = RequestValidator::new(&form, "qty")
        .presence(DataRequired::new())
        .coerce(to_integer)
        .rule(GreaterThanOrEqualTo::new(1))
        .rule(LessThanOrEqualTo::new(10))
        .run()
        .unwrap();
    let price = RequestValidator::new(&form, "price")
        .coerce(to_float)
        .rule(NumberRange::at_least(0))
        .run()
        .unwrap();
    let code = RequestValidator::new(&form, "code")
        .coerce(to_string)
        .rule(Length::between(4, 4))
        .run()
        .unwrap();

    assert_eq!(qty, 3);
    assert_eq!(price, 9.5);
    assert_eq!(code, "1234");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_each_stage_reports_its_own_error() {
    let form = json!({"age": "", "num": "many", "name": "ab"});

    let presence = RequestValidator::new(&form, "age")
        .presence(DataRequired::new())
        .coerce(to_integer)
        .run()
        .unwrap_err();
    assert_eq!(presence.to_string(), "age is required");

    let coercion = RequestValidator::new(&form, "num")
        .presence(DataRequired::new())
        .coerce(to_integer)
        .run()
        .unwrap_err();
    assert!(matches!(coercion, FieldError::Coercion(_)));

    let rule = RequestValidator::new(&form, "name")
        .coerce(to_string)
        .rule(Length::between(6, 10))
        .run()
        .unwrap_err();
    assert_eq!(
        rule.as_validation().map(|e| e.message.as_str()),
        Some("length of name should not be less than 6")
    );
}

#[test]
fn test_caller_aggregates_across_fields() {
    let form = json!({"email": "a@.com", "age": 0});

    let pipelines = [
        RequestValidator::new(&form, "email")
            .presence(DataRequired::new())
            .coerce(to_string)
            .rule(Regexp::email()),
        RequestValidator::new(&form, "age")
            .presence(KeyRequired::new())
            .coerce(to_integer)
            .rule(NumberRange::between(1, 99)),
    ];

    let messages: Vec<String> = pipelines
        .iter()
        .filter_map(|pipeline| pipeline.run().err())
        .map(|e| e.to_string())
        .collect();
    assert_eq!(messages, vec!["Invalid email address.", "age should not be less than 1"]);
}

// =============================================================================
// Settings & logging
// =============================================================================

#[cfg(feature = "config")]
#[test]
fn test_settings_drive_presence_policy() {
    let settings = fieldcheck::SettingsLoader::new()
        .with_pairs([("presence_policy", "key_exists")])
        .build()
        .unwrap();

    let form = json!({"retries": 0});
    let retries = RequestValidator::with_settings(&form, "retries", &settings)
        .coerce(to_integer)
        .rule(NumberRange::between(0, 5))
        .run()
        .unwrap();
    assert_eq!(retries, 0);

    let pattern = Regexp::from_settings(r"[a-z]+", RegexFlags::NONE, &settings).unwrap();
    assert!(pattern.evaluate("slug", &json!("hello-world")).is_ok());
}

#[test]
fn test_logging_does_not_change_results() {
    fieldcheck::log::set_level(fieldcheck::log::Level::Trace);

    let data = json!({"n": "x"});
    let result = RequestValidator::new(&data, "n")
        .presence(DataRequired::new())
        .coerce(to_integer)
        .run();
    assert!(matches!(result, Err(FieldError::Coercion(_))));

    fieldcheck::log::set_level(fieldcheck::log::Level::Off);
    assert!(!fieldcheck::log::is_level_enabled(fieldcheck::log::Level::Error));
}
