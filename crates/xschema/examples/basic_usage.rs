//! Basic usage example for xschema

use serde_json::json;
use xschema::prelude::*;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    // Rule sets validate dynamic values
    let username = StringRules::new()
        .required()
        .alphanum()
        .min(3)
        .message(StringRule::Alphanum, "letters and digits only");

    for candidate in [json!("alice"), json!("a!"), json!(42)] {
        match username.validate(&candidate) {
            Ok(()) => println!("✓ {candidate} is a valid username"),
            Err(errors) => println!("✗ {candidate}: {}", errors.messages().join(", ")),
        }
    }

    // Schemas validate whole mappings
    let schema = Schema::new()
        .add_string("username", username)
        .add_string("email", StringRules::new().required().email())
        .add_number("age", NumberRules::new().gte(18).lt(130));

    let input = json!({
        "username": "bob",
        "email": "bob-at-example",
        "age": 17,
        "referrer": "newsletter"
    });
    let Some(entries) = input.as_object() else {
        return;
    };

    println!("\n{schema}");
    match schema.validate_map(entries) {
        Ok(()) => println!("✓ input is valid"),
        Err(errors) => print!("✗ {errors}"),
    }

    // Strict mode also rejects the unknown `referrer` key
    if let Err(errors) = schema.strict_validate_map(entries) {
        print!("✗ strict: {errors}");
    }
}
