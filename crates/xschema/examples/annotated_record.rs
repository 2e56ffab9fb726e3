//! Deriving a schema from field annotations

use serde::Serialize;
use xschema::prelude::*;

#[derive(Debug, Serialize, Annotated)]
struct Signup {
    #[annotate(x = "Required,Min=3,Pattern=^[A-Z]{1}[a-z]+$")]
    first_name: String,

    #[annotate(x = "Required,Email")]
    email: String,

    #[annotate(x = "Required,Gte=18")]
    age: u8,

    #[annotate(x = r#"OneOf=["free","pro"]"#, billing = "Required")]
    plan: String,
}

fn main() {
    // Lenient parsing logs degraded annotations at `warn`
    tracing_subscriber::fmt().with_target(false).init();

    let signup = Signup {
        first_name: "ann".into(),
        email: "ann@example.com".into(),
        age: 16,
        plan: "enterprise".into(),
    };

    match validate_annotated(&signup) {
        Ok(()) => println!("✓ {signup:?} is valid"),
        Err(e) => print!("✗ {e}"),
    }

    let config = AnnotationConfig::from_env().strict();
    match Schema::from_annotations::<Signup>(&config) {
        Ok(schema) => println!("\nschema for tag `{}`: {schema}", config.tag),
        Err(e) => println!("\n✗ annotation error: {e}"),
    }
}
