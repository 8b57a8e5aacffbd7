//! Invalid #[deprecation] field options.

use depwarn::Record;

#[derive(Record)]
struct Conflict {
    #[deprecation(removed, replaced = "listen")]
    port: u16,
}

#[derive(Record)]
struct EmptyReplacement {
    #[deprecation(replaced = "")]
    port: u16,
}

#[derive(Record)]
struct CommaReplacement {
    #[deprecation(replaced = "a,b")]
    port: u16,
}

#[derive(Record)]
struct UnknownKey {
    #[deprecation(sunset = "2030")]
    port: u16,
}

#[derive(Record)]
struct SkipWithName {
    #[deprecation(skip, name = "p")]
    port: u16,
}

#[derive(Record)]
struct NoOptions {
    #[deprecation()]
    port: u16,
}

fn main() {}
