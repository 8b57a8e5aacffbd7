//! The derive only accepts structs with named fields.

use depwarn::Record;

#[derive(Record)]
enum Mode { Fast, Slow }

#[derive(Record)]
struct Pair(u32, String);

#[derive(Record)]
#[deprecation(removed)]
struct Legacy { port: u16 }

fn main() {}
