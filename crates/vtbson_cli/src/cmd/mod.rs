/// Generic document dump command.
pub mod dump;
/// JSON to document encode command.
pub mod encode;
/// JSON conversion for generic values.
pub mod json;
/// Indented value tree printer.
pub mod print;
/// Typed `EntityIdsQuery` decode command.
pub mod query;
mod util;

#[cfg(test)]
mod test_support;
