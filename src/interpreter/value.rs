/// Shared list storage.
///
/// Defines `ListRef`, the reference-counted, interior-mutable sequence behind
/// `Value::List`. Every alias of a list shares one underlying vector, so a
/// `push_back` through one name is visible through all of them.
pub mod list;
/// Function values.
///
/// Defines `Closure`, which bundles a function declaration with the frame that
/// was current when it was declared. Closures power recursion, forward
/// references through the function table and nested local functions.
pub mod function;

pub mod core;
