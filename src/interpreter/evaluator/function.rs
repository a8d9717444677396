/// Call resolution and the built-in registry.
///
/// Resolves a callee name against user functions, function values in scope
/// and built-ins, checks arity and invokes the result.
pub mod core;
/// Console built-ins.
///
/// `Console.WriteLine` and `Console.ReadLine`, reading and writing through the
/// context's streams.
pub mod console;
/// The `List()` constructor built-in.
pub mod list;
