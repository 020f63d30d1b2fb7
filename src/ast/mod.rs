/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed statement and expression enums and the shared node capability
/// - expressions: Definitions for the expression node types
/// - statements: Definitions for the statement node types and the program root
pub mod ast;
pub mod expressions;
pub mod statements;
