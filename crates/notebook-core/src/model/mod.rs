pub mod interpreter;
pub mod interpreter_map;

pub use interpreter::{is_sql_interface, InterpreterDefinition, EDITOR_CATEGORY};
pub use interpreter_map::InterpreterMap;
