use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    /// A constraint or readback referenced a variable that no `set` call or
    /// equality constraint ever defined.
    #[error("undefined layout variable: {0}")]
    UndefinedVariable(String),
}
