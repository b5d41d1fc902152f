use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("column name for {role} must not be empty")]
    EmptyColumnName { role: &'static str },
    #[error("column '{column}' is assigned to both {first} and {second}")]
    DuplicateColumn {
        column: String,
        first: &'static str,
        second: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ContractError>;
