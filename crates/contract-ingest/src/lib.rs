//! CSV ingestion and output for supplier contract tables.
//!
//! Files are read through Polars with every column as text, mapped onto
//! [`contract_model::ContractTable`], and written back with typed date
//! columns once cleaned.

pub mod csv;
pub mod error;
mod values;

pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, read_contract_csv, table_to_dataframe,
    write_contract_csv,
};
pub use error::{IngestError, Result};
