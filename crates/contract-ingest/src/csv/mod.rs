//! Contract CSV input and output.

mod reader;
mod writer;

pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, frame_to_table,
    read_contract_csv, read_text_frame, validate_encoding,
};
pub use writer::{table_to_dataframe, write_contract_csv};
