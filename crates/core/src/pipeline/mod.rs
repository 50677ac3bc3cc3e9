pub mod create_barcode_use_case;
pub mod progress_reporter;
