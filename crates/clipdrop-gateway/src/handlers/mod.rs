mod download;
mod index;

pub use download::download_handler;
pub use index::{index_handler, not_found_handler, submit_handler, validate_url, SubmitForm};
