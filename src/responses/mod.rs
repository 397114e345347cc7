pub mod download;
pub mod html;

pub use crate::errors::ResultResp;

pub use download::{csv_response, xlsx_response};
pub use html::{html_response, html_response_with_status, redirect};
