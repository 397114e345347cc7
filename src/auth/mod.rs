pub mod allow_list;
pub mod sessions;

pub use allow_list::AllowList;
pub use sessions::Session;
