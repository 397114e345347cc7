pub mod connection;
pub mod directory;
pub mod table_file;

pub use connection::{init_db, Database};
pub use directory::{DirectoryStore, StoreError};
