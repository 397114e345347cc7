pub mod add;
pub mod browse;
pub mod cards;
pub mod manage;
pub mod map;

pub use add::{add_page, sign_in_page};
pub use browse::BrowseVm;
pub use cards::cards_page;
pub use manage::{manage_page, PendingDelete};
pub use map::map_page;
