pub mod detail;
pub mod list;
pub mod notice;

pub use detail::TicketDetail;
pub use list::{ListEntry, RenderOptions, render_list};
pub use notice::Notice;
