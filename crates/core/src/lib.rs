pub mod model;
pub mod status;
pub mod taxonomy;

pub use model::{Item, Project, Room};
pub use status::{ItemStatus, Sheet};
pub use taxonomy::{
    category_rank, room_rank, CATEGORY_PRIORITY, DEFAULT_CATEGORY, DEFAULT_SUB_CATEGORY,
    ROOM_TYPES,
};
