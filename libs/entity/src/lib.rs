pub mod genre;
pub mod place;
pub mod post;
pub mod user;

pub mod prelude {
    pub use crate::genre::Genre;
    pub use crate::place::{round_coord, Place};
    pub use crate::post::{NewPost, Post};
    pub use crate::user::{BusinessProfile, UserRole};
}
