pub mod role;
pub mod user;

pub use role::{Field, FieldRequirements, Role};
pub use user::User;
