pub mod config;
pub mod project;
pub mod record;
pub mod route;
pub mod session;
pub mod task;
pub mod user;

pub use config::*;
pub use project::*;
pub use record::*;
pub use route::*;
pub use session::*;
pub use task::*;
pub use user::*;
