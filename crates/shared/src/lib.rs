pub mod error;
pub mod models;
pub mod notice;
pub mod session;
pub mod viewport;

pub use error::ValidationError;
pub use session::SessionController;
pub use viewport::Viewport;
