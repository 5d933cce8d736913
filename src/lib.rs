pub mod core;
pub mod export;
pub mod extract;
pub mod pipeline;
pub mod provider;
pub mod session;
pub mod template;

pub use crate::core::record::{DocumentRecord, Outcome, ResolutionFields, SocialFields};
pub use session::Session;
pub use template::{DocumentTemplate, ResolutionTemplate, SocialTemplate};
