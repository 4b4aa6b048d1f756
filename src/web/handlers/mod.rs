pub mod analysis_handlers;
pub mod chat_handlers;
pub mod job_handlers;
pub mod profile_handlers;
pub mod resume_handlers;
pub mod system_handlers;

pub use analysis_handlers::*;
pub use chat_handlers::*;
pub use job_handlers::*;
pub use profile_handlers::*;
pub use resume_handlers::*;
pub use system_handlers::*;
