//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod component_repo;
pub mod content_repo;
pub mod course_repo;
pub mod learning_line_repo;
pub mod program_repo;
pub mod session_repo;
pub mod track_repo;
pub mod user_program_repo;
pub mod user_repo;

pub use component_repo::ComponentRepo;
pub use content_repo::ContentRepo;
pub use course_repo::CourseRepo;
pub use learning_line_repo::LearningLineRepo;
pub use program_repo::ProgramRepo;
pub use session_repo::SessionRepo;
pub use track_repo::TrackRepo;
pub use user_program_repo::UserProgramRepo;
pub use user_repo::UserRepo;
