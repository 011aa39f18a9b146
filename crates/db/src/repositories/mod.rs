pub mod account_repo;
pub mod session_repo;
pub mod user_repo;

pub use account_repo::AccountRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
