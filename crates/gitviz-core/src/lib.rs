pub mod commit;
pub mod error;
pub mod filter;
pub mod id;
pub mod time;

pub use commit::{Commit, CommitTable};
pub use error::CoreError;
pub use filter::DateFilter;
pub use id::CommitId;
pub use time::AuthorTime;
