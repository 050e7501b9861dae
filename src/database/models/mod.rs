pub mod assignment;
pub mod bookmark;
pub mod review;
pub mod submission;

pub use assignment::{Assignment, AssignmentCard, Difficulty};
pub use bookmark::Bookmark;
pub use review::Review;
pub use submission::{Submission, SubmissionStatus};
