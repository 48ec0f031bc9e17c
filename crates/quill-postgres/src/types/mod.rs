//! Custom types shared by the repositories.

mod constraint;

pub use constraint::{
    CommentConstraints, ConstraintCategory, ConstraintViolation, PostConstraints,
    SessionConstraints, UserConstraints,
};
