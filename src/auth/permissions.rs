//! Permission strings granted by the signing authority's RBAC roles.

pub const GET_CATEGORIES: &str = "get:categories";
pub const GET_QUESTIONS: &str = "get:questions";
pub const CREATE_QUESTIONS: &str = "create:questions";
pub const UPDATE_QUESTIONS: &str = "update:questions";
pub const DELETE_QUESTIONS: &str = "delete:questions";
pub const GET_QUIZZES: &str = "get:quizzes";
