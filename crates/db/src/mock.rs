pub mod collaborators;
pub mod repositories;
