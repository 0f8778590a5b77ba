pub mod prompt;
pub mod upstream;
