mod resolver;

pub use resolver::{DefaultResolver, Provider};
