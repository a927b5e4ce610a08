pub mod builder;
pub mod functions;

pub use builder::PyBuilder;
