pub mod loader;
pub mod scenario;
pub mod schema;

pub use loader::DataLoadError;
pub use scenario::{Scenario, load_scenario};
