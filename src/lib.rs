pub mod modules;
pub mod utilities;

pub use modules::scheduler::SimulationHandle;
pub use utilities::error::{Error, Result};
pub use utilities::fleet::Fleet;
