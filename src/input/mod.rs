pub mod instrument;
pub mod specimen;

pub use instrument::{InstrumentRecord, load_instrument};
pub use specimen::{SpecimenTable, load_specimens};
