pub mod capability;
pub mod record;
pub mod zoid;

pub use capability::Capabilities;
pub use record::{load_records, ZoidRecord};
pub use zoid::{UnitReport, Zoid};
