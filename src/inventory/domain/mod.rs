pub mod cell;
pub mod columns;
pub mod device;
pub mod export;
pub mod table;
pub mod tenant;

pub use cell::CellValue;
pub use device::{DeviceRecord, InstalledSoftware, MergedRow, OsDescriptor, VulnerabilityFinding};
pub use export::TenantTable;
pub use table::Table;
pub use tenant::{TenantGroup, TenantName};
