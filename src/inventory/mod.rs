/// Inventory domain - device records and the services that merge,
/// decode and partition them.
pub mod domain;
pub mod services;
