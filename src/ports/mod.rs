/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist: the use case reaches the file
/// system and the console through these traits.
pub mod outbound;
