pub mod collator;
pub mod decoders;
pub mod merger;
pub mod normalizer;
pub mod partitioner;

pub use collator::{clean_field, ExportCollator};
pub use decoders::{DecodeError, DecoderChain, JsonDecoder, PythonLiteralDecoder, ValueDecoder};
pub use merger::{InventoryMerger, MergeOutcome, OptionalColumns};
pub use normalizer::{FieldNormalizer, NormalizedInventory};
pub use partitioner::{Partition, TenantPartitioner};
