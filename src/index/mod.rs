//! Word-association index: shard parsing, pair loading and merging.

pub mod association;
pub mod pairs;
pub mod shard_format;

pub use self::association::{AssociationIndex, Weight};
pub use self::pairs::{LoadedShard, PairEntry, PairShardLoader};
pub use self::shard_format::{ParsedScript, parse_pair_script};
