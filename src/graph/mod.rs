pub mod node;
pub mod reaction;
pub mod traits;
pub mod weighted;

pub use node::{NodeId, ReactionIndexRange};
pub use reaction::{Edge, EdgeRow, ReactionGraph};
pub use traits::Graph;
pub use weighted::WeightedReactionGraph;
