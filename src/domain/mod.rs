//! Domain layer - what the bootstrap manages and how a step can end.

mod replica_identity;
mod role;
mod step;
mod table;

pub use replica_identity::ReplicaIdentity;
pub use role::ReplicationRole;
pub use step::{Step, StepCheck, StepOutcome, StepReport};
pub use table::{ColumnKind, ColumnSpec, TableDescriptor};
