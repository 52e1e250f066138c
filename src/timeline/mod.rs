pub(crate) mod animator;
pub(crate) mod plan;
pub(crate) mod scheduler;
