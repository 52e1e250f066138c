pub(crate) mod record;
pub(crate) mod sink;
