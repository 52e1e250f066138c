pub(crate) mod epidemic;
pub(crate) mod session;
pub(crate) mod tables;
