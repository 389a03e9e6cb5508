pub(crate) mod backend;
#[cfg(test)]
pub(crate) mod fake;
