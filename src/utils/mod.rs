pub mod clock;
pub mod pin_assignment;
pub mod proximity_error;

#[cfg(test)]
pub(crate) mod mock;
