pub mod iter;
pub mod set_get;
