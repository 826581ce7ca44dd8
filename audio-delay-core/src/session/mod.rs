pub mod controller;
pub mod probe;
