pub mod demo;
pub mod gate;
pub mod login;
pub mod nav;
pub mod scan;
